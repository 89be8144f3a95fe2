//! Opt-in diagnostics for AI round-trips.
//!
//! When `AI_DEBUG` is on, the assistant reports raw model responses and
//! normalized results as structured events. The sink is a trait so tests can
//! capture events without installing a tracing subscriber. Nothing here may
//! influence control flow.

use std::sync::Arc;

use serde_json::Value;

/// Receiver of AI diagnostic events.
pub trait AiDebugSink: Send + Sync {
    fn record(&self, event: &str, data: Value);
}

pub type SharedDebugSink = Arc<dyn AiDebugSink>;

/// Emits events through `tracing` on target `moodflow::ai_debug`.
pub struct TracingDebugSink;

impl AiDebugSink for TracingDebugSink {
    fn record(&self, event: &str, data: Value) {
        tracing::warn!(target: "moodflow::ai_debug", event, data = %data, "ai debug");
    }
}

/// Discards everything.
pub struct NoopDebugSink;

impl AiDebugSink for NoopDebugSink {
    fn record(&self, _event: &str, _data: Value) {}
}

/// Sink for the given flag: tracing when enabled, no-op otherwise.
pub fn sink_for(enabled: bool) -> SharedDebugSink {
    if enabled {
        Arc::new(TracingDebugSink)
    } else {
        Arc::new(NoopDebugSink)
    }
}

/// Truncate to at most `max_chars` characters.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Captures events in memory.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink {
    events: std::sync::Mutex<Vec<(String, Value)>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(name, _)| name).collect()
    }

    pub fn find(&self, name: &str) -> Option<Value> {
        self.events()
            .into_iter()
            .find(|(event, _)| event == name)
            .map(|(_, data)| data)
    }
}

#[cfg(test)]
impl AiDebugSink for RecordingSink {
    fn record(&self, event: &str, data: Value) {
        self.events.lock().unwrap().push((event.to_string(), data));
    }
}
