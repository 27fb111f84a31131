//! Tracing layer that forwards log records to the presentation layer.
//!
//! Records at or above the configured level are converted to [`LogEvent`]s and
//! sent over a tokio channel, so a front end can show pipeline progress
//! without parsing formatted log output.

use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// A log record as delivered to the front end.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LogEvent {
    /// Module path that emitted the record
    pub target: String,
    pub level: String,
    /// Component from a leading `[Component]` tag, e.g. `ReportSynthesizer`
    pub component: Option<String>,
    /// Message with the component tag removed
    pub message: String,
    /// Remaining structured fields
    pub fields: BTreeMap<String, Value>,
    pub timestamp: String,
}

/// Forwards records to an unbounded channel.
pub struct LogEventLayer {
    sender: mpsc::UnboundedSender<LogEvent>,
    max_level: Level,
}

impl LogEventLayer {
    /// Forwards records at `INFO` and above.
    pub fn new(sender: mpsc::UnboundedSender<LogEvent>) -> Self {
        Self {
            sender,
            max_level: Level::INFO,
        }
    }

    /// Sets the most verbose level that is forwarded.
    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }
}

impl<S> Layer<S> for LogEventLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        // Level ordering: TRACE > DEBUG > INFO > WARN > ERROR
        if *metadata.level() > self.max_level {
            return;
        }

        let mut fields = BTreeMap::new();
        event.record(&mut JsonVisitor(&mut fields));

        let raw = match fields.remove("message") {
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let (component, message) = split_component(&raw);

        let log_event = LogEvent {
            target: metadata.target().to_string(),
            level: metadata.level().to_string(),
            component: component.map(str::to_string),
            message: message.to_string(),
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // A closed receiver just means nobody is listening.
        let _ = self.sender.send(log_event);
    }
}

/// Splits `"[Component] message"` into its tag and the rest.
pub fn split_component(message: &str) -> (Option<&str>, &str) {
    if let Some(rest) = message.strip_prefix('[')
        && let Some((tag, tail)) = rest.split_once(']')
        && !tag.is_empty()
        && !tag.contains(char::is_whitespace)
    {
        return (Some(tag), tail.trim_start());
    }
    (None, message)
}

struct JsonVisitor<'a>(&'a mut BTreeMap<String, Value>);

impl Visit for JsonVisitor<'_> {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), Value::from(format!("{:?}", value)));
    }
}
