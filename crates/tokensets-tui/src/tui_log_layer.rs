//! Tracing layer that feeds the TUI log panel

use {
    crate::token_tab::{LogBuffer, MAX_LOG_LINES},
    std::fmt::Write as _,
    tracing::{
        Event, Level, Subscriber,
        field::{Field, Visit},
    },
    tracing_subscriber::{Layer, layer::Context, registry::LookupSpan},
};

/// Captures each event as `[LEVEL] message key=value ...` into a shared buffer
pub struct TuiLogLayer {
    logs: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(logs: LogBuffer) -> Self {
        Self { logs }
    }
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let message = if visitor.message.is_empty() {
            event.metadata().name().to_string()
        } else {
            visitor.message
        };
        let line = format!(
            "[{}] {}{}",
            level_label(*event.metadata().level()),
            message.trim(),
            visitor.fields
        );

        // A poisoned buffer only loses log lines
        if let Ok(mut logs) = self.logs.lock() {
            logs.push_back(line);
            while logs.len() > MAX_LOG_LINES {
                logs.pop_front();
            }
        }
    }
}

/// Collects the formatted message plus any structured fields
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            // `format_args!` messages debug-print without quotes
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}
