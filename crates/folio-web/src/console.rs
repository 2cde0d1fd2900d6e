#![forbid(unsafe_code)]

//! `tracing` layer that writes formatted events to a console sink.
//!
//! On `wasm32` the sink is the browser console: `error!` goes to
//! `console.error`, `warn!` to `console.warn`, everything else to
//! `console.log`. The formatting is target-independent.
//!
//! Line format: `LEVEL target: message key=value key=value`.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Destination for formatted log lines.
pub trait ConsoleSink: Send + Sync + 'static {
    fn write(&self, level: Level, line: &str);
}

/// Layer forwarding events at or below `max_level` to a [`ConsoleSink`].
#[derive(Debug)]
pub struct ConsoleLayer<W> {
    sink: W,
    max_level: Level,
}

impl<W: ConsoleSink> ConsoleLayer<W> {
    pub fn new(sink: W, max_level: Level) -> Self {
        Self { sink, max_level }
    }
}

impl<S: Subscriber, W: ConsoleSink> Layer<S> for ConsoleLayer<W> {
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        *metadata.level() <= self.max_level
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() > self.max_level {
            return;
        }
        let mut line = LineVisitor::default();
        event.record(&mut line);
        self.sink
            .write(*meta.level(), &line.finish(*meta.level(), meta.target()));
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self, level: Level, target: &str) -> String {
        let mut out = format!("{level} {target}: {}", self.message);
        out.push_str(&self.fields);
        out
    }
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// The browser console.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConsole;

#[cfg(target_arch = "wasm32")]
impl ConsoleSink for BrowserConsole {
    fn write(&self, level: Level, line: &str) {
        let line = wasm_bindgen::JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }
}

/// Install the browser console layer as the global subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(target_arch = "wasm32")]
pub fn install(max_level: Level) -> bool {
    use tracing_subscriber::layer::SubscriberExt;

    let subscriber =
        tracing_subscriber::registry().with(ConsoleLayer::new(BrowserConsole, max_level));
    tracing::subscriber::set_global_default(subscriber).is_ok()
}
