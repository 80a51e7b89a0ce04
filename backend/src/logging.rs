use std::io::Write;
use tracing::{Event, Subscriber};
use tracing_log::NormalizeEvent;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "warn,backend=info,shared=info";

#[derive(Default)]
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0.push_str(&format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }
}

struct TrackerLayer<W> {
    make_writer: W,
}

impl<S, W> Layer<S> for TrackerLayer<W>
where
    S: Subscriber,
    W: for<'a> MakeWriter<'a> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Records bridged from the `log` facade carry their real module
        // path only in the normalized metadata
        let normalized = event.normalized_metadata();
        let metadata = normalized.as_ref().unwrap_or_else(|| event.metadata());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if visitor.0.is_empty() {
            return;
        }

        let level = match metadata.level().as_str() {
            "ERROR" => "ERROR",
            "WARN" => "WARN",
            "INFO" => "INFO",
            // Spin-by-spin chatter only comes from the tracker core
            _ if metadata.target().starts_with("shared") => "DEBUG",
            _ => return,
        };

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let mut writer = self.make_writer.make_writer();
        let _ = writeln!(
            writer,
            "[{}] {} {} - {}",
            timestamp,
            level,
            metadata.target(),
            visitor.0
        );
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Records emitted through the `log` facade by the shared crate are bridged in.
pub fn setup() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    Registry::default()
        .with(env_filter)
        .with(TrackerLayer {
            make_writer: std::io::stdout,
        })
        .init();
}
