use std::io;
use std::time::Instant;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry, filter, fmt};

const TARGETS: [&str; 7] =
    ["compiling", "diagnostics", "protocol", "reconciling", "toolchain", "tsc_adapter", "meta"];

struct SpanTimingLayer;

impl<S> tracing_subscriber::Layer<S> for SpanTimingLayer
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_enter(&self, id: &tracing::span::Id, ctx: tracing_subscriber::layer::Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if span.extensions().get::<Instant>().is_none() {
                span.extensions_mut().insert(Instant::now());
            }
        }
    }

    fn on_close(&self, id: tracing::span::Id, ctx: tracing_subscriber::layer::Context<'_, S>) {
        if let Some(span) = ctx.span(&id)
            && let Some(start) = span.extensions().get::<Instant>()
        {
            let duration = start.elapsed();
            let name = span.name();
            tracing::debug!(target: "meta", span = name, span.duration = ?duration);
        }
    }
}

/// Log lines share standard output with the result line, so they are
/// written plainly: no colours, no timestamps.
pub fn subscriber(level: LevelFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    let fmt_filter = filter::Targets::new()
        .with_targets(TARGETS.map(|target| (target, level)))
        .with_default(LevelFilter::WARN);
    let fmt = fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(false)
        .without_time()
        .with_filter(fmt_filter);

    let timing_filter = filter::Targets::new()
        .with_targets(["compiling", "reconciling"].map(|target| (target, level)))
        .with_default(LevelFilter::OFF);
    let timing = SpanTimingLayer.with_filter(timing_filter);

    Registry::default().with(fmt).with(timing)
}
