//----------------------------------------------------------------------------------------- std lib
use std::io::Write;
use std::time::Instant;
//--------------------------------------------------------------------------------- other libraries
use env_logger::fmt::style::Style;
use log::info;
use once_cell::sync::Lazy;
use tracing_subscriber::{EnvFilter, Layer as _, fmt::format::FmtSpan, layer::SubscriberExt as _};

use crate::format_duration;

// This will get initialized below.
/// Returns the init [`Instant`]
pub static INIT_INSTANT: Lazy<Instant> = Lazy::new(Instant::now);

/// The filter used when `RUST_LOG` isn't set:
/// everything but the tyne crates is silenced.
#[must_use]
pub fn default_filters(filter: log::LevelFilter) -> String {
    format!("off,tyne={filter}")
}

//---------------------------------------------------------------------------------------------------- Logger init function
#[allow(clippy::module_name_repetitions)]
/// Initializes the logger.
///
/// This enables console logging on all the internals of `tyne`.
///
/// Functionality is provided by [`log`].
///
/// The levels are:
/// - ERROR
/// - WARN
/// - INFO
/// - DEBUG
/// - TRACE
///
/// If `RUST_LOG` is set it takes precedence over `filter`.
///
/// # Panics
/// This must only be called _once_.
#[cfg(not(tarpaulin_include))]
pub fn init_logger(filter: log::LevelFilter) {
    // Initialize timer.
    let now = Lazy::force(&INIT_INSTANT);

    let env = std::env::var("RUST_LOG").ok().filter(|e| !e.is_empty());
    let filters = env.clone().unwrap_or_else(|| default_filters(filter));

    env_logger::Builder::new()
        .format(move |buf, record| {
            let level_style = buf.default_level_style(record.level()).bold();
            let dimmed = Style::new().dimmed();
            let level = match record.level() {
                log::Level::Debug => "D",
                log::Level::Trace => "T",
                log::Level::Info => "I",
                log::Level::Warn => "W",
                log::Level::Error => "E",
            };
            writeln!(
                buf,
                // Longest PATH in the repo: `storage/src/db/crud/playlist.rs` - `31` characters
                //
                //      Longest PATH ---|        |--- Longest file
                //                      |        |
                //                      v        v
                "| {level_style}{level}{level_style:#} | {dimmed}{}{dimmed:#} | {dimmed}{: >31} @ {: <4}{dimmed:#} | {}",
                format_duration(&now.elapsed()),
                record.file_static().unwrap_or("???"),
                record.line().unwrap_or(0),
                record.args(),
            )
        })
        .write_style(env_logger::WriteStyle::Auto)
        .parse_filters(&filters)
        .init();

    match env {
        Some(env) => info!("Log Level (RUST_LOG) ... {env}"),
        None => info!("Log Level (Flag) ... {filter}"),
    }
}

/// Builds the tracing subscriber.
///
/// Spans are reported on stderr when they close, along with how long they took.
/// `TYNE_TRACE` overrides which spans are reported, by default only those of the tyne crates are.
#[must_use]
pub fn init_tracing() -> impl tracing::Subscriber {
    #[cfg(not(feature = "verbose_tracing"))]
    let default = "off,tyne=trace";
    #[cfg(feature = "verbose_tracing")]
    let default = "trace";

    let filter = EnvFilter::try_from_env("TYNE_TRACE").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter),
    )
}
