#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use dynvalue_testhelpers_macros::test;

use std::sync::LazyLock;
use std::time::Instant;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding a `tracing` target filter, e.g.
/// `DYNVALUE_LOG=dynvalue=trace`.
pub const LOG_ENV: &str = "DYNVALUE_LOG";

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Timestamps log lines with the time since the first test started.
struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

/// Frames that only show the test harness or the panic machinery.
fn is_harness_frame(name: &str) -> bool {
    const NOISE: &[&str] = &[
        "test::run_test",
        "test::__rust_begin_short_backtrace",
        "std::panicking::",
        "std::panic::",
        "core::panicking::",
        "std::sys::",
        "core::ops::function::FnOnce::call_once",
        "<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once",
        "__pthread",
    ];
    NOISE.iter().any(|prefix| name.starts_with(prefix))
}

fn default_filter() -> Targets {
    Targets::new()
        .with_target("dynvalue", tracing::Level::TRACE)
        .with_default(tracing::Level::DEBUG)
}

static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    let _ = *START_TIME;

    color_backtrace::BacktracePrinter::new()
        .verbosity(color_backtrace::Verbosity::Medium)
        .add_frame_filter(Box::new(|frames| {
            frames.retain(|frame| frame.name.as_deref().is_none_or(|n| !is_harness_frame(n)));
        }))
        .install(Box::new(termcolor::StandardStream::stderr(
            termcolor::ColorChoice::Auto,
        )));

    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(default_filter);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_timer(Uptime)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .ok();
});

/// Installs the test tracing subscriber and panic printer.
///
/// Safe to call from every test: the setup runs once per process.
pub fn setup() {
    #[allow(clippy::let_unit_value)]
    let _ = *SUBSCRIBER_INIT;
}

/// An error type that panics when it's built, so tests can use `?` on any
/// error and still get a located failure.
#[derive(Debug)]
pub struct IPanic;

impl<E> From<E> for IPanic
where
    E: core::error::Error + Send + Sync,
{
    #[track_caller]
    fn from(value: E) -> Self {
        panic!("from: {}: {value}", core::panic::Location::caller())
    }
}
