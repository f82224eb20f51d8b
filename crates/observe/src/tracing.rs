use {
    crate::{Config, Destination, Format},
    std::{io::IsTerminal, panic::PanicHookInfo, sync::Once},
    time::macros::format_description,
    tracing::Level,
    tracing_subscriber::{
        EnvFilter,
        Layer,
        fmt::{
            time::UtcTime,
            writer::{BoxMakeWriter, MakeWriterExt as _},
        },
        prelude::*,
    },
};

/// Initializes the tracing setup that is shared between the binaries.
///
/// The env filter has similar syntax to env_logger. It is documented at
/// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
///
/// # Panics
///
/// Panics if a global subscriber was already installed.
pub fn initialize(config: &Config) {
    set_tracing_subscriber(config);
    std::panic::set_hook(Box::new(tracing_panic_hook));
}

/// Like [`initialize`], but can be called multiple times in a row. Later calls
/// are ignored.
///
/// Useful for tests.
pub fn initialize_reentrant(env_filter: &str) {
    // The subscriber is process global, a second installation would panic.
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        set_tracing_subscriber(&Config::default().with_env_filter(env_filter));
        std::panic::set_hook(Box::new(tracing_panic_hook));
    });
}

fn set_tracing_subscriber(config: &Config) {
    let writer = writer(
        config,
        BoxMakeWriter::new(std::io::stdout),
        BoxMakeWriter::new(std::io::stderr),
    );
    let ansi = match config.destination {
        Destination::Split => std::io::stdout().is_terminal(),
        Destination::Stderr => std::io::stderr().is_terminal(),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_timer(UtcTime::new(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        )));
    let fmt_layer = match config.format {
        Format::Json => fmt_layer.json().boxed(),
        Format::Text => fmt_layer.with_ansi(ansi).boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::new(&config.env_filter)))
        .init();
}

/// Routes events to `stdout` or `stderr` according to the configured
/// destination and stderr threshold.
fn writer(config: &Config, stdout: BoxMakeWriter, stderr: BoxMakeWriter) -> BoxMakeWriter {
    match config.destination {
        Destination::Stderr => stderr,
        Destination::Split => {
            // `with_max_level` keeps the threshold and everything more severe.
            let threshold = config.stderr_threshold.unwrap_or(Level::ERROR);
            BoxMakeWriter::new(stderr.with_max_level(threshold).or_else(stdout))
        }
    }
}

/// Reports panics through `tracing::error!` so they end up in the same log
/// stream and format as everything else.
fn tracing_panic_hook(panic: &PanicHookInfo) {
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>");
    let backtrace = std::backtrace::Backtrace::force_capture();
    tracing::error!("thread '{name}' {panic}\nstack backtrace:\n{backtrace}");
}
