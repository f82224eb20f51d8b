use tracing::Level;

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Format {
    /// Human readable lines, colored when stdout is a terminal.
    #[default]
    Text,
    /// One JSON object per event, for log collectors.
    Json,
}

impl Format {
    pub fn json(enabled: bool) -> Self {
        if enabled { Self::Json } else { Self::Text }
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Destination {
    /// Events at the stderr threshold or more severe go to stderr, the rest
    /// to stdout.
    #[default]
    Split,
    /// Everything goes to stderr, leaving stdout to the program's output.
    Stderr,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directives selecting which spans and events are logged, see
    /// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    pub(crate) env_filter: String,
    /// Events at this level or more severe go to stderr. Defaults to
    /// `ERROR`. Ignored with [`Destination::Stderr`].
    pub(crate) stderr_threshold: Option<Level>,
    pub(crate) format: Format,
    pub(crate) destination: Destination,
}

impl Config {
    pub fn new(env_filter: &str, stderr_threshold: Option<Level>, format: Format) -> Self {
        Self {
            env_filter: env_filter.to_owned(),
            stderr_threshold,
            format,
            destination: Destination::Split,
        }
    }

    pub fn with_env_filter(self, env_filter: &str) -> Self {
        Self {
            env_filter: env_filter.to_owned(),
            ..self
        }
    }

    pub fn with_stderr_threshold(self, stderr_threshold: Level) -> Self {
        Self {
            stderr_threshold: Some(stderr_threshold),
            ..self
        }
    }

    pub fn with_format(self, format: Format) -> Self {
        Self { format, ..self }
    }

    pub fn with_stderr_only(self) -> Self {
        Self {
            destination: Destination::Stderr,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("info", None, Format::Text)
    }
}
