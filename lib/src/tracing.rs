use std::str::FromStr;

use tracing_subscriber::field::MakeExt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

use yansi::Paint;

use crate::error::{ErrorKind, Result};
use crate::Config;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub enum Mode {
    #[default]
    Formatted,
    Json,
}

impl FromStr for Mode {
    type Err = crate::Error;

    fn from_str(input: &str) -> Result<Self> {
        match input {
            "formatted" | "pretty" => Ok(Self::Formatted),
            "json" => Ok(Self::Json),
            _ => Err(ErrorKind::ParsingError(format!("unknown log mode {}", input)).into()),
        }
    }
}

#[derive(PartialEq, Eq, Default, Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Only shows errors and warnings
    Critical,
    /// Shows errors, warnings, and some informational messages that are likely
    /// to be relevant when troubleshooting such as configuration
    Support,
    /// Shows everything except debug and trace information
    #[default]
    Normal,
    /// Shows debug information
    Debug,
    /// Shows everything
    Trace,
    /// Shows nothing
    Off,
}

impl FromStr for Level {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match &*s.to_ascii_lowercase() {
            "critical" | "error" => Ok(Level::Critical),
            "support" | "warn" => Ok(Level::Support),
            "normal" | "info" => Ok(Level::Normal),
            "debug" | "dbg" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            "off" | "none" => Ok(Level::Off),
            _ => Err(ErrorKind::ParsingError(format!(
                "expected a log level (off, trace, debug, normal, support, critical), got {}",
                s
            ))
            .into()),
        }
    }
}

pub fn filter_layer(level: Level) -> Result<EnvFilter> {
    let filter_str = match level {
        Level::Critical => "error",
        Level::Support => "warn",
        Level::Normal => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
        Level::Off => "off",
    };

    EnvFilter::try_new(filter_str).map_err(|e| ErrorKind::Other(e.to_string()).into())
}

/// Human readable layer writing to stderr, leaving stdout to the program's
/// actual output.
pub fn default_logging_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber,
    S: for<'span> LookupSpan<'span>,
{
    formatted_layer(std::io::stderr)
}

/// Json layer writing to stderr.
pub fn json_logging_layer<
    S: for<'a> tracing_subscriber::registry::LookupSpan<'a> + tracing::Subscriber,
>() -> impl tracing_subscriber::Layer<S> {
    Paint::disable();

    json_layer(std::io::stderr)
}

fn formatted_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: tracing::Subscriber,
    S: for<'span> LookupSpan<'span>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let field_format = tracing_subscriber::fmt::format::debug_fn(|writer, field, value| {
        // We'll format the field name and value separated with a colon.
        if field.name() == "message" {
            write!(writer, "{:?}", Paint::new(value).bold())
        } else {
            write!(writer, "{}: {:?}", field, Paint::default(value).bold())
        }
    })
    .delimited(", ")
    .display_messages();

    tracing_subscriber::fmt::layer()
        .fmt_fields(field_format)
        .with_writer(writer)
}

fn json_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: tracing::Subscriber,
    S: for<'span> LookupSpan<'span>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer().json().with_writer(writer)
}

/// Initializes the global tracing subscriber based on the `tracing` section
/// of the configuration. Records emitted through `log` are forwarded as well.
///
/// Does nothing if tracing is disabled. Fails if a global subscriber was
/// already set.
pub fn init(config: &Config) -> Result<()> {
    use tracing_log::LogTracer;
    use tracing_subscriber::prelude::*;

    if !config.tracing.enabled {
        return Ok(());
    }

    LogTracer::init().map_err(|e| ErrorKind::Other(e.to_string()))?;

    let filter = filter_layer(config.tracing.level)?;
    match config.tracing.mode {
        Mode::Formatted => tracing::subscriber::set_global_default(
            tracing_subscriber::registry()
                .with(default_logging_layer())
                .with(filter),
        ),
        Mode::Json => tracing::subscriber::set_global_default(
            tracing_subscriber::registry()
                .with(json_logging_layer())
                .with(filter),
        ),
    }
    .map_err(|e| ErrorKind::Other(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_level_parsing() {
        for (input, expected) in [
            ("critical", Level::Critical),
            ("warn", Level::Support),
            ("Normal", Level::Normal),
            ("info", Level::Normal),
            ("dbg", Level::Debug),
            ("TRACE", Level::Trace),
            ("none", Level::Off),
        ] {
            assert_eq!(input.parse::<Level>().unwrap(), expected, "{input}");
        }
        let err = "loud".parse::<Level>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ParsingError(_)));
    }

    #[test]
    fn test_mode_parsing() {
        assert!(matches!("json".parse::<Mode>().unwrap(), Mode::Json));
        assert!(matches!("formatted".parse::<Mode>().unwrap(), Mode::Formatted));
        assert!("loki".parse::<Mode>().is_err());
    }

    #[test]
    fn test_filter_layer_builds_for_all_levels() {
        for level in [
            Level::Critical,
            Level::Support,
            Level::Normal,
            Level::Debug,
            Level::Trace,
            Level::Off,
        ] {
            assert!(filter_layer(level).is_ok());
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_layers_write_to_given_writer() {
        use tracing_subscriber::prelude::*;

        let formatted = Captured::default();
        let sink = formatted.clone();
        let subscriber = tracing_subscriber::registry()
            .with(formatted_layer(move || sink.clone()))
            .with(filter_layer(Level::Normal).unwrap());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(page = "LOGIN", "mounted");
            tracing::debug!("filtered out");
        });
        let out = formatted.contents();
        assert!(out.contains("mounted"), "{out}");
        assert!(out.contains("LOGIN"), "{out}");
        assert!(!out.contains("filtered out"), "{out}");

        let json = Captured::default();
        let sink = json.clone();
        let subscriber = tracing_subscriber::registry().with(json_layer(move || sink.clone()));
        tracing::subscriber::with_default(subscriber, || tracing::warn!("as json"));
        let line = json.contents();
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["fields"]["message"], "as json");
    }

    #[test]
    fn test_disabled_tracing_is_noop() {
        let mut config = Config::default();
        config.tracing.enabled = false;
        assert!(init(&config).is_ok());
    }
}
