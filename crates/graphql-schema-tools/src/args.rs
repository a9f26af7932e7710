use clap::Parser;
use tracing::Subscriber;
use tracing_subscriber::{registry::LookupSpan, Layer};

mod log;

pub use self::log::{LogLevel, LogStyle};

pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Parser)]
#[command(version)]
/// Runs one schema tool invocation: a base64 message in, one base64 message line out on stdout.
pub struct Args {
    /// The base64 encoded input message
    pub input: String,
    /// Set the logging level
    #[arg(long = "log", env = "GRAPHQL_TOOLS_LOG", default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
    /// Set the style of log output
    #[arg(long, env = "GRAPHQL_TOOLS_LOG_STYLE", default_value_t = LogStyle::Text)]
    pub log_style: LogStyle,
}

impl Args {
    /// Logs go to stderr. Stdout is reserved for the output message.
    pub(crate) fn log_format<S>(&self) -> BoxedLayer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false);

        match self.log_style {
            LogStyle::Text => layer.boxed(),
            LogStyle::Json => layer.json().boxed(),
        }
    }
}
