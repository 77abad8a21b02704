pub mod config;
pub mod logging_system;
pub mod pipeline;

pub use config::{Config, ConfigError, LogFormat, LogLevel};
pub use logging_system::{LoggingError, LoggingSystem, setup_logging_safe};
pub use pipeline::{PipelineError, PipelineStats, run_pipeline};

use crate::enricher::MessageBuilder;
use crate::sender::WriterSink;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct App {
    config: Config,
    builder: MessageBuilder,
}

impl App {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::from_args_and_env(args)?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let builder = MessageBuilder::new(config.builder_config()?);
        Ok(Self { config, builder })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn builder(&self) -> &MessageBuilder {
        &self.builder
    }

    /// Enrich events from stdin to stdout until EOF or Ctrl-C.
    pub async fn run(self) -> Result<PipelineStats, PipelineError> {
        let builder_config = self.builder.config();
        info!("Starting rask-log-enricher v{}", env!("CARGO_PKG_VERSION"));
        info!(
            "Configuration: docker_host={}, type={:?}, log_types={:?}",
            builder_config.reporting_host,
            (!builder_config.suppress_type).then_some(&builder_config.type_label),
            builder_config.log_types
        );

        let cancel = CancellationToken::new();
        let signal_token = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => signal_token.cancel(),
                Err(e) => error!("Failed to listen for Ctrl-C: {e}"),
            }
        });

        let mut sink = WriterSink::stdout();
        run_pipeline(tokio::io::stdin(), &self.builder, &mut sink, cancel).await
    }
}

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Main entry point for the application
pub async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-V") {
        println!("rask-log-enricher {}", get_version());
        return Ok(());
    }

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        use clap::CommandFactory;
        Config::command().print_help()?;
        return Ok(());
    }

    let app = App::from_args(args)?;
    let config = app.config();
    setup_logging_safe(config.log_level, config.log_format, &config.log_directives)?;

    let stats = app.run().await?;
    if stats.rejected > 0 || stats.skipped > 0 {
        info!(
            "Dropped {} of {} events",
            stats.rejected + stats.skipped,
            stats.received
        );
    }

    Ok(())
}
