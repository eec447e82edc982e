use std::path::PathBuf;

mod summary;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use flattener::{Config, Paths, Pipeline};
use summary::{OutputFormat, Summary};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The input collection: a JSON (or YAML) mapping of identifier to record
    input: PathBuf,

    /// Directory to write outputs to [default: the input's directory]
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extract records in parallel (output order is unchanged)
    #[arg(long)]
    parallel: bool,

    /// Output format of the run summary
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Print the summary as a single line for scripting
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.extract()
    }

    #[instrument(level = "debug", skip(self), fields(input = %self.input.display()))]
    fn extract(self) -> anyhow::Result<()> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::default(),
        };
        config.parallel |= self.parallel;

        let paths = Paths::from_input(self.input, self.out_dir.as_deref())?;

        let report = Pipeline::new(&config)
            .context("invalid configuration")?
            .run(&paths)
            .with_context(|| format!("failed to flatten {}", paths.input.display()))?;

        Summary::new(&report).print(self.output, self.quiet)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
