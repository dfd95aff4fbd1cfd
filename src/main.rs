use clap::Parser;
use examine::cli::{Cli, Commands, Verbosity};
use examine::output::OutputConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing(verbosity: Verbosity) {
    let log_level = verbosity.to_log_level();
    let fallback_filter = format!("examine={log_level},examine_substitute={log_level}");

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback_filter.into()),
        )
        .with(fmt_layer)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.verbosity());

    let config = examine::config::Config::load_or_default();
    let no_color = cli.no_color || config.output.color == Some(false);
    OutputConfig::configure(no_color);

    match cli.command {
        Commands::Run(mut args) => {
            args.merge_config(&config);
            let summary = examine::cli::commands::run(args)?;
            if summary.passed < summary.total {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::List => examine::cli::commands::list(),
    }
}
