use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "examine")]
#[command(about = "A minimal unit-test harness with a mock substitution engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored report markers
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_count(self.verbose)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the registered test suite and print the report
    Run(RunArgs),

    /// List the registered test names without running them
    List,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Only run tests whose qualified name contains this substring
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,
}

impl RunArgs {
    /// Fill unset flags from the loaded config file.
    pub fn merge_config(&mut self, config: &Config) {
        if self.filter.is_none() {
            self.filter = config.runner.filter.clone();
        }
        if self.format.is_none() {
            self.format = config
                .output
                .format
                .as_deref()
                .and_then(ReportFormat::from_config_str);
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    fn from_config_str(value: &str) -> Option<Self> {
        match value {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Log verbosity derived from repeated `-v` flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            2 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_saturates_at_trace() {
        assert_eq!(Verbosity::from_count(0), Verbosity::Normal);
        assert_eq!(Verbosity::from_count(1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_count(7), Verbosity::Trace);
    }

    #[test]
    fn config_fills_only_unset_flags() {
        let config: Config = toml::from_str(
            r#"
            [runner]
            filter = "demo"

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        let mut args = RunArgs {
            filter: Some("cli".into()),
            format: None,
        };
        args.merge_config(&config);

        assert_eq!(args.filter.as_deref(), Some("cli"));
        assert_eq!(args.format, Some(ReportFormat::Json));
    }
}
