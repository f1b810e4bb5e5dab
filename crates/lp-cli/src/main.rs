use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lp_cli::commands::{colors, paint};
use lp_cli::{Cli, ColorsAction, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Paint {
            input,
            parser,
            format,
            colors,
            no_time,
            no_sender,
        }) => {
            let config = Config::load_from(cli.config.as_deref())
                .context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let args = paint::PaintArgs {
                input,
                parser: *parser,
                format: *format,
                colors: colors.as_deref(),
                no_time: *no_time,
                no_sender: *no_sender,
            };
            paint::run(&args, &config)?;
        }
        Some(Commands::Colors { action }) => match action {
            ColorsAction::Assign {
                input,
                base,
                output,
            } => colors::assign(input, base.as_deref(), *output)?,
            ColorsAction::Convert { input, to } => colors::convert(input, *to)?,
        },
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
