mod cli;
mod coflnet;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talisman=info,talisman_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Configure {
            set_api_base,
            timeout,
            retries,
            show,
        } => {
            let update = commands::configure::ConfigUpdate {
                api_base: set_api_base,
                timeout_secs: timeout,
                retries,
            };
            commands::configure::handle(update, show)?;
        }

        Commands::Filter {
            input,
            output,
            soulbound,
        } => {
            commands::filter::handle(&input, &output, &soulbound)?;
        }

        Commands::Price { input, output } => {
            let config = Config::load()?.with_api_base(cli.api_base);
            commands::price::handle(&input, &output, &config)?;
        }

        Commands::Rank {
            input,
            output,
            upgrade_cost,
            no_upgrades,
        } => {
            let config = Config::load()?.with_api_base(cli.api_base);
            let upgrade = commands::rank::UpgradeCost::from_args(upgrade_cost, no_upgrades);
            commands::rank::handle(&input, &output, upgrade, &config)?;
        }

        Commands::Publish { source, dest } => {
            commands::publish::handle(&source, &dest)?;
        }

        Commands::Run { dir, publish } => {
            let config = Config::load()?.with_api_base(cli.api_base);
            commands::run::handle(&dir, publish.as_deref(), &config)?;
        }
    }

    Ok(())
}
