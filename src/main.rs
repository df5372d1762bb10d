use clap::Parser;

use deliveryctl::commands;
use deliveryctl::config::{Cli, Command, Config};
use deliveryctl::confirm::StdinConfirmation;
use deliveryctl::errors::Result;
use deliveryctl::telemetry;

#[tokio::main]
async fn main() {
    // Load .env before resolving DATABASE_URL.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = telemetry::init() {
        eprintln!("✗ Error: failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        eprintln!("✗ Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.db_url)?;

    match cli.command {
        Command::Migrate { schema } => commands::migrate::run(&config, &schema).await,
        Command::Reset => commands::reset::run(&config).await,
        Command::Status => commands::status::run(&config).await,
        Command::Seed => commands::seed::run(&config).await,
        Command::CleanupOrphanedMenus { execute } => {
            let mut confirm = StdinConfirmation;
            commands::cleanup::run(&config, !execute, &mut confirm).await
        }
    }
}
