//! PermitLeads CLI - Calgary building permits, cached and queryable

use clap::Parser;

use permitleads::cli::{
    self, AnalyticsCommands, CacheCommands, Cli, Commands, GlobalOptions, PermitCommands,
};
use permitleads::error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Default level is `warn`; `--debug` raises it, `RUST_LOG` overrides both.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Permits(cmd) => match cmd {
            PermitCommands::List {
                filters,
                pagination,
            } => cli::permits::list(&opts, &filters, &pagination).await,
            PermitCommands::Get { permit_num } => cli::permits::get(&opts, &permit_num).await,
            PermitCommands::Summary { filters } => cli::permits::summary(&opts, &filters).await,
        },
        Commands::Analytics(cmd) => match cmd {
            AnalyticsCommands::Communities => cli::analytics::communities(&opts).await,
            AnalyticsCommands::Contractors => cli::analytics::contractors(&opts).await,
        },
        Commands::Cache(CacheCommands::Refresh) => cli::cache::refresh(&opts).await,
        Commands::Health => cli::health::run(&opts).await,
        Commands::Version => {
            println!("permitleads version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
