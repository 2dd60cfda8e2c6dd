use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tyne_core::{
    config::Settings,
    logger::{init_logger, init_tracing},
};
use tyne_storage::db::init_database;

mod handlers;

use handlers::{CommandHandler, WriteAdapter};

/// Options configurable via the CLI.
#[derive(Debug, Parser)]
#[command(name = "tyne", version = env!("CARGO_PKG_VERSION"), about)]
struct Flags {
    /// config file path
    #[clap(long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// catalogue database path, overrides the one in the config file
    #[clap(long, value_hint = clap::ValueHint::DirPath)]
    catalog: Option<PathBuf>,
    /// log level
    #[clap(long)]
    log_level: Option<log::LevelFilter>,
    /// subcommand to run
    #[clap(subcommand)]
    subcommand: Option<handlers::Command>,
}

#[test]
fn verify_cli() {
    Flags::command().debug_assert();
}

#[cfg(not(tarpaulin_include))]
fn main() -> anyhow::Result<()> {
    let flags = Flags::parse();

    let config = match flags.config {
        Some(config) => config,
        None => Settings::get_config_path()?,
    };
    let settings = Settings::init(config, flags.catalog, flags.log_level)?;

    init_logger(settings.log_level);
    tracing::subscriber::set_global_default(init_tracing())?;

    let Some(command) = flags.subcommand else {
        eprintln!("No subcommand provided");
        return Ok(());
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        if let Some(parent) = settings.catalog.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = init_database(settings.catalog.path.clone()).await?;

        let mut stdout_adapter = WriteAdapter(std::io::stdout());
        let mut stderr_adapter = WriteAdapter(std::io::stderr());

        command
            .handle(&db, &settings, &mut stdout_adapter, &mut stderr_adapter)
            .await
    })
}
