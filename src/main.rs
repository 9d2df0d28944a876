use anyhow::Context;
use clap::Parser;
use agenda::cli::{run_list, run_menu, run_search, Cli, Commands};
use agenda::db::Database;
use agenda::logging::init_logging;
use agenda::AgendaConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AgendaConfig::resolve(
        cli.db,
        cli.enforce_foreign_keys,
        &cli.log_level,
        cli.log_dir,
    )?;
    let _logger = init_logging(&config.log_level, &config.log_dir)?;

    let mut db = Database::open(&config)
        .with_context(|| format!("Could not start agenda with {}", config.db_path.display()))?;

    match cli.command {
        None => {
            // No subcommand provided - show interactive menu
            run_menu(db)?;
        }
        Some(Commands::List(args)) => {
            run_list(&db, args.kind, args.json)?;
            db.close()?;
        }
        Some(Commands::Search(args)) => {
            run_search(&db, &args.query, args.json)?;
            db.close()?;
        }
    }

    Ok(())
}
