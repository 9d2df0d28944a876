use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_LOG_LEVEL;
use crate::models::RecordKind;

pub mod console;
pub mod display;
pub mod list;
pub mod menu;
pub mod search;

pub use list::run_list;
pub use menu::run_menu;
pub use search::run_search;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Personal contact and agenda manager")]
#[command(version)]
pub struct Cli {
    /// Database file (default: <data dir>/agenda/agenda.db)
    #[arg(long, env = "AGENDA_DB", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,
    /// Reject unknown category/contact ids and block deleting referenced rows
    #[arg(long, env = "AGENDA_ENFORCE_FK", global = true)]
    pub enforce_foreign_keys: bool,
    /// off, error, warn, info, debug or trace
    #[arg(long, env = "AGENDA_LOG", default_value = DEFAULT_LOG_LEVEL, global = true)]
    pub log_level: String,
    /// Directory for log files (default: <data dir>/agenda/logs)
    #[arg(long, env = "AGENDA_LOG_DIR", value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all records of one type, newest first
    List(ListArgs),
    /// Search contacts by name, phone or email
    Search(SearchArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub kind: RecordKind,
    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text contained in the name, phone or email
    pub query: String,
    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}
