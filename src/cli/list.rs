use anyhow::Result;

use crate::cli::display::to_lines;
use crate::db::Database;
use crate::models::RecordKind;

/// Read every row of `kind`, newest first, as printable lines.
pub fn list_lines(db: &Database, kind: RecordKind, json: bool) -> Result<Vec<String>> {
    let heading = format!("{} (newest first)", kind.label());
    let empty = format!("No {}.", kind.label().to_lowercase());

    match kind {
        RecordKind::Contacts => to_lines(&heading, &empty, &db.contacts().read()?, json),
        RecordKind::Categories => to_lines(&heading, &empty, &db.categories().read()?, json),
        RecordKind::Events => to_lines(&heading, &empty, &db.events().read()?, json),
        RecordKind::Notes => to_lines(&heading, &empty, &db.notes().read()?, json),
    }
}

/// Execute the list command
pub fn run_list(db: &Database, kind: RecordKind, json: bool) -> Result<()> {
    for line in list_lines(db, kind, json)? {
        println!("{}", line);
    }
    Ok(())
}
