use anyhow::Result;

use crate::cli::display::to_lines;
use crate::db::Database;

/// Contacts whose name, phone or email contains `query`, as printable lines.
pub fn search_lines(db: &Database, query: &str, json: bool) -> Result<Vec<String>> {
    let results = db.contacts().search(query)?;
    to_lines("Results", "No matches.", &results, json)
}

/// Execute the search command
pub fn run_search(db: &Database, query: &str, json: bool) -> Result<()> {
    for line in search_lines(db, query, json)? {
        println!("{}", line);
    }
    Ok(())
}
