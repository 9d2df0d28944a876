//! Interactive two-level menu: pick a record type, then an operation.

use anyhow::Result;
use log::{info, warn};
use std::io::{self, IsTerminal};

use crate::cli::console::{Console, LineConsole, TerminalConsole};
use crate::cli::list::list_lines;
use crate::cli::search::search_lines;
use crate::db::{Change, Database};
use crate::error::AgendaError;
use crate::models::{ContactFields, EventFields, NoteFields, RecordKind};

const OPTION_PROMPT: &str = "option: ";
const ID_PROMPT: &str = "id: ";
const SEARCH_PROMPT: &str = "search: ";
const INVALID_OPTION: &str = "Invalid option.";
const EXIT_KEY: &str = "5";

const CONTACT_FORM: &[&str] = &["name: ", "phone: ", "email: ", "category id: "];
const CATEGORY_FORM: &[&str] = &["name: "];
const EVENT_FORM: &[&str] = &[
    "contact id: ",
    "category id: ",
    "date (YYYY-MM-DD): ",
    "description: ",
];
const NOTE_FORM: &[&str] = &["title: ", "content: "];

/// Main menu choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Open(RecordKind),
    Exit,
}

impl MainChoice {
    fn parse(input: &str) -> Option<MainChoice> {
        if let Some(kind) = RecordKind::from_key(input) {
            return Some(MainChoice::Open(kind));
        }
        (input.trim() == EXIT_KEY).then_some(MainChoice::Exit)
    }
}

/// Operations a submenu can run against a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Search,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Read => "Read",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
            Operation::Search => "Search",
        }
    }
}

/// Submenu choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubChoice {
    Run(Operation),
    Back,
}

impl SubChoice {
    const ALL: &'static [SubChoice] = &[
        SubChoice::Run(Operation::Create),
        SubChoice::Run(Operation::Read),
        SubChoice::Run(Operation::Update),
        SubChoice::Run(Operation::Delete),
        SubChoice::Run(Operation::Search),
        SubChoice::Back,
    ];

    fn key(self) -> &'static str {
        match self {
            SubChoice::Run(Operation::Create) => "1",
            SubChoice::Run(Operation::Read) => "2",
            SubChoice::Run(Operation::Update) => "3",
            SubChoice::Run(Operation::Delete) => "4",
            SubChoice::Run(Operation::Search) => "5",
            SubChoice::Back => "6",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SubChoice::Run(op) => op.label(),
            SubChoice::Back => "Back",
        }
    }

    fn offered_for(self, kind: RecordKind) -> bool {
        self != SubChoice::Run(Operation::Search) || kind.supports_search()
    }

    fn parse(input: &str, kind: RecordKind) -> Option<SubChoice> {
        let input = input.trim();
        SubChoice::ALL
            .iter()
            .find(|c| c.key() == input && c.offered_for(kind))
            .copied()
    }
}

/// Answers collected for one form, consumed in prompt order.
struct Answers(std::vec::IntoIter<String>);

impl Answers {
    fn take(&mut self) -> String {
        self.0.next().unwrap_or_default()
    }

    fn contact(&mut self) -> ContactFields {
        ContactFields {
            name: self.take(),
            phone: self.take(),
            email: self.take(),
            category_id: self.take(),
        }
    }

    fn event(&mut self) -> EventFields {
        EventFields {
            contact_id: self.take(),
            category_id: self.take(),
            date: self.take(),
            description: self.take(),
        }
    }

    fn note(&mut self) -> NoteFields {
        NoteFields {
            title: self.take(),
            content: self.take(),
        }
    }
}

fn form(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::Contacts => CONTACT_FORM,
        RecordKind::Categories => CATEGORY_FORM,
        RecordKind::Events => EVENT_FORM,
        RecordKind::Notes => NOTE_FORM,
    }
}

/// Prompt for every label in order. `None` if the user backs out midway.
fn ask_all<C: Console>(console: &mut C, labels: &[&str]) -> Result<Option<Answers>> {
    let mut values = Vec::with_capacity(labels.len());
    for label in labels {
        match console.prompt(label)? {
            Some(value) => values.push(value),
            None => return Ok(None),
        }
    }
    Ok(Some(Answers(values.into_iter())))
}

/// The menu controller. Owns the connection for the whole session.
pub struct Menu<C: Console> {
    db: Database,
    console: C,
}

impl<C: Console> Menu<C> {
    pub fn new(db: Database, console: C) -> Self {
        Self { db, console }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Run until the user exits or input ends, then close the connection.
    pub fn run(&mut self) -> Result<()> {
        info!("event=menu_start module=menu status=ok");
        let mut redraw = true;

        loop {
            if redraw {
                self.console.clear();
                redraw = false;
            }
            self.show_main();

            let Some(input) = self.console.prompt(OPTION_PROMPT)? else {
                break;
            };

            match MainChoice::parse(&input) {
                Some(MainChoice::Open(kind)) => {
                    self.run_submenu(kind)?;
                    redraw = true;
                }
                Some(MainChoice::Exit) => break,
                None => self.console.say(INVALID_OPTION),
            }
        }

        self.db.close()?;
        info!("event=menu_exit module=menu status=ok");
        self.console.say("Bye.");
        Ok(())
    }

    fn show_main(&mut self) {
        self.console.say("");
        self.console.say("agenda");
        for kind in RecordKind::ALL {
            self.console.say(&format!("{}. {}", kind.key(), kind.label()));
        }
        self.console.say(&format!("{}. Exit", EXIT_KEY));
    }

    fn show_submenu(&mut self, kind: RecordKind) {
        self.console.say("");
        self.console.say(kind.label());
        for choice in SubChoice::ALL.iter().filter(|c| c.offered_for(kind)) {
            self.console
                .say(&format!("{}. {}", choice.key(), choice.label()));
        }
    }

    fn run_submenu(&mut self, kind: RecordKind) -> Result<()> {
        loop {
            self.show_submenu(kind);

            let Some(input) = self.console.prompt(OPTION_PROMPT)? else {
                return Ok(());
            };
            let op = match SubChoice::parse(&input, kind) {
                Some(SubChoice::Run(op)) => op,
                Some(SubChoice::Back) => return Ok(()),
                None => {
                    self.console.say(INVALID_OPTION);
                    continue;
                }
            };

            // Query errors are reported and the submenu stays open
            if let Err(err) = self.dispatch(kind, op) {
                let recoverable = err
                    .downcast_ref::<AgendaError>()
                    .is_some_and(AgendaError::is_recoverable);
                if !recoverable {
                    return Err(err);
                }
                warn!(
                    "event=menu_action module=menu status=error kind={} action={} error={}",
                    kind.singular(),
                    op.label(),
                    err
                );
                self.console.say(&format!("Error: {}", err));
            }
        }
    }

    fn dispatch(&mut self, kind: RecordKind, op: Operation) -> Result<()> {
        match op {
            Operation::Create => self.create(kind),
            Operation::Read => {
                for line in list_lines(&self.db, kind, false)? {
                    self.console.say(&line);
                }
                Ok(())
            }
            Operation::Update => self.update(kind),
            Operation::Delete => self.delete(kind),
            Operation::Search => self.search(),
        }
    }

    fn create(&mut self, kind: RecordKind) -> Result<()> {
        let Some(mut answers) = ask_all(&mut self.console, form(kind))? else {
            self.console.say("Cancelled.");
            return Ok(());
        };

        let db = &self.db;
        let message = match kind {
            RecordKind::Contacts => {
                let fields = answers.contact();
                db.contacts().create(&fields)?;
                format!("Created contact '{}'.", fields.name)
            }
            RecordKind::Categories => {
                let name = answers.take();
                db.categories().create(&name)?;
                format!("Created category '{}'.", name)
            }
            RecordKind::Events => {
                db.events().create(&answers.event())?;
                "Created event.".to_string()
            }
            RecordKind::Notes => {
                let fields = answers.note();
                db.notes().create(&fields)?;
                format!("Created note '{}'.", fields.title)
            }
        };
        self.console.say(&message);
        Ok(())
    }

    fn update(&mut self, kind: RecordKind) -> Result<()> {
        let Some(id) = self.console.prompt(ID_PROMPT)? else {
            self.console.say("Cancelled.");
            return Ok(());
        };
        let Some(mut answers) = ask_all(&mut self.console, form(kind))? else {
            self.console.say("Cancelled.");
            return Ok(());
        };

        let db = &self.db;
        let change = match kind {
            RecordKind::Contacts => db.contacts().update(&id, &answers.contact())?,
            RecordKind::Categories => db.categories().update(&id, &answers.take())?,
            RecordKind::Events => db.events().update(&id, &answers.event())?,
            RecordKind::Notes => db.notes().update(&id, &answers.note())?,
        };
        self.report(kind, &id, change, "Updated");
        Ok(())
    }

    fn delete(&mut self, kind: RecordKind) -> Result<()> {
        let Some(id) = self.console.prompt(ID_PROMPT)? else {
            self.console.say("Cancelled.");
            return Ok(());
        };

        let db = &self.db;
        let change = match kind {
            RecordKind::Contacts => db.contacts().delete(&id)?,
            RecordKind::Categories => db.categories().delete(&id)?,
            RecordKind::Events => db.events().delete(&id)?,
            RecordKind::Notes => db.notes().delete(&id)?,
        };
        self.report(kind, &id, change, "Deleted");
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let Some(criterion) = self.console.prompt(SEARCH_PROMPT)? else {
            self.console.say("Cancelled.");
            return Ok(());
        };
        for line in search_lines(&self.db, &criterion, false)? {
            self.console.say(&line);
        }
        Ok(())
    }

    fn report(&mut self, kind: RecordKind, id: &str, change: Change, verb: &str) {
        let message = match change {
            Change::Applied => format!("{} {} {}.", verb, kind.singular(), id.trim()),
            Change::NoMatch => format!("No {} with ID {}.", kind.singular(), id.trim()),
        };
        self.console.say(&message);
    }
}

/// Run the interactive menu on the terminal, or on plain stdin/stdout when piped.
pub fn run_menu(db: Database) -> Result<()> {
    if io::stdin().is_terminal() {
        Menu::new(db, TerminalConsole::new()).run()
    } else {
        Menu::new(db, LineConsole::stdio()).run()
    }
}
