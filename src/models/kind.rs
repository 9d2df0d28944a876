use clap::ValueEnum;

/// The four record types, in main-menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Contacts,
    Categories,
    Events,
    Notes,
}

impl RecordKind {
    pub const ALL: &'static [RecordKind] = &[
        RecordKind::Contacts,
        RecordKind::Categories,
        RecordKind::Events,
        RecordKind::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Contacts => "Contacts",
            RecordKind::Categories => "Categories",
            RecordKind::Events => "Events",
            RecordKind::Notes => "Notes",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            RecordKind::Contacts => "contact",
            RecordKind::Categories => "category",
            RecordKind::Events => "event",
            RecordKind::Notes => "note",
        }
    }

    /// Only contacts can be searched.
    pub const fn supports_search(self) -> bool {
        matches!(self, RecordKind::Contacts)
    }

    /// Menu key, starting at 1.
    pub fn key(self) -> usize {
        RecordKind::ALL
            .iter()
            .position(|k| *k == self)
            .map_or(0, |i| i + 1)
    }

    pub fn from_key(s: &str) -> Option<RecordKind> {
        let s = s.trim();
        RecordKind::ALL
            .iter()
            .find(|k| k.key().to_string() == s)
            .copied()
    }
}
