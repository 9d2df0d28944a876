mod category;
mod contact;
mod event;
mod kind;
mod note;

pub use category::Category;
pub use contact::{Contact, ContactFields};
pub use event::{Event, EventFields};
pub use kind::RecordKind;
pub use note::{Note, NoteFields};
