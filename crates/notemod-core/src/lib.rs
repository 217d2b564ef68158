pub mod command;
pub mod config;
pub mod conjugation;
pub mod error;
pub mod fields;
pub mod gender;
pub mod image;
pub mod note;

pub use command::{parse_commands, ModificationCommand};
pub use error::{NotemodError, Result};
pub use note::{Note, NoteTags};
