//! Unicycle lifecycle: add, edit, remove, view, list, and autocomplete.

pub mod filter;
pub mod service;

pub use filter::{ListFilter, ListResult, MAX_CHOICES, MAX_LABEL_CHARS, Suggestion};
pub use service::{EditOutcome, MAX_DESCRIPTION_CHARS, MAX_NAME_CHARS, UnicycleEdit, UnicycleService};
