//! Notes written by a property while it runs.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A single line recorded in a [`Journal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    /// A note about the value under test, shown with the counterexample.
    Annotation(String),
    /// A note shown after the counterexample.
    Footnote(String),
    /// The message of a panic raised by the property.
    Panic(String),
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalEntry::Annotation(text) => write!(f, "{text}"),
            JournalEntry::Footnote(text) => write!(f, "-- {text}"),
            JournalEntry::Panic(message) => write!(f, "panicked: {message}"),
        }
    }
}

/// A handle a property uses to record notes about one evaluation.
///
/// Every evaluation gets a fresh journal. Only the journal of the final
/// shrunk counterexample ends up in the report. Clones share entries.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Rc<RefCell<Vec<JournalEntry>>>,
}

impl Journal {
    pub fn new() -> Self {
        Journal::default()
    }

    /// Record a note about the value under test.
    pub fn annotate(&self, text: impl fmt::Display) {
        self.push(JournalEntry::Annotation(text.to_string()));
    }

    /// Record a note to show after the counterexample.
    pub fn footnote(&self, text: impl fmt::Display) {
        self.push(JournalEntry::Footnote(text.to_string()));
    }

    pub(crate) fn record_panic(&self, payload: &(dyn Any + Send)) {
        self.push(JournalEntry::Panic(panic_message(payload)));
    }

    fn push(&self, entry: JournalEntry) {
        self.entries.borrow_mut().push(entry);
    }

    /// A snapshot of the entries recorded so far.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }
    "non-string panic payload".to_owned()
}
