//! Single-shot completion channel between the entry screen and the list.
//!
//! # Invariants
//! - An entry screen reports at most one outcome.
//! - A screen dropped without saving is observed as `Cancelled`.
//! - `Saved` never carries a blank title.

use crate::model::task::is_blank_title;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

/// Result reported by the entry screen to whichever screen opened it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// User confirmed a new task title (already trimmed).
    Saved(String),
    /// User dismissed the screen without saving.
    Cancelled,
}

/// Error returned when the entry screen cannot report its text.
#[derive(Debug)]
pub enum EntryError {
    /// Text was blank; the screen is handed back so the user can retry.
    EmptyTitle(EntryScreen),
}

impl Display for EntryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle(_) => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for EntryError {}

/// State of an open entry screen: the text being typed plus its return path.
#[derive(Debug)]
pub struct EntryScreen {
    text: String,
    reply: Sender<EntryOutcome>,
}

/// List-side end of the entry channel.
#[derive(Debug)]
pub struct EntryReceiver {
    outcome: Receiver<EntryOutcome>,
}

/// Opens a new entry screen paired with the receiver its opener keeps.
pub fn entry_channel() -> (EntryScreen, EntryReceiver) {
    let (reply, outcome) = bounded(1);
    (
        EntryScreen {
            text: String::new(),
            reply,
        },
        EntryReceiver { outcome },
    )
}

impl EntryScreen {
    /// Replaces the text field contents.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Reports the typed title and closes the screen.
    ///
    /// # Errors
    /// - `EntryError::EmptyTitle` when the text is blank; nothing is sent.
    pub fn save(self) -> Result<(), EntryError> {
        if is_blank_title(&self.text) {
            return Err(EntryError::EmptyTitle(self));
        }
        let title = self.text.trim().to_string();
        self.send(EntryOutcome::Saved(title));
        Ok(())
    }

    /// Closes the screen without creating a task.
    pub fn cancel(self) {
        self.send(EntryOutcome::Cancelled);
    }

    fn send(self, outcome: EntryOutcome) {
        if self.reply.send(outcome).is_err() {
            debug!("event=entry_reply module=entry status=dropped reason=receiver_closed");
        }
    }
}

impl EntryReceiver {
    /// Returns the outcome if the screen has closed, `None` while it is open.
    pub fn try_outcome(&self) -> Option<EntryOutcome> {
        match self.outcome.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(EntryOutcome::Cancelled),
        }
    }

    /// Blocks until the screen closes.
    pub fn wait(self) -> EntryOutcome {
        self.outcome.recv().unwrap_or(EntryOutcome::Cancelled)
    }
}
