//! Recommendation notes pinned on the admin panel.
//!
//! Notes only live for the session. One input box serves both adding and
//! editing: [`NotesBoard::edit`] loads a note into it and the next
//! [`NotesBoard::submit`] replaces that note's text.

use motoshop_core::NoteId;
use serde::Serialize;

use crate::order::fresh_id;

/// A recommendation note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(rename = "texto")]
    pub text: String,
}

#[derive(Debug, Default)]
pub struct NotesBoard {
    notes: Vec<Note>,
    input: String,
    editing: Option<NoteId>,
}

impl NotesBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Current input text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Note being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<&NoteId> {
        self.editing.as_ref()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Add the input as a new note, or save it over the note being edited.
    ///
    /// Blank input is ignored. Returns whether anything changed.
    pub fn submit(&mut self) -> bool {
        if self.input.trim().is_empty() {
            return false;
        }
        let text = std::mem::take(&mut self.input);
        match self.editing.take() {
            Some(id) => {
                if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
                    note.text = text;
                }
            }
            None => {
                let id = fresh_id(self.notes.iter().map(|n| n.id.as_str()));
                self.notes.push(Note {
                    id: NoteId::new(id),
                    text,
                });
            }
        }
        true
    }

    /// Load a note into the input for editing. Returns `false` if it does
    /// not exist.
    pub fn edit(&mut self, id: &NoteId) -> bool {
        let Some(note) = self.notes.iter().find(|n| &n.id == id) else {
            return false;
        };
        self.input.clone_from(&note.text);
        self.editing = Some(id.clone());
        true
    }

    /// Leave edit mode and clear the input.
    pub fn cancel(&mut self) {
        self.editing = None;
        self.input.clear();
    }

    pub fn delete(&mut self, id: &NoteId) {
        self.notes.retain(|n| &n.id != id);
        if self.editing.as_ref() == Some(id) {
            self.cancel();
        }
    }
}
