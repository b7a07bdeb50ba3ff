//! Editier-Session: expliziter Kontext der aktiven Spline-Bearbeitung.
//!
//! Ersetzt den globalen "currently edited spline"-Zeiger des Vorbilds durch
//! einen Zustand, der den Funktionen explizit übergeben wird.

use crate::core::ActorId;

/// Kontext der laufenden Editier-Operation.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    current_edit_spline: Option<ActorId>,
}

impl EditSession {
    /// Frische Session ohne aktive Bearbeitung.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merkt sich die zuletzt bearbeitete Spline (nach jeder Punkt-Mutation).
    pub fn mark_spline_edited(&mut self, spline_id: ActorId) {
        self.current_edit_spline = Some(spline_id);
    }

    /// Die aktuell bearbeitete Spline, falls vorhanden.
    pub fn current_edit_spline(&self) -> Option<ActorId> {
        self.current_edit_spline
    }

    /// Setzt die Session zurück (Werkzeug-Wechsel, Szene geschlossen).
    pub fn clear(&mut self) {
        self.current_edit_spline = None;
    }
}
