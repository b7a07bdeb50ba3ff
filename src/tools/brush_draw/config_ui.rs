//! Konfigurationspanel des Brush-Draw-Gizmos.

use super::state::{BrushDrawState, BrushShape};

/// Rendert die Brush-Einstellungen (Form, Zeichen-Modus, Subtraktions-Fix).
///
/// Gibt `true` zurück wenn sich Einstellungen geändert haben.
pub fn render_config(state: &mut BrushDrawState, ui: &mut egui::Ui) -> bool {
    let mut changed = false;

    ui.label("Form:");
    egui::ComboBox::from_id_salt("brush_shape")
        .selected_text(state.current_shape.label())
        .show_ui(ui, |ui| {
            for shape in BrushShape::ALL {
                if ui
                    .selectable_value(&mut state.current_shape, shape, shape.label())
                    .changed()
                {
                    changed = true;
                }
            }
        });

    ui.add_space(4.0);

    if ui
        .checkbox(&mut state.draw_from_center, "Vom Zentrum zeichnen")
        .on_hover_text("Brush vom Mittelpunkt statt von einer Ecke aufziehen.")
        .changed()
    {
        changed = true;
    }

    if ui
        .checkbox(&mut state.fix_subtractions, "Subtraktionen korrigieren")
        .on_hover_text(
            "Rückt die Startfläche leicht nach hinten, um Artefakte durch \
             deckungsgleiche Flächen zu vermeiden.",
        )
        .changed()
    {
        changed = true;
    }

    changed
}
