//! Editier-Kontext: Selektion, Session und Undo-History.

pub mod history;
pub mod selection;
pub mod session;

pub use history::{EditCommand, EditHistory};
pub use selection::SelectionState;
pub use session::EditSession;
