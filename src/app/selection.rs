//! Selektionszustand über Scene-Graph-Nodes.

use indexmap::IndexSet;

use crate::scene_graph::NodeId;

/// Aktuell selektierte Nodes in deterministischer Einfüge-Reihenfolge.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: IndexSet<NodeId>,
}

impl SelectionState {
    /// Leere Selektion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selektiert einen Node zusätzlich.
    pub fn select(&mut self, id: NodeId) {
        self.selected.insert(id);
    }

    /// Ersetzt die Selektion durch einen einzelnen Node.
    pub fn select_single(&mut self, id: NodeId) {
        self.selected.clear();
        self.selected.insert(id);
    }

    /// Entfernt einen Node aus der Selektion.
    pub fn deselect(&mut self, id: NodeId) {
        self.selected.shift_remove(&id);
    }

    /// Leert die Selektion vollständig.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Ist der Node selektiert?
    pub fn contains(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    /// Anzahl selektierter Nodes.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Ist die Selektion leer?
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Der einzige selektierte Node, falls genau einer selektiert ist.
    pub fn single_selected(&self) -> Option<NodeId> {
        if self.selected.len() == 1 {
            self.selected.first().copied()
        } else {
            None
        }
    }

    /// Iteriert in Selektionsreihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.selected.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::point_node_id;

    #[test]
    fn single_selected_requires_exactly_one() {
        let mut selection = SelectionState::new();
        assert!(selection.single_selected().is_none());

        selection.select(point_node_id(1, 0));
        assert_eq!(selection.single_selected(), Some(point_node_id(1, 0)));

        selection.select(point_node_id(1, 1));
        assert!(selection.single_selected().is_none());
    }

    #[test]
    fn order_is_insertion_order() {
        let mut selection = SelectionState::new();
        selection.select(point_node_id(1, 2));
        selection.select(point_node_id(1, 0));
        selection.select(point_node_id(2, 1));

        let order: Vec<NodeId> = selection.iter().collect();
        assert_eq!(
            order,
            vec![point_node_id(1, 2), point_node_id(1, 0), point_node_id(2, 1)]
        );
    }

    #[test]
    fn select_single_replaces_previous() {
        let mut selection = SelectionState::new();
        selection.select(point_node_id(1, 0));
        selection.select_single(point_node_id(1, 3));
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(point_node_id(1, 3)));
    }
}
