//! The set of controls built for one settings page.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::control::Control;
use crate::registrar::SettingsRegistrar;

/// Controls keyed by id, in declaration order.
///
/// Grouping links between controls are ids into the same set.
#[derive(Debug, Clone, Default)]
pub struct ControlSet {
    controls: Vec<Control>,
    index: HashMap<String, usize>,
}

impl ControlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a control, returning the previous control with the same id.
    ///
    /// A replaced control keeps its position; grouping links that pointed
    /// at it are not updated.
    pub fn insert(&mut self, control: Control) -> Option<Control> {
        match self.index.get(control.id()) {
            Some(&position) => Some(std::mem::replace(&mut self.controls[position], control)),
            None => {
                self.index.insert(control.id().to_string(), self.controls.len());
                self.controls.push(control);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Control> {
        self.index.get(id).map(|&position| &self.controls[position])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.index
            .get(id)
            .map(|&position| &mut self.controls[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Control> {
        self.controls.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(Control::id)
    }

    /// Controls not grouped with another control, in declaration order.
    pub fn top_level(&self) -> impl Iterator<Item = &Control> {
        self.controls
            .iter()
            .filter(|control| control.grouped_with().is_none())
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Groups `child_id` with `parent_id`.
    ///
    /// A child already grouped with a different parent is moved. Returns
    /// false when either id is unknown or both ids are the same.
    pub fn group(&mut self, parent_id: &str, child_id: &str) -> bool {
        if parent_id == child_id {
            return false;
        }
        let (Some(&parent), Some(&child)) = (self.index.get(parent_id), self.index.get(child_id))
        else {
            warn!(parent = parent_id, child = child_id, "cannot group unknown controls");
            return false;
        };

        if let Some(previous) = self.controls[child].grouped_with().map(str::to_owned)
            && previous != parent_id
        {
            warn!(
                child = child_id,
                from = %previous,
                to = parent_id,
                "moving grouped control to another group"
            );
            if let Some(&old_parent) = self.index.get(&previous) {
                self.controls[old_parent].remove_grouped_control(child_id);
            }
        }

        let (parent, child) = pair_mut(&mut self.controls, parent, child);
        parent.add_grouped_control(child);
        debug!(parent = parent_id, child = child_id, "grouped controls");
        true
    }

    /// Renders the control with the given id, including its grouped
    /// children.
    pub fn render_control(&self, id: &str) -> Option<String> {
        self.get(id).map(|control| control.render_to_string(self))
    }

    /// Registers every control. Grouped children skip themselves.
    pub fn register_all(&self, option_group: &str, registrar: &mut dyn SettingsRegistrar) {
        for control in &self.controls {
            control.register(option_group, registrar);
        }
    }

    /// Sanitizes a posted value for the control with the given id.
    pub fn sanitize(&self, id: &str, value: Value) -> Option<Value> {
        self.get(id).map(|control| control.sanitize(value))
    }
}

impl<'a> IntoIterator for &'a ControlSet {
    type Item = &'a Control;
    type IntoIter = std::slice::Iter<'a, Control>;

    fn into_iter(self) -> Self::IntoIter {
        self.controls.iter()
    }
}

fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> (&mut T, &mut T) {
    if first < second {
        let (head, tail) = items.split_at_mut(second);
        (&mut head[first], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(first);
        (&mut tail[0], &mut head[second])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::controls::TextInput;
    use crate::options::MemoryOptions;
    use crate::registry::ControlType;
    use serde_json::json;
    use settings_ui_model::ControlArgs;

    fn set_of(ids: &[&str]) -> ControlSet {
        let options = Arc::new(MemoryOptions::new(""));
        let mut set = ControlSet::new();
        for id in ids {
            let args = ControlArgs::from_value(id, json!({"tab_id": "t", "default": ""})).unwrap();
            set.insert(TextInput.create(options.clone(), "", id, args).unwrap());
        }
        set
    }

    #[test]
    fn keeps_declaration_order() {
        let set = set_of(&["c", "a", "b"]);
        assert_eq!(set.ids().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert!(set.contains("a"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn groups_in_both_directions_of_the_vec() {
        let mut set = set_of(&["a", "b", "c"]);
        assert!(set.group("c", "a"));
        assert!(set.group("a", "b"));
        assert_eq!(set.get("c").unwrap().grouped_controls(), ["a".to_string()]);
        assert_eq!(set.get("a").unwrap().grouped_with(), Some("c"));
        assert_eq!(set.get("b").unwrap().grouped_with(), Some("a"));
        assert_eq!(
            set.top_level().map(Control::id).collect::<Vec<_>>(),
            vec!["c"]
        );
    }

    #[test]
    fn moving_a_child_detaches_it_from_the_old_parent() {
        let mut set = set_of(&["a", "b", "c"]);
        assert!(set.group("a", "c"));
        assert!(set.group("b", "c"));
        assert!(set.get("a").unwrap().grouped_controls().is_empty());
        assert_eq!(set.get("b").unwrap().grouped_controls(), ["c".to_string()]);
        assert_eq!(set.get("c").unwrap().grouped_with(), Some("b"));
    }

    #[test]
    fn rejects_self_and_unknown_groups() {
        let mut set = set_of(&["a"]);
        assert!(!set.group("a", "a"));
        assert!(!set.group("missing", "a"));
        assert!(set.get("a").unwrap().grouped_with().is_none());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut set = set_of(&["a", "b"]);
        let replacement = set.get("a").unwrap().clone();
        assert!(set.insert(replacement).is_some());
        assert_eq!(set.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
