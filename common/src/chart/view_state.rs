use std::collections::BTreeMap;
use uuid::Uuid;

/// Whether a refetched department list keeps or discards existing toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebuildPolicy {
    /// Every department starts expanded again.
    #[default]
    Reset,
    /// Departments still present keep their toggle; new ids start expanded.
    Preserve,
}

/// Expand/collapse state for one chart view: a global toggle over the whole
/// department layer plus an independent per-department toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    collapsed: bool,
    departments: BTreeMap<Uuid, bool>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the per-department map from a freshly fetched id list.
    pub fn rebuild(&mut self, dept_ids: &[Uuid], policy: RebuildPolicy) {
        let previous = std::mem::take(&mut self.departments);
        for id in dept_ids {
            let collapsed = match policy {
                RebuildPolicy::Reset => false,
                RebuildPolicy::Preserve => previous.get(id).copied().unwrap_or(false),
            };
            self.departments.insert(*id, collapsed);
        }
    }

    pub fn toggle_all(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Flips one department's toggle. Unknown ids are ignored.
    pub fn toggle_department(&mut self, dept_id: Uuid) {
        if let Some(entry) = self.departments.get_mut(&dept_id) {
            *entry = !*entry;
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_department_collapsed(&self, dept_id: Uuid) -> bool {
        self.departments.get(&dept_id).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn toggles_are_independent() {
        let mut state = CollapseState::new();
        state.rebuild(&[id(1), id(2)], RebuildPolicy::Reset);

        state.toggle_department(id(1));
        assert!(state.is_department_collapsed(id(1)));
        assert!(!state.is_department_collapsed(id(2)));
        assert!(!state.is_collapsed());

        state.toggle_all();
        assert!(state.is_collapsed());
        assert!(state.is_department_collapsed(id(1)));
    }

    #[test]
    fn reset_discards_previous_toggles() {
        let mut state = CollapseState::new();
        state.rebuild(&[id(1)], RebuildPolicy::Reset);
        state.toggle_department(id(1));

        state.rebuild(&[id(1), id(2)], RebuildPolicy::Reset);
        assert!(!state.is_department_collapsed(id(1)));
        assert!(!state.is_department_collapsed(id(2)));
    }

    #[test]
    fn preserve_keeps_surviving_toggles_only() {
        let mut state = CollapseState::new();
        state.rebuild(&[id(1), id(3)], RebuildPolicy::Reset);
        state.toggle_department(id(1));
        state.toggle_department(id(3));

        state.rebuild(&[id(1), id(2)], RebuildPolicy::Preserve);
        assert!(state.is_department_collapsed(id(1)));
        assert!(!state.is_department_collapsed(id(2)));
        assert!(!state.is_department_collapsed(id(3)));
    }

    #[test]
    fn unknown_department_toggle_is_a_no_op() {
        let mut state = CollapseState::new();
        state.rebuild(&[id(1)], RebuildPolicy::Reset);
        state.toggle_department(id(9));
        assert!(!state.is_department_collapsed(id(9)));
    }
}
