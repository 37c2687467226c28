//! Cursor and tab state machines.
//!
//! Both are flat cyclic counters. Wraparound is computed with add-then-mod on
//! unsigned values, so stepping back from index 0 lands on the last entry.

use crate::error::DisplayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
}

/// Highlighted row within the list the active page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    index: Option<usize>,
    list_length: usize,
}

impl SelectionCursor {
    pub fn new(list_length: usize) -> Self {
        Self {
            index: (list_length > 0).then_some(0),
            list_length,
        }
    }

    /// `None` while the bound list is empty.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn list_length(&self) -> usize {
        self.list_length
    }

    pub fn is_active(&self) -> bool {
        self.index.is_some()
    }
}

#[derive(Debug, Default)]
pub struct SelectionController {
    cursor: SelectionCursor,
}

impl SelectionController {
    pub fn new(list_length: usize) -> Self {
        Self {
            cursor: SelectionCursor::new(list_length),
        }
    }

    pub fn cursor(&self) -> SelectionCursor {
        self.cursor
    }

    pub fn index(&self) -> Option<usize> {
        self.cursor.index
    }

    /// Rebind to a different list; the cursor restarts at the top.
    pub fn on_list_changed(&mut self, new_length: usize) {
        self.cursor = SelectionCursor::new(new_length);
    }

    pub fn on_navigate(&mut self, direction: NavDirection) {
        let len = self.cursor.list_length;
        let Some(index) = self.cursor.index else {
            return;
        };
        let next = match direction {
            NavDirection::Up => (index + len - 1) % len,
            NavDirection::Down => (index + 1) % len,
        };
        self.cursor.index = Some(next);
    }

    /// Move the highlight without committing. Returns whether `index` was in range.
    pub fn on_hover(&mut self, index: usize) -> bool {
        if index >= self.cursor.list_length {
            return false;
        }
        self.cursor.index = Some(index);
        true
    }

    /// Index of the entry to commit.
    pub fn on_commit(&self) -> Result<usize, DisplayError> {
        self.cursor.index.ok_or(DisplayError::NoDisplaySelected)
    }
}

/// Which page of the launcher is showing.
#[derive(Debug)]
pub struct TabController {
    active_index: usize,
    tab_count: usize,
}

impl TabController {
    /// `tab_count` must be non-zero.
    pub fn new(tab_count: usize) -> Self {
        Self {
            active_index: 0,
            tab_count: tab_count.max(1),
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn tab_count(&self) -> usize {
        self.tab_count
    }

    pub fn on_next(&mut self) {
        self.active_index = (self.active_index + 1) % self.tab_count;
    }

    pub fn on_prev(&mut self) {
        self.active_index = (self.active_index + self.tab_count - 1) % self.tab_count;
    }

    /// Jump to `index`. Returns whether it was a valid tab.
    pub fn on_select(&mut self, index: usize) -> bool {
        if index >= self.tab_count {
            return false;
        }
        self.active_index = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_from_top_wraps_to_bottom() {
        let mut selection = SelectionController::new(3);
        selection.on_navigate(NavDirection::Up);
        assert_eq!(selection.index(), Some(2));
    }

    #[test]
    fn down_from_bottom_wraps_to_top() {
        let mut selection = SelectionController::new(3);
        assert!(selection.on_hover(2));
        selection.on_navigate(NavDirection::Down);
        assert_eq!(selection.index(), Some(0));
    }

    #[test]
    fn single_entry_list_stays_put() {
        let mut selection = SelectionController::new(1);
        selection.on_navigate(NavDirection::Up);
        assert_eq!(selection.index(), Some(0));
        selection.on_navigate(NavDirection::Down);
        assert_eq!(selection.index(), Some(0));
    }

    #[test]
    fn navigation_on_empty_list_is_noop() {
        let mut selection = SelectionController::new(0);
        selection.on_navigate(NavDirection::Up);
        selection.on_navigate(NavDirection::Down);
        assert!(!selection.cursor().is_active());
        assert_eq!(selection.index(), None);
    }

    #[test]
    fn commit_on_empty_list_is_refused() {
        let selection = SelectionController::new(0);
        assert_eq!(selection.on_commit(), Err(DisplayError::NoDisplaySelected));
    }

    #[test]
    fn hover_out_of_range_is_ignored() {
        let mut selection = SelectionController::new(3);
        selection.on_navigate(NavDirection::Down);
        assert!(!selection.on_hover(3));
        assert_eq!(selection.index(), Some(1));
    }

    #[test]
    fn list_change_resets_cursor() {
        let mut selection = SelectionController::new(5);
        selection.on_hover(4);
        selection.on_list_changed(2);
        assert_eq!(selection.cursor(), SelectionCursor::new(2));
        assert_eq!(selection.index(), Some(0));

        selection.on_list_changed(0);
        assert_eq!(selection.index(), None);
    }

    #[test]
    fn tabs_cycle_both_ways() {
        let mut tabs = TabController::new(5);
        tabs.on_prev();
        assert_eq!(tabs.active_index(), 4);
        tabs.on_next();
        assert_eq!(tabs.active_index(), 0);
        tabs.on_next();
        tabs.on_next();
        assert_eq!(tabs.active_index(), 2);
    }

    #[test]
    fn select_tab_checks_range() {
        let mut tabs = TabController::new(5);
        assert!(tabs.on_select(3));
        assert_eq!(tabs.active_index(), 3);
        assert!(!tabs.on_select(5));
        assert_eq!(tabs.active_index(), 3);
    }
}
