//! Keyboard and pointer highlight state for the result dropdown.

/// Navigation keys the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The highlight moved (or stayed put at an edge).
    Moved(Option<usize>),
    /// Commit the result at this index.
    Commit(usize),
    /// Close the dropdown.
    Dismiss,
    /// Nothing to do.
    Ignored,
}

/// Tracks which result, if any, is highlighted.
///
/// The highlight is only ever `None` or an index below the list length the
/// caller passes in. Movement clamps at both ends; there is no wrap-around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionController {
    highlighted: Option<usize>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Apply a key press against a list of `len` results.
    pub fn handle_key(&mut self, key: NavKey, len: usize) -> KeyOutcome {
        match key {
            NavKey::Escape => KeyOutcome::Dismiss,
            _ if len == 0 => {
                self.highlighted = None;
                KeyOutcome::Ignored
            }
            NavKey::Down => {
                self.highlighted = Some(match self.highlighted {
                    None => 0,
                    Some(i) => (i + 1).min(len - 1),
                });
                KeyOutcome::Moved(self.highlighted)
            }
            NavKey::Up => {
                self.highlighted = Some(match self.highlighted {
                    None => 0,
                    Some(i) => i.saturating_sub(1).min(len - 1),
                });
                KeyOutcome::Moved(self.highlighted)
            }
            NavKey::Enter => match self.highlighted {
                Some(i) if i < len => KeyOutcome::Commit(i),
                _ => KeyOutcome::Ignored,
            },
        }
    }

    /// Highlight the entry under the pointer. Out-of-range indices are ignored.
    pub fn hover(&mut self, index: usize, len: usize) {
        if index < len {
            self.highlighted = Some(index);
        }
    }

    pub fn reset(&mut self) {
        self.highlighted = None;
    }
}
