//! Linear snapshot history backing undo/redo.

use crate::scene::Scene;

/// A sequence of scene snapshots plus a cursor.
///
/// The snapshot at the cursor is the authoritative scene. `0 <= cursor < len`
/// always holds, so there is always at least one snapshot.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Scene>,
    cursor: usize,
    /// Maximum number of snapshots kept. `None` is unbounded.
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Scene::new())
    }
}

impl History {
    /// Create a history holding just `initial`.
    pub fn new(initial: Scene) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: None,
        }
    }

    /// Cap the number of snapshots. Values below 2 leave no room for undo and
    /// are raised to 2.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.map(|l| l.max(2));
        self.enforce_limit();
        self
    }

    /// Authoritative snapshot.
    pub fn current(&self) -> &Scene {
        &self.snapshots[self.cursor]
    }

    /// Record a new state: drop the redo tail, append, move the cursor to it.
    pub fn commit(&mut self, state: Scene) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(state);
        self.cursor = self.snapshots.len() - 1;
        self.enforce_limit();
        log::debug!("History commit ({} of {})", self.cursor + 1, self.snapshots.len());
    }

    /// Overwrite the snapshot at the cursor without creating an undo step.
    pub fn replace_current(&mut self, state: Scene) {
        self.snapshots[self.cursor] = state;
    }

    /// Step back. Returns false at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward. Returns false at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Discard everything and start over from `initial`.
    pub fn reset(&mut self, initial: Scene) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.snapshots.len() > limit {
            let excess = self.snapshots.len() - limit;
            self.snapshots.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
        }
    }
}
