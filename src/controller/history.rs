use fxhash::FxHashMap;

/// Occurrence counts of [`Position::repetition_key`] values along the
/// current line of play. The controller pushes the key of every position
/// reached and pops it again on undo.
///
/// [`Position::repetition_key`]: crate::game::Position::repetition_key
#[derive(Clone, Debug, Default)]
pub struct PositionHistory {
    positions: FxHashMap<u64, u32>,
    history: Vec<u64>, // order of pushes, for undo
}

impl PositionHistory {
    pub fn new() -> Self {
        Self {
            positions: FxHashMap::default(),
            history: Vec::with_capacity(256),
        }
    }

    pub fn push(&mut self, key: u64) {
        self.history.push(key);
        *self.positions.entry(key).or_insert(0) += 1;
    }

    pub fn pop(&mut self) {
        if let Some(key) = self.history.pop() {
            if let Some(count) = self.positions.get_mut(&key) {
                if *count > 1 {
                    *count -= 1;
                } else {
                    self.positions.remove(&key);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.history.clear();
    }

    pub fn count(&self, key: u64) -> u32 {
        self.positions.get(&key).copied().unwrap_or(0)
    }

    /// Whether the position with `key` has been pushed at least three times.
    pub fn is_threefold_repetition(&self, key: u64) -> bool {
        self.count(key) >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop_counts() {
        let mut history = PositionHistory::new();

        history.push(1);
        history.push(2);
        history.push(1);
        history.push(1);
        assert!(history.is_threefold_repetition(1));
        assert!(!history.is_threefold_repetition(2));

        history.pop();
        assert_eq!(history.count(1), 2);
        assert!(!history.is_threefold_repetition(1));

        history.pop();
        history.pop();
        history.pop();
        history.pop();
        assert_eq!(history.count(1), 0);
    }
}
