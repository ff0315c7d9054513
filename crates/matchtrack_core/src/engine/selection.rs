use std::collections::HashSet;

use crate::error::EngineError;

/// The up-to-N players currently credited with elapsed playing time.
///
/// Transient: never persisted, cleared on period switch. Selection only
/// gates future clock ticks; it has no effect on accumulated seconds.
#[derive(Debug, Clone)]
pub struct OnFieldSet {
    ids: HashSet<String>,
    cap: usize,
}

impl OnFieldSet {
    pub fn new(cap: usize) -> Self {
        Self { ids: HashSet::new(), cap }
    }

    /// Add a player. Re-selecting an on-field player is a quiet no-op;
    /// exceeding the cap is rejected so the caller can surface a warning.
    pub fn select(&mut self, player_id: &str) -> Result<(), EngineError> {
        if self.ids.contains(player_id) {
            return Ok(());
        }
        if self.ids.len() >= self.cap {
            return Err(EngineError::OnFieldLimitReached { cap: self.cap });
        }
        self.ids.insert(player_id.to_string());
        Ok(())
    }

    /// Remove a player. Always permitted; returns whether they were on.
    pub fn deselect(&mut self, player_id: &str) -> bool {
        self.ids.remove(player_id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.ids.contains(player_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.ids.iter()
    }

    /// Ids in a stable order for display.
    pub fn sorted_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_is_enforced() {
        let mut set = OnFieldSet::new(5);
        for i in 0..5 {
            set.select(&format!("p{i}")).unwrap();
        }
        let err = set.select("p5").unwrap_err();
        assert!(matches!(err, EngineError::OnFieldLimitReached { cap: 5 }));
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn reselect_is_quiet_noop() {
        let mut set = OnFieldSet::new(2);
        set.select("p1").unwrap();
        set.select("p2").unwrap();
        // Already on field, so the cap does not reject it.
        set.select("p1").unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn deselect_always_permitted() {
        let mut set = OnFieldSet::new(1);
        set.select("p1").unwrap();
        assert!(set.deselect("p1"));
        assert!(!set.deselect("p1"));
        assert!(set.is_empty());
    }
}
