// Hooks staged between their start and end events
//
// A hook is only reported once it ends, since its final status (or whether
// it ran at all) is unknown at start.

use crate::model::StartItemPayload;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PendingHooks {
    staged: HashMap<String, StartItemPayload>,
}

impl PendingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, local_id: impl Into<String>, payload: StartItemPayload) {
        self.staged.insert(local_id.into(), payload);
    }

    /// Remove and return the staged payload
    pub fn take(&mut self, local_id: &str) -> Option<StartItemPayload> {
        self.staged.remove(local_id)
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemType;

    fn payload(name: &str) -> StartItemPayload {
        StartItemPayload {
            name: name.to_string(),
            item_type: ItemType::BeforeMethod,
            start_time: 10,
            code_ref: None,
            attributes: Vec::new(),
            description: None,
        }
    }

    #[test]
    fn test_take_removes_entry() {
        let mut hooks = PendingHooks::new();
        hooks.stage("h1", payload("before each"));

        assert_eq!(hooks.take("h1").map(|p| p.name), Some("before each".to_string()));
        assert!(hooks.take("h1").is_none());
        assert!(hooks.is_empty());
    }

    #[test]
    fn test_take_unknown_is_none() {
        let mut hooks = PendingHooks::new();
        assert!(hooks.take("never-staged").is_none());
    }
}
