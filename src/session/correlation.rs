// Local event id -> backend temp id

use crate::model::TempId;
use std::collections::HashMap;

/// Maps engine-assigned ids to backend handles for the whole run.
///
/// Entries are never removed: children may look a parent up long after the
/// parent was finished.
#[derive(Debug, Default)]
pub struct IdTable {
    items: HashMap<String, TempId>,
}

impl IdTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, local_id: impl Into<String>, temp_id: TempId) {
        self.items.insert(local_id.into(), temp_id);
    }

    pub fn resolve(&self, local_id: &str) -> Option<&TempId> {
        self.items.get(local_id)
    }

    /// Resolve an optional parent id; absent or unknown means launch scope
    pub fn resolve_parent(&self, parent_id: Option<&str>) -> Option<&TempId> {
        parent_id.and_then(|id| self.resolve(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_resolve() {
        let mut table = IdTable::new();
        table.bind("suite-1", TempId::new("item-1"));

        assert_eq!(table.resolve("suite-1"), Some(&TempId::new("item-1")));
        assert_eq!(table.resolve("missing"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_resolve_parent_tolerates_absence() {
        let mut table = IdTable::new();
        table.bind("suite-1", TempId::new("item-1"));

        assert_eq!(table.resolve_parent(None), None);
        assert_eq!(table.resolve_parent(Some("nope")), None);
        assert_eq!(
            table.resolve_parent(Some("suite-1")),
            Some(&TempId::new("item-1"))
        );
    }

    #[test]
    fn test_rebind_overwrites() {
        let mut table = IdTable::new();
        table.bind("t", TempId::new("a"));
        table.bind("t", TempId::new("b"));

        assert_eq!(table.resolve("t"), Some(&TempId::new("b")));
    }
}
