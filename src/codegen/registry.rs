use std::collections::BTreeSet;

/// Names already emitted during one generation run.
///
/// A registry lives for exactly one top-level generator call. Procedure and
/// view generation each use their own instance.
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: BTreeSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`. Returns `false` if it was already registered.
    pub fn register(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_once() {
        let mut registry = NameRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register("GetAllOrders"));
        assert!(!registry.register("GetAllOrders"));
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = NameRegistry::new();
        assert!(registry.register("A_B_View"));
        assert!(registry.register("a_b_View"));
        assert_eq!(registry.len(), 2);
    }
}
