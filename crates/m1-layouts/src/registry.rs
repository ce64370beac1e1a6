//! Read-only layout registry.
//!
//! Constructed once at startup and never mutated afterwards; the registry
//! is the only process-wide state in the pipeline and needs no locking.

use m1_model::Layout;

use crate::catalog::builtin_layouts;
use crate::error::LayoutError;

/// Ordered catalog of known layouts.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    layouts: Vec<Layout>,
}

impl LayoutRegistry {
    /// Registry holding the built-in catalog.
    pub fn builtin() -> Self {
        Self {
            layouts: builtin_layouts(),
        }
    }

    pub fn empty() -> Self {
        Self {
            layouts: Vec::new(),
        }
    }

    /// Add a layout, keeping registration order. Fails on a duplicate name.
    pub fn with_layout(mut self, layout: Layout) -> Result<Self, LayoutError> {
        if self.layouts.iter().any(|l| l.name() == layout.name()) {
            return Err(LayoutError::Duplicate(layout.name().to_string()));
        }
        self.layouts.push(layout);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Result<&Layout, LayoutError> {
        self.layouts
            .iter()
            .find(|l| l.name() == name)
            .ok_or_else(|| LayoutError::NotFound(name.to_string()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layout> {
        self.layouts.iter()
    }

    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use m1_model::LayoutField;

    use super::*;
    use crate::catalog::SEARCH_RESULTS;

    fn tiny_layout(name: &str) -> Layout {
        Layout::new(name, 20, vec![LayoutField::identifier("patient_id", 0, 8)])
            .expect("valid layout")
    }

    #[test]
    fn builtin_registry_resolves_known_names() {
        let registry = LayoutRegistry::builtin();
        let layout = registry.get(SEARCH_RESULTS).expect("known layout");
        assert_eq!(layout.total_width(), 80);
    }

    #[test]
    fn unknown_name_fails_with_not_found() {
        let registry = LayoutRegistry::builtin();
        assert!(matches!(
            registry.get("no-such-list"),
            Err(LayoutError::NotFound(_))
        ));
    }

    #[test]
    fn rejects_duplicate_registration() {
        let result = LayoutRegistry::empty()
            .with_layout(tiny_layout("a"))
            .and_then(|r| r.with_layout(tiny_layout("a")));
        assert!(matches!(result, Err(LayoutError::Duplicate(_))));
    }

    #[test]
    fn registration_order_is_preserved() {
        let registry = LayoutRegistry::empty()
            .with_layout(tiny_layout("b"))
            .and_then(|r| r.with_layout(tiny_layout("a")))
            .expect("distinct names");
        let names: Vec<&str> = registry.iter().map(Layout::name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
