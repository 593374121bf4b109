use std::collections::BTreeMap;

use crate::ComponentKey;

/// Maps component keys to component file paths.
///
/// Each analysis run owns its registry; it is filled once from directory
/// discovery, then extended with the root entries before loading starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentRegistry {
    components: BTreeMap<ComponentKey, String>,
}

impl ComponentRegistry {
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ComponentKey>,
        V: Into<String>,
    {
        let mut registry = Self::default();
        registry.set_all(entries);
        registry
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.components.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<ComponentKey>, path: impl Into<String>) {
        self.components.insert(key.into(), path.into());
    }

    pub fn set_all<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ComponentKey>,
        V: Into<String>,
    {
        for (key, path) in entries {
            self.set(key, path);
        }
    }

    pub fn get_key_value(&self, key: &str) -> Option<(&str, &str)> {
        self.components
            .get_key_value(key)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unknown_key_is_none() {
        let registry = ComponentRegistry::default();
        assert_eq!(registry.get("App"), None);
    }

    #[test]
    fn test_set_overwrites_existing_key() {
        let mut registry = ComponentRegistry::from_entries([("App", "components/App.vue")]);
        registry.set("App", "components/v2/App.vue");
        registry.set("pages/index.vue", "pages/index.vue");

        assert_eq!(registry.get("App"), Some("components/v2/App.vue"));
        assert_eq!(registry.get("pages/index.vue"), Some("pages/index.vue"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_set_all_merges() {
        let mut registry = ComponentRegistry::from_entries([
            ("App", "components/App.vue"),
            ("Button", "components/Button.vue"),
        ]);
        registry.set_all([
            ("Button", "components/atoms/Button.vue"),
            ("InputText", "components/atoms/InputText.vue"),
        ]);

        assert_eq!(registry.get("App"), Some("components/App.vue"));
        assert_eq!(registry.get("Button"), Some("components/atoms/Button.vue"));
        assert_eq!(registry.get("InputText"), Some("components/atoms/InputText.vue"));
    }
}
