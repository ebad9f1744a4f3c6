//! Translation catalogs.
//!
//! One flat `key -> template` map per language, registered once at startup.
//! Registration order is kept because it drives the language menu.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Messages of a single language: key -> template.
pub type MessageMap = HashMap<String, String>;

/// A language that has a catalog.
///
/// Only a [`Catalog`] hands these out, so holding one means the language exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for LanguageId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog `{lang}` is not a flat JSON object of strings: {source}")]
    Malformed {
        lang: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("default language `{0}` has no registered catalog")]
    UnknownDefault(String),
}

struct Entry {
    id: LanguageId,
    messages: MessageMap,
}

/// Collects catalogs and display names before freezing them into a [`Catalog`].
#[derive(Default)]
pub struct CatalogBuilder {
    entries: Vec<Entry>,
    display_names: HashMap<String, String>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register messages for `code`. Registering a code twice replaces its
    /// messages but keeps its original position.
    #[must_use]
    pub fn register(mut self, code: &str, messages: MessageMap) -> Self {
        match self.entries.iter_mut().find(|e| e.id.as_str() == code) {
            Some(entry) => entry.messages = messages,
            None => self.entries.push(Entry {
                id: LanguageId(code.to_string()),
                messages,
            }),
        }
        self
    }

    /// Register messages for `code` from a JSON object.
    pub fn register_json(self, code: &str, json: &str) -> Result<Self, CatalogError> {
        let messages = serde_json::from_str(json).map_err(|source| CatalogError::Malformed {
            lang: code.to_string(),
            source,
        })?;
        Ok(self.register(code, messages))
    }

    /// Human readable name shown in menus.
    #[must_use]
    pub fn display_name(mut self, code: &str, name: &str) -> Self {
        self.display_names.insert(code.to_string(), name.to_string());
        self
    }

    pub fn build(self, default_language: &str) -> Result<Catalog, CatalogError> {
        let default_index = self
            .entries
            .iter()
            .position(|e| e.id.as_str() == default_language)
            .ok_or_else(|| CatalogError::UnknownDefault(default_language.to_string()))?;

        let index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.0.clone(), i))
            .collect();

        Ok(Catalog {
            entries: self.entries,
            index,
            display_names: self.display_names,
            default_index,
        })
    }
}

/// Immutable set of catalogs plus the default language.
pub struct Catalog {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    display_names: HashMap<String, String>,
    default_index: usize,
}

impl Catalog {
    /// Catalogs shipped with the bot.
    pub fn bundled(default_language: &str) -> Result<Self, CatalogError> {
        CatalogBuilder::new()
            .register_json("zh_CN", include_str!("locales/zh_CN.json"))?
            .register_json("en_US", include_str!("locales/en_US.json"))?
            .display_name("zh_CN", "简体中文")
            .display_name("en_US", "English")
            .build(default_language)
    }

    pub fn default_language(&self) -> &LanguageId {
        &self.entries[self.default_index].id
    }

    /// Look up a registered language.
    pub fn get(&self, code: &str) -> Option<&LanguageId> {
        self.index.get(code).map(|&i| &self.entries[i].id)
    }

    /// Validate `code`, substituting the default language for anything unknown.
    pub fn coerce(&self, code: &str) -> LanguageId {
        self.get(code).unwrap_or_else(|| self.default_language()).clone()
    }

    /// Registered languages in registration order.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageId> {
        self.entries.iter().map(|e| &e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Display name of `code`, or `code` itself when none was registered.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.display_names.get(code).map(String::as_str).unwrap_or(code)
    }

    /// Template for `key` in `lang`. Empty templates count as missing.
    pub fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        let entry = &self.entries[*self.index.get(lang)?];
        entry
            .messages
            .get(key)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("languages", &self.languages().collect::<Vec<_>>())
            .field("default", self.default_language())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(pairs: &[(&str, &str)]) -> MessageMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bundled_catalogs_parse() {
        let catalog = Catalog::bundled("zh_CN").unwrap();

        let codes: Vec<_> = catalog.languages().map(LanguageId::as_str).collect();
        assert_eq!(codes, vec!["zh_CN", "en_US"]);
        assert_eq!(catalog.default_language(), &"zh_CN");
        assert_eq!(catalog.lookup("en_US", "system.back"), Some("Back"));
        assert_eq!(catalog.lookup("zh_CN", "system.back"), Some("返回"));
    }

    #[test]
    fn test_bundled_catalogs_share_keys() {
        let catalog = Catalog::bundled("zh_CN").unwrap();
        let zh: MessageMap = serde_json::from_str(include_str!("locales/zh_CN.json")).unwrap();
        for key in zh.keys() {
            assert!(catalog.lookup("en_US", key).is_some(), "en_US is missing {key}");
        }
    }

    #[test]
    fn test_unknown_default_is_rejected() {
        let result = CatalogBuilder::new()
            .register("en_US", MessageMap::new())
            .build("fr_FR");
        assert!(matches!(result, Err(CatalogError::UnknownDefault(code)) if code == "fr_FR"));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let result = CatalogBuilder::new().register_json("en_US", r#"{"a": {"nested": "x"}}"#);
        assert!(matches!(result, Err(CatalogError::Malformed { .. })));
    }

    #[test]
    fn test_coerce_falls_back_to_default() {
        let catalog = Catalog::bundled("zh_CN").unwrap();
        assert_eq!(catalog.coerce("en_US"), "en_US");
        assert_eq!(catalog.coerce("fr_FR"), "zh_CN");
        assert_eq!(catalog.coerce(""), "zh_CN");
    }

    #[test]
    fn test_display_name_falls_back_to_code() {
        let catalog = CatalogBuilder::new()
            .register("en_US", MessageMap::new())
            .register("ja_JP", MessageMap::new())
            .display_name("en_US", "English")
            .build("en_US")
            .unwrap();

        assert_eq!(catalog.display_name("en_US"), "English");
        assert_eq!(catalog.display_name("ja_JP"), "ja_JP");
    }

    #[test]
    fn test_reregister_keeps_order() {
        let catalog = CatalogBuilder::new()
            .register("zh_CN", messages(&[("k", "old")]))
            .register("en_US", MessageMap::new())
            .register("zh_CN", messages(&[("k", "new")]))
            .build("zh_CN")
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.languages().next().unwrap(), &"zh_CN");
        assert_eq!(catalog.lookup("zh_CN", "k"), Some("new"));
    }

    #[test]
    fn test_empty_template_counts_as_missing() {
        let catalog = CatalogBuilder::new()
            .register("en_US", messages(&[("blank", "")]))
            .build("en_US")
            .unwrap();

        assert_eq!(catalog.lookup("en_US", "blank"), None);
        assert_eq!(catalog.lookup("xx", "blank"), None);
    }
}
