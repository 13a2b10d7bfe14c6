//! Map contract suite.
//!
//! [`StringMap`] is a string-to-string map used as an opaque collaborator: the suite checks only its public
//! contract (put/get/remove/contains/clear/size), never how it stores entries.

use std::collections::HashMap;

use myunit_core::{CatalogBuilder, Suite};

/// A string-to-string map.
#[derive(Debug, Default, Clone)]
pub struct StringMap {
    entries: HashMap<String, String>,
}

impl StringMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`, returning the previous value.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }
}

/// Exercises [`StringMap`] through its contract. Every test starts from an empty map.
#[derive(Debug, Default)]
pub struct MapContract {
    map: StringMap,
}

impl Suite for MapContract {
    fn suite_name() -> String {
        "map-contract".to_string()
    }

    fn declare(methods: &mut CatalogBuilder<Self>) {
        methods
            .before_each("fresh_map", |s| {
                s.map = StringMap::new();
                Ok(())
            })
            .test("size", |s| {
                assert_eq!(s.map.size(), 0);
                s.map.put("key", "value");
                assert_eq!(s.map.size(), 1);
                s.map.put("key2", "value");
                assert_eq!(s.map.size(), 2);
                s.map.remove("key2");
                assert_eq!(s.map.size(), 1);
                s.map.remove("key");
                assert_eq!(s.map.size(), 0);
                Ok(())
            })
            .test("contains", |s| {
                assert!(!s.map.contains("key"));
                s.map.put("key", "value");
                assert!(s.map.contains("key"));
                Ok(())
            })
            .test("get", |s| {
                assert_eq!(s.map.get("key"), None);
                s.map.put("key", "value");
                assert_eq!(s.map.get("key"), Some("value"));
                Ok(())
            })
            .test("put", |s| {
                assert_eq!(s.map.put("key", "value"), None);
                assert!(s.map.contains("key"));
                assert_eq!(s.map.get("key"), Some("value"));
                assert_eq!(s.map.put("key", "value2").as_deref(), Some("value"));
                assert_eq!(s.map.get("key"), Some("value2"));
                Ok(())
            })
            .test("remove", |s| {
                s.map.put("key", "value");
                assert_eq!(s.map.remove("key2"), None);
                assert_eq!(s.map.remove("key").as_deref(), Some("value"));
                assert!(!s.map.contains("key"));
                assert_eq!(s.map.remove("key"), None);
                Ok(())
            })
            .test("clear", |s| {
                s.map.put("key", "value");
                s.map.put("key2", "value2");
                s.map.clear();
                assert_eq!(s.map.size(), 0);
                s.map.clear();
                assert_eq!(s.map.size(), 0);
                Ok(())
            })
            .test("colliding_keys", |s| {
                // "FB" and "Ea" share a 31-based polynomial string hash.
                s.map.put("FB", "value1");
                s.map.put("Ea", "value2");
                assert_eq!(s.map.size(), 2);
                assert_eq!(s.map.get("FB"), Some("value1"));
                assert_eq!(s.map.get("Ea"), Some("value2"));
                Ok(())
            })
            .test("grows_past_initial_capacity", |s| {
                for i in 1..=20 {
                    s.map.put(format!("key{i}"), "value");
                    assert_eq!(s.map.size(), i);
                }
                Ok(())
            });
    }
}
