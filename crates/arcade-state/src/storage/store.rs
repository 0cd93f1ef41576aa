//! JSON state store over a raw backend.

use std::iter;

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::codec::primitives::JsonObject;
use crate::constants::{STATE_CUR_VERSION, STATE_MIN_VERSION, STATE_VERSION_KEY};
use crate::error::StorageError;
use crate::storage::StorageBackend;

/// Options applied when a [`StateStore`] is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Version number written to the backend on open.
    pub current_version: u32,
    /// Stored versions below this (or missing or unparsable) clear the backend.
    pub min_version: u32,
    /// Backend key holding the version number.
    pub version_key: String,
    /// JSON object whose entries seed the session cache, as carried by a
    /// shared URL.
    pub initial_state: Option<String>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            current_version: STATE_CUR_VERSION,
            min_version: STATE_MIN_VERSION,
            version_key: STATE_VERSION_KEY.to_string(),
            initial_state: None,
        }
    }
}

impl StoreOptions {
    pub fn with_current_version(mut self, version: u32) -> Self {
        self.current_version = version;
        self
    }

    pub fn with_min_version(mut self, version: u32) -> Self {
        self.min_version = version;
        self
    }

    pub fn with_version_key(mut self, key: impl Into<String>) -> Self {
        self.version_key = key.into();
        self
    }

    pub fn with_initial_state(mut self, state: impl Into<String>) -> Self {
        self.initial_state = Some(state.into());
        self
    }
}

/// JSON values by key, backed by a [`StorageBackend`].
///
/// Values read or written during the session are cached; the cache is what
/// [`snapshot`](Self::snapshot) returns. A read that found nothing is cached
/// as absent too.
#[derive(Debug)]
pub struct StateStore<B> {
    backend: B,
    cache: FxHashMap<String, Option<Value>>,
}

impl<B: StorageBackend> StateStore<B> {
    /// Opens the store, applying the version gate and the initial state.
    pub fn open(mut backend: B, options: StoreOptions) -> Result<Self, StorageError> {
        let stored = backend.get_item(&options.version_key)?;
        let stored_version = stored.as_deref().and_then(parse_version_prefix);
        match stored_version {
            Some(v) if v >= i64::from(options.min_version) => {}
            _ => {
                warn!(
                    stored = stored.as_deref().unwrap_or(""),
                    min_version = options.min_version,
                    "stored state version is missing or too old, clearing storage"
                );
                backend.clear()?;
            }
        }
        backend.set_item(&options.version_key, &options.current_version.to_string())?;

        let cache = options
            .initial_state
            .as_deref()
            .map(parse_initial_state)
            .unwrap_or_default();

        Ok(Self { backend, cache })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Reads a value, from the session cache first and the backend second.
    pub fn get(&mut self, key: &str) -> Result<Option<Value>, StorageError> {
        let value = match self.cache.get(key) {
            Some(cached) => cached.clone(),
            None => self.get_from_backend(key)?,
        };
        self.cache.insert(key.to_string(), value.clone());
        Ok(value)
    }

    /// Writes a value to the cache and the backend.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.backend.set_item(key, &value.to_string())?;
        self.cache.insert(key.to_string(), Some(value));
        Ok(())
    }

    pub fn remove(&mut self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.cache.remove(*key);
            self.backend.remove_item(key)?;
        }
        Ok(())
    }

    /// Clears the cache and the backend, including the version number.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.cache.clear();
        self.backend.clear()
    }

    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.backend.keys()
    }

    /// Reads `current`, falling back to each legacy key in order.
    ///
    /// The cache is searched before the backend. A value found anywhere is
    /// written back under `current`; the legacy keys are removed either way.
    pub fn get_with_deprecated_fallback(
        &mut self,
        current: &str,
        legacy: &[&str],
    ) -> Result<Option<Value>, StorageError> {
        let candidates = || iter::once(current).chain(legacy.iter().copied());

        let mut found = None;
        for key in candidates() {
            if let Some(Some(value)) = self.cache.get(key) {
                found = Some((key, value.clone()));
                break;
            }
        }
        if found.is_none() {
            for key in candidates() {
                if let Some(value) = self.get_from_backend(key)? {
                    found = Some((key, value));
                    break;
                }
            }
        }

        self.remove(legacy)?;
        let Some((key, value)) = found else {
            return Ok(None);
        };
        if key != current {
            info!(from = key, to = current, "migrated state from deprecated key");
        }
        self.set(current, value.clone())?;
        Ok(Some(value))
    }

    /// The session cache as one JSON object.
    pub fn snapshot(&self) -> Value {
        let obj: JsonObject = self
            .cache
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
            .collect();
        Value::Object(obj)
    }

    fn get_from_backend(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let Some(text) = self.backend.get_item(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                error!(key, error = %e, "stored item is not valid JSON");
                Ok(None)
            }
        }
    }
}

/// Reads the integer at the start of a stored version number, after leading
/// whitespace and an optional sign. Trailing text is ignored, so `"4.5"` and
/// `"4abc"` are both 4.
fn parse_version_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let magnitude = digits[..len].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_initial_state(text: &str) -> FxHashMap<String, Option<Value>> {
    let text = text.trim();
    if text.is_empty() {
        return FxHashMap::default();
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(obj)) => {
            debug!(entries = obj.len(), "seeded state from initial state");
            obj.into_iter().map(|(k, v)| (k, Some(v))).collect()
        }
        Ok(_) => {
            error!(state = text, "initial state is not an object");
            FxHashMap::default()
        }
        Err(e) => {
            error!(state = text, error = %e, "initial state is not valid JSON");
            FxHashMap::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::storage::MemoryStorage;

    fn open(items: &[(&str, &str)]) -> StateStore<MemoryStorage> {
        let backend: MemoryStorage = items.iter().copied().collect();
        StateStore::open(backend, StoreOptions::default()).unwrap()
    }

    #[test]
    fn test_version_gate_clears_stale_storage() {
        let store = open(&[("__stateVersionNum", "3"), ("gameNameList", "\"x\"")]);
        assert_eq!(store.keys().unwrap(), vec!["__stateVersionNum"]);
        assert_eq!(
            store.backend().get_item("__stateVersionNum").unwrap().as_deref(),
            Some("4")
        );

        let store = open(&[("gameNameList", "\"x\"")]);
        assert_eq!(store.keys().unwrap(), vec!["__stateVersionNum"]);

        let store = open(&[("__stateVersionNum", "abc"), ("k", "1")]);
        assert_eq!(store.keys().unwrap(), vec!["__stateVersionNum"]);
    }

    #[test]
    fn test_version_gate_keeps_current_storage() {
        let store = open(&[("__stateVersionNum", "4"), ("gameNameList", "\"x\"")]);
        assert_eq!(store.keys().unwrap(), vec!["__stateVersionNum", "gameNameList"]);
    }

    #[test]
    fn test_version_gate_reads_leading_digits() {
        for stored in ["4.5", "4abc", " 4", "+4", "12"] {
            let store = open(&[("__stateVersionNum", stored), ("gameNameList", "\"x\"")]);
            assert_eq!(
                store.keys().unwrap(),
                vec!["__stateVersionNum", "gameNameList"],
                "stored version {stored:?}"
            );
            assert_eq!(
                store.backend().get_item("__stateVersionNum").unwrap().as_deref(),
                Some("4")
            );
        }

        for stored in ["3.9", "-4", ".4", "", "v4"] {
            let store = open(&[("__stateVersionNum", stored), ("gameNameList", "\"x\"")]);
            assert_eq!(store.keys().unwrap(), vec!["__stateVersionNum"], "stored version {stored:?}");
        }
    }

    #[test]
    fn test_parse_version_prefix() {
        assert_eq!(parse_version_prefix("4"), Some(4));
        assert_eq!(parse_version_prefix("  7 "), Some(7));
        assert_eq!(parse_version_prefix("4.5"), Some(4));
        assert_eq!(parse_version_prefix("-2x"), Some(-2));
        assert_eq!(parse_version_prefix("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_version_prefix("x4"), None);
        assert_eq!(parse_version_prefix("-"), None);
    }

    #[test]
    fn test_get_set_and_cache() {
        let mut store = open(&[("__stateVersionNum", "4"), ("a", "{\"n\":1}")]);
        assert_eq!(store.get("a").unwrap(), Some(json!({"n": 1})));
        assert_eq!(store.get("b").unwrap(), None);

        store.set("b", json!([1, 2])).unwrap();
        assert_eq!(store.get("b").unwrap(), Some(json!([1, 2])));
        assert_eq!(store.backend().get_item("b").unwrap().as_deref(), Some("[1,2]"));

        assert_eq!(store.snapshot(), json!({"a": {"n": 1}, "b": [1, 2]}));
    }

    #[test]
    fn test_invalid_stored_json_is_absent() {
        let mut store = open(&[("__stateVersionNum", "4"), ("a", "{oops")]);
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_initial_state_overlay() {
        let backend: MemoryStorage =
            [("__stateVersionNum", "4"), ("a", "1")].into_iter().collect();
        let options = StoreOptions::default().with_initial_state(r#"{"a": 2, "c": "x"}"#);
        let mut store = StateStore::open(backend, options).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(json!(2)));
        assert_eq!(store.get("c").unwrap(), Some(json!("x")));

        for bad in ["[1]", "{nope", "   "] {
            let options = StoreOptions::default().with_initial_state(bad);
            let store = StateStore::open(MemoryStorage::new(), options).unwrap();
            assert_eq!(store.snapshot(), json!({}));
        }
    }

    #[test]
    fn test_deprecated_fallback_migrates() {
        let mut store = open(&[("__stateVersionNum", "4"), ("old", "\"legacy\"")]);
        let value = store.get_with_deprecated_fallback("new", &["old"]).unwrap();
        assert_eq!(value, Some(json!("legacy")));
        assert_eq!(store.backend().get_item("old").unwrap(), None);
        assert_eq!(store.backend().get_item("new").unwrap().as_deref(), Some("\"legacy\""));
    }

    #[test]
    fn test_deprecated_fallback_prefers_current() {
        let mut store = open(&[
            ("__stateVersionNum", "4"),
            ("new", "\"current\""),
            ("old1", "\"one\""),
            ("old2", "\"two\""),
        ]);
        let value = store
            .get_with_deprecated_fallback("new", &["old1", "old2"])
            .unwrap();
        assert_eq!(value, Some(json!("current")));
        assert_eq!(store.keys().unwrap(), vec!["__stateVersionNum", "new"]);
    }

    #[test]
    fn test_deprecated_fallback_prefers_cache() {
        let backend: MemoryStorage =
            [("__stateVersionNum", "4"), ("new", "\"stored\"")].into_iter().collect();
        let options = StoreOptions::default().with_initial_state(r#"{"old": "shared"}"#);
        let mut store = StateStore::open(backend, options).unwrap();

        let value = store.get_with_deprecated_fallback("new", &["old"]).unwrap();
        assert_eq!(value, Some(json!("shared")));
    }

    #[test]
    fn test_deprecated_fallback_absent() {
        let mut store = open(&[("__stateVersionNum", "4")]);
        assert_eq!(store.get_with_deprecated_fallback("new", &["old"]).unwrap(), None);
        assert_eq!(store.keys().unwrap(), vec!["__stateVersionNum"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = open(&[("__stateVersionNum", "4"), ("a", "1"), ("b", "2")]);
        store.get("a").unwrap();
        store.remove(&["a"]).unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.snapshot(), json!({}));

        store.clear().unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_custom_options() {
        let backend: MemoryStorage = [("v", "7")].into_iter().collect();
        let options = StoreOptions::default()
            .with_version_key("v")
            .with_min_version(7)
            .with_current_version(8);
        let store = StateStore::open(backend, options).unwrap();
        assert_eq!(store.backend().get_item("v").unwrap().as_deref(), Some("8"));
    }
}
