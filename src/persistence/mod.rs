//! Small JSON values in per-browser storage
//!
//! LocalStorage on wasm. Native builds keep a thread-local map so settings
//! and best scores behave the same in headless runs and tests.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
}

/// Raw string under `key`
#[cfg(target_arch = "wasm32")]
pub fn get_item(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

/// Store a raw string, false if storage is unavailable or full
#[cfg(target_arch = "wasm32")]
pub fn set_item(key: &str, value: &str) -> bool {
    storage().is_some_and(|s| s.set_item(key, value).is_ok())
}

#[cfg(target_arch = "wasm32")]
pub fn remove_item(key: &str) {
    if let Some(s) = storage() {
        let _ = s.remove_item(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static MEMORY: std::cell::RefCell<std::collections::HashMap<String, String>> =
        std::cell::RefCell::new(std::collections::HashMap::new());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_item(key: &str) -> Option<String> {
    MEMORY.with(|m| m.borrow().get(key).cloned())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_item(key: &str, value: &str) -> bool {
    MEMORY.with(|m| m.borrow_mut().insert(key.to_string(), value.to_string()));
    true
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove_item(key: &str) {
    MEMORY.with(|m| m.borrow_mut().remove(key));
}

/// Deserialize the JSON stored under `key`; missing or malformed is None
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed '{key}' in storage: {e}");
            None
        }
    }
}

/// Serialize `value` as JSON under `key`
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => set_item(key, &json),
        Err(e) => {
            log::error!("Failed to serialize '{key}': {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip() {
        assert_eq!(get_item("persist-test-raw"), None);
        assert!(set_item("persist-test-raw", "42"));
        assert_eq!(get_item("persist-test-raw").as_deref(), Some("42"));
        remove_item("persist-test-raw");
        assert_eq!(get_item("persist-test-raw"), None);
    }

    #[test]
    fn test_malformed_json_is_none() {
        set_item("persist-test-bad", "{not json");
        assert_eq!(load_json::<u32>("persist-test-bad"), None);
        assert!(save_json("persist-test-bad", &7u32));
        assert_eq!(load_json::<u32>("persist-test-bad"), Some(7));
    }
}
