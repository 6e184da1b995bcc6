//! JSON persistence in browser LocalStorage
//!
//! Used by the settings and the discount ledger. Native builds keep nothing.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and decode a value stored under `key`
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let json = storage.get_item(key).ok()??;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding unreadable '{key}' entry: {e}");
            None
        }
    }
}

/// Encode and store a value under `key`. Returns whether it was written.
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    match (storage, serde_json::to_string(value)) {
        (Some(storage), Ok(json)) => storage.set_item(key, &json).is_ok(),
        _ => false,
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, _value: &T) -> bool {
    false
}
