use std::cell::RefCell;
use std::collections::HashMap;

use gloo_storage::{LocalStorage, Storage};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage no disponible")]
    Unavailable,
    #[error("error guardando '{key}' en storage")]
    Write { key: String },
    #[error("error serializando datos: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// STORAGE DURABLE DE SESIÓN
// ============================================================================
// Valores en texto plano: el token se guarda tal cual, el agente como JSON
// ============================================================================

pub trait SessionStorage {
    fn get_raw(&self, key: &str) -> Option<String>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

pub fn load_json<T: DeserializeOwned>(storage: &dyn SessionStorage, key: &str) -> Option<T> {
    let json = storage.get_raw(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] '{}' corrupto, se ignora: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(storage: &dyn SessionStorage, key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    storage.set_raw(key, &json)
}

/// localStorage del navegador vía gloo-storage
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSessionStorage;

impl LocalSessionStorage {
    pub fn is_available() -> bool {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .is_some()
    }
}

impl SessionStorage for LocalSessionStorage {
    fn get_raw(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|_| StorageError::Write { key: key.to_string() })
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// Storage en memoria (tests y navegadores sin localStorage)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        n: u32,
    }

    #[test]
    fn json_helpers_round_trip_and_tolerate_corruption() {
        let storage = MemoryStorage::new();
        save_json(&storage, "counter", &Counter { n: 3 }).unwrap();
        assert_eq!(load_json::<Counter>(&storage, "counter"), Some(Counter { n: 3 }));

        storage.set_raw("counter", "{broken").unwrap();
        assert_eq!(load_json::<Counter>(&storage, "counter"), None);

        storage.remove("counter");
        assert_eq!(storage.get_raw("counter"), None);
    }
}
