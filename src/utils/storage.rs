use thiserror::Error;
use web_sys::{window, Storage};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("No se pudo acceder a localStorage")]
    Unavailable,
    #[error("Error guardando en localStorage: {0}")]
    Write(String),
}

/// Almacenamiento clave/valor persistente (localStorage en el navegador)
pub trait KeyValueStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;

#[cfg(test)]
mod memory {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::{KeyValueStorage, StorageError};

    /// Almacenamiento en memoria. Puede simular un localStorage bloqueado.
    #[derive(Debug, Default)]
    pub struct MemoryStorage {
        entries: RefCell<HashMap<String, String>>,
        denied: Cell<bool>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entry(key: &str, value: &str) -> Self {
            let storage = Self::new();
            storage.entries.borrow_mut().insert(key.to_string(), value.to_string());
            storage
        }

        /// Las escrituras siguientes fallan (cuota excedida, modo privado...)
        pub fn deny_writes(&self) {
            self.denied.set(true);
        }
    }

    impl KeyValueStorage for MemoryStorage {
        fn load(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.denied.get() {
                return Err(StorageError::Write("QuotaExceededError".into()));
            }
            self.entries.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            if self.denied.get() {
                return Err(StorageError::Write("SecurityError".into()));
            }
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }
}
