//! Narrow key/value view of the system registry.
//!
//! Paths are relative to a single root hive chosen when the registry handle is
//! built (`HKEY_LOCAL_MACHINE` for everything these tools touch).

#[cfg(any(test, feature = "test-support"))]
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry key not found: {0}")]
    KeyNotFound(String),
    #[error("registry value not found: {path}\\{name}")]
    ValueNotFound { path: String, name: String },
    #[error("registry operation on {path} failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("registry key {0} still has subkeys")]
    HasSubkeys(String),
    #[error("the system registry is not available on this platform")]
    Unavailable,
}

pub type Result<T> = std::result::Result<T, RegistryError>;

pub trait Registry {
    /// Reads a string value. A missing key or value is an error.
    fn get(&self, path: &str, name: &str) -> Result<String>;

    /// Writes a string value, creating the key when needed.
    fn set(&self, path: &str, name: &str, value: &str) -> Result<()>;

    /// Creates the key, or opens it if it already exists.
    fn create(&self, path: &str) -> Result<()>;

    /// Deletes a key that has no subkeys. Fails if the key does not exist.
    fn delete(&self, path: &str) -> Result<()>;
}

#[cfg(windows)]
pub use self::windows::SystemRegistry;

#[cfg(windows)]
mod windows {
    use super::{Registry, RegistryError, Result};
    use std::io::ErrorKind;
    use winreg::RegKey;
    use winreg::enums::*;

    pub struct SystemRegistry {
        root: RegKey,
    }

    impl SystemRegistry {
        pub fn local_machine() -> Self {
            Self {
                root: RegKey::predef(HKEY_LOCAL_MACHINE),
            }
        }
    }

    fn map_err(path: &str, err: std::io::Error) -> RegistryError {
        if err.kind() == ErrorKind::NotFound {
            RegistryError::KeyNotFound(path.to_string())
        } else {
            RegistryError::Io {
                path: path.to_string(),
                source: err,
            }
        }
    }

    impl Registry for SystemRegistry {
        fn get(&self, path: &str, name: &str) -> Result<String> {
            let key = self
                .root
                .open_subkey(path)
                .map_err(|e| map_err(path, e))?;
            key.get_value::<String, _>(name).map_err(|e| match e.kind() {
                ErrorKind::NotFound => RegistryError::ValueNotFound {
                    path: path.to_string(),
                    name: name.to_string(),
                },
                _ => map_err(path, e),
            })
        }

        fn set(&self, path: &str, name: &str, value: &str) -> Result<()> {
            let (key, _) = self
                .root
                .create_subkey(path)
                .map_err(|e| map_err(path, e))?;
            key.set_value(name, &value).map_err(|e| map_err(path, e))
        }

        fn create(&self, path: &str) -> Result<()> {
            self.root
                .create_subkey(path)
                .map(|_| ())
                .map_err(|e| map_err(path, e))
        }

        fn delete(&self, path: &str) -> Result<()> {
            self.root
                .delete_subkey(path)
                .map_err(|e| map_err(path, e))
        }
    }
}

/// Stand-in used when not targeting Windows. Every call reports
/// [`RegistryError::Unavailable`].
#[cfg(not(windows))]
pub struct SystemRegistry;

#[cfg(not(windows))]
impl SystemRegistry {
    pub fn local_machine() -> Self {
        Self
    }
}

#[cfg(not(windows))]
impl Registry for SystemRegistry {
    fn get(&self, _path: &str, _name: &str) -> Result<String> {
        Err(RegistryError::Unavailable)
    }
    fn set(&self, _path: &str, _name: &str, _value: &str) -> Result<()> {
        Err(RegistryError::Unavailable)
    }
    fn create(&self, _path: &str) -> Result<()> {
        Err(RegistryError::Unavailable)
    }
    fn delete(&self, _path: &str) -> Result<()> {
        Err(RegistryError::Unavailable)
    }
}

/// In-memory registry. Clones share the same storage, so a test can hand one
/// copy to the code under test and inspect another.
///
/// Key paths compare case-insensitively like the real registry.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Default)]
pub struct MemoryRegistry {
    keys: Rc<RefCell<BTreeMap<String, BTreeMap<String, String>>>>,
}

#[cfg(any(test, feature = "test-support"))]
impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.keys.borrow().contains_key(&normalize(path))
    }

    /// Every key currently stored, normalized.
    pub fn keys(&self) -> Vec<String> {
        self.keys.borrow().keys().cloned().collect()
    }
}

#[cfg(any(test, feature = "test-support"))]
fn normalize(path: &str) -> String {
    path.trim_matches('\\').to_ascii_lowercase()
}

#[cfg(any(test, feature = "test-support"))]
impl Registry for MemoryRegistry {
    fn get(&self, path: &str, name: &str) -> Result<String> {
        let keys = self.keys.borrow();
        let Some(values) = keys.get(&normalize(path)) else {
            return Err(RegistryError::KeyNotFound(path.to_string()));
        };
        values
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::ValueNotFound {
                path: path.to_string(),
                name: name.to_string(),
            })
    }

    fn set(&self, path: &str, name: &str, value: &str) -> Result<()> {
        self.keys
            .borrow_mut()
            .entry(normalize(path))
            .or_default()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn create(&self, path: &str) -> Result<()> {
        self.keys.borrow_mut().entry(normalize(path)).or_default();
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<()> {
        let path = normalize(path);
        let mut keys = self.keys.borrow_mut();
        if !keys.contains_key(&path) {
            return Err(RegistryError::KeyNotFound(path));
        }
        let prefix = format!("{path}\\");
        if keys.keys().any(|k| k.starts_with(&prefix)) {
            return Err(RegistryError::HasSubkeys(path));
        }
        keys.remove(&path);
        Ok(())
    }
}
