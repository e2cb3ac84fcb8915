use crate::error::ServerError;
use log::{debug, warn};
use models::{
    Id,
    role::{Role, UserInfo},
};
use std::{collections::HashMap, fs, io::ErrorKind, path::PathBuf};

/// Storage key of the signed-in user
pub const USER_STORAGE_KEY: &str = "horarios:user";

/// Storage key of the last page visited
pub const LOCATION_STORAGE_KEY: &str = "horarios:location";

/// String key/value storage that survives between runs, the way a
/// browser's local storage does
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ServerError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ServerError>;

    fn remove_item(&mut self, key: &str) -> Result<(), ServerError>;
}

/// Keeps every item in one JSON object on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<HashMap<String, String>, ServerError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, items: &HashMap<String, String>) -> Result<(), ServerError> {
        fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ServerError> {
        Ok(self.read()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ServerError> {
        let mut items = self.read()?;
        items.insert(key.to_string(), value.to_string());
        self.write(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), ServerError> {
        let mut items = self.read()?;
        if items.remove(key).is_some() {
            self.write(&items)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ServerError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ServerError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), ServerError> {
        self.items.remove(key);
        Ok(())
    }
}

/// The signed-in user, mirrored to storage.
///
/// The role is whatever was stored at sign-in; nothing re-checks it with the
/// server.
#[derive(Debug)]
pub struct SessionStore<S: Storage> {
    storage: S,
    user: Option<UserInfo>,
}

impl<S: Storage> SessionStore<S> {
    /// Restores the user saved by a previous run, if any. Unreadable entries
    /// count as signed out.
    pub fn load(storage: S) -> Self {
        let user = match storage.get_item(USER_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw)
                .map_err(|e| warn!("Ignoring stored user: {e}"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read session storage: {e}");
                None
            }
        };

        Self { storage, user }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn update_user(&mut self, id: Id, email: &str, role: Role) -> Result<(), ServerError> {
        let user = UserInfo {
            id,
            email: email.to_string(),
            role,
        };

        self.storage
            .set_item(USER_STORAGE_KEY, &serde_json::to_string(&user)?)?;
        debug!("Stored session for {} ({})", user.email, user.role);
        self.user = Some(user);

        Ok(())
    }

    pub fn delete_user(&mut self) -> Result<(), ServerError> {
        self.user = None;
        self.storage.remove_item(USER_STORAGE_KEY)?;
        self.storage.remove_item(LOCATION_STORAGE_KEY)
    }

    /// Path of the last page successfully opened
    pub fn location(&self) -> Option<String> {
        self.storage.get_item(LOCATION_STORAGE_KEY).ok().flatten()
    }

    pub fn set_location(&mut self, path: &str) -> Result<(), ServerError> {
        self.storage.set_item(LOCATION_STORAGE_KEY, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_delete_user() {
        let mut session = SessionStore::load(MemoryStorage::default());
        assert!(!session.is_authenticated());

        session
            .update_user(Id(3), "carla@uni.pt", Role::Student)
            .unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().role, Role::Student);

        session.delete_user().unwrap();
        assert!(session.user().is_none());
    }

    #[test]
    fn test_session_survives_reload() {
        let mut storage = MemoryStorage::default();
        {
            let mut session = SessionStore::load(storage.clone());
            session
                .update_user(Id(1), "diana@uni.pt", Role::Director)
                .unwrap();
            storage = session.storage;
        }

        let restored = SessionStore::load(storage);
        assert_eq!(restored.user().unwrap().email, "diana@uni.pt");
    }

    #[test]
    fn test_corrupt_entry_means_signed_out() {
        let mut storage = MemoryStorage::default();
        storage.set_item(USER_STORAGE_KEY, "{not json").unwrap();

        assert!(!SessionStore::load(storage).is_authenticated());
    }

    #[test]
    fn test_file_storage() {
        let path = std::env::temp_dir().join(format!("session-{}.json", std::process::id()));
        let mut storage = FileStorage::new(&path);

        assert_eq!(storage.get_item("missing").unwrap(), None);
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        storage.remove_item("a").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("a").unwrap(), None);
        assert_eq!(reopened.get_item("b").unwrap().as_deref(), Some("2"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_location_is_cleared_on_sign_out() {
        let mut session = SessionStore::load(MemoryStorage::default());
        session
            .update_user(Id(1), "diana@uni.pt", Role::Director)
            .unwrap();
        session.set_location("/conflitos").unwrap();
        assert_eq!(session.location().as_deref(), Some("/conflitos"));

        session.delete_user().unwrap();
        assert_eq!(session.location(), None);
    }
}
