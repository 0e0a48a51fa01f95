//! Key-value preference persistence.

use std::{
    collections::{BTreeMap, HashMap},
    fmt, fs, io,
    path::PathBuf,
};

/// Failure reading or writing a preference.
#[derive(Debug)]
pub enum PreferenceError {
    Unavailable,
    Io(io::Error),
    Corrupt(serde_json::Error),
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "preference storage unavailable"),
            Self::Io(e) => write!(f, "preference storage I/O: {e}"),
            Self::Corrupt(e) => write!(f, "preference file is corrupt: {e}"),
        }
    }
}

impl std::error::Error for PreferenceError {}

/// Persistent string store. A missing key is `Ok(None)`, not an error.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preferences kept as a flat JSON object on disk.
pub struct FilePreferenceStore {
    path: Option<PathBuf>,
}

impl FilePreferenceStore {
    const FILE_NAME: &'static str = "preferences.json";

    /// Store in the platform data directory (`None` path if it cannot be
    /// resolved, which makes every access fail as `Unavailable`).
    pub fn new() -> Self {
        Self {
            path: dirs::data_dir().map(|d| d.join(crate::APP_NAME).join(Self::FILE_NAME)),
        }
    }

    pub const fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let path = self.path.as_ref().ok_or(PreferenceError::Unavailable)?;
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(PreferenceError::Corrupt),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(PreferenceError::Io(e)),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let path = self.path.as_ref().ok_or(PreferenceError::Unavailable)?;
        // Overwrite a corrupt file rather than refusing to persist forever.
        let mut all = self.read_all().unwrap_or_default();
        all.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(PreferenceError::Io)?;
        }
        let json = serde_json::to_string_pretty(&all).map_err(PreferenceError::Corrupt)?;
        fs::write(path, json).map_err(PreferenceError::Io)
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    #[cfg(test)]
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_owned(), value.to_owned());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("portfolio-tui-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = FilePreferenceStore::at(temp_file("absent.json"));
        assert!(store.get("theme").unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let path = temp_file("persist.json");
        let _ = fs::remove_file(&path);

        FilePreferenceStore::at(path.clone())
            .set("theme", "light")
            .unwrap();
        let reopened = FilePreferenceStore::at(path.clone());
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("light"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_reports_error_then_recovers_on_write() {
        let path = temp_file("corrupt.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let mut store = FilePreferenceStore::at(path.clone());
        assert!(matches!(store.get("theme"), Err(PreferenceError::Corrupt(_))));

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unresolved_path_is_unavailable() {
        let mut store = FilePreferenceStore { path: None };
        assert!(matches!(store.get("k"), Err(PreferenceError::Unavailable)));
        assert!(matches!(store.set("k", "v"), Err(PreferenceError::Unavailable)));
    }
}
