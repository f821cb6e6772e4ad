use anyhow::{Context, Result};
use minitube_core::models::Session;
use minitube_core::ClientConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Login session persisted between CLI invocations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `MINITUBE_SESSION_FILE`, else `<config dir>/minitube/session.json`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        if let Some(path) = &config.session_file {
            return Ok(Self::new(path.clone()));
        }
        let dir = dirs::config_dir()
            .context("No config directory found; set MINITUBE_SESSION_FILE")?;
        Ok(Self::new(dir.join("minitube").join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let session = serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt session file {}", self.path.display()))?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(session).context("Serialize session")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    /// Remove the stored session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minitube_core::models::Role;

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        assert!(store.load().unwrap().is_none());

        store
            .save(&Session {
                token: "jwt".to_string(),
                id: None,
                username: "alice".to_string(),
                role: Role::Admin,
            })
            .unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token, "jwt");
        assert!(loaded.is_admin());

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        assert!(SessionStore::new(path).load().is_err());
    }

    #[test]
    fn test_config_override() {
        let config = ClientConfig {
            session_file: Some(PathBuf::from("/tmp/custom-session.json")),
            ..ClientConfig::default()
        };
        let store = SessionStore::from_config(&config).unwrap();
        assert_eq!(store.path(), Path::new("/tmp/custom-session.json"));
    }
}
