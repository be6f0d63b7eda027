//! Where the match store lives between runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::MatchStore;

/// Loads the store at the start of a run and saves it at the end.
pub trait MatchRepository {
    /// Backend name for logging.
    fn name(&self) -> &str;

    fn load(&self) -> Result<MatchStore>;

    fn dump(&self, store: &MatchStore) -> Result<()>;
}

/// Stores nothing; every run starts empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRepository;

impl MatchRepository for NullRepository {
    fn name(&self) -> &str {
        "null"
    }

    fn load(&self) -> Result<MatchStore> {
        Ok(MatchStore::new())
    }

    fn dump(&self, store: &MatchStore) -> Result<()> {
        log::debug!("Discarding {} rhyme candidates", store.len());
        Ok(())
    }
}

/// A JSON object of rhyme key → title on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MatchRepository for JsonFileRepository {
    fn name(&self) -> &str {
        "local"
    }

    /// A missing file is an empty store.
    fn load(&self) -> Result<MatchStore> {
        if !self.path.exists() {
            log::info!("No match store at {}, starting empty", self.path.display());
            return Ok(MatchStore::new());
        }
        let data = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read match store: {}", self.path.display()))?;
        let store: MatchStore = serde_json::from_str(&data)
            .with_context(|| format!("Invalid match store JSON: {}", self.path.display()))?;
        log::info!("Loaded {} rhyme candidates from {}", store.len(), self.path.display());
        Ok(store)
    }

    fn dump(&self, store: &MatchStore) -> Result<()> {
        let json = serde_json::to_string_pretty(store)?;
        atomic_write(&self.path, json.as_bytes())
            .with_context(|| format!("Failed to write match store: {}", self.path.display()))?;
        log::info!("Saved {} rhyme candidates to {}", store.len(), self.path.display());
        Ok(())
    }
}

/// Sibling path the store is staged at before the rename:
/// `rhymes.json` stages as `rhymes.json.tmp`.
fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Replace the store file in one rename so readers never see half a store.
fn atomic_write(target: &Path, data: &[u8]) -> Result<()> {
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let staged = staging_path(target);
    std::fs::write(&staged, data)?;
    std::fs::rename(&staged, target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RhymeKey;

    #[test]
    fn test_null_repository() {
        let repo = NullRepository;
        let mut store = MatchStore::new();
        store.insert(RhymeKey::new("AA1 R"), "Pedro, Marshal of Navarre");
        repo.dump(&store).unwrap();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_json_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("rhymes.json"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_json_dump_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nested").join("rhymes.json"));
        let mut store = MatchStore::new();
        store.insert(RhymeKey::new("AA1 R"), "Pedro, Marshal of Navarre");
        store.insert(RhymeKey::new("OW1 L"), "Savage 2: A Tortured Soul");
        repo.dump(&store).unwrap();

        assert!(repo.path().exists());
        assert!(!staging_path(repo.path()).exists());
        assert_eq!(repo.load().unwrap(), store);
    }

    #[test]
    fn test_staging_keeps_extension() {
        assert_eq!(
            staging_path(Path::new("data/rhymes.json")),
            PathBuf::from("data/rhymes.json.tmp")
        );
        assert_ne!(
            staging_path(Path::new("rhymes.json")),
            staging_path(Path::new("rhymes.bak"))
        );
    }

    #[test]
    fn test_dump_leaves_lookalike_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let other = dir.path().join("rhymes.tmp");
        std::fs::write(&other, "keep me").unwrap();

        let repo = JsonFileRepository::new(dir.path().join("rhymes.json"));
        repo.dump(&MatchStore::new()).unwrap();

        assert_eq!(std::fs::read_to_string(&other).unwrap(), "keep me");
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_json_reads_plain_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rhymes.json");
        std::fs::write(&path, r#"{"AA1 R": "Pedro, Marshal of Navarre"}"#).unwrap();
        let store = JsonFileRepository::new(&path).load().unwrap();
        assert_eq!(store.get(&RhymeKey::new("AA1 R")), Some("Pedro, Marshal of Navarre"));
    }

    #[test]
    fn test_json_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rhymes.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = JsonFileRepository::new(&path).load().unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid match store JSON"));
    }
}
