//! Card catalog file storage with XDG path support.
//!
//! A catalog is a JSON array of cards stored at `~/.local/share/cq/cards.json`
//! by default. Entries may be full card entries (with a `details` record) or
//! bare printing records; bare records are wrapped into cards with default
//! per-copy values on load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cardquery_model::{Card, CardDetails};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Default catalog filename.
const CATALOG_FILENAME: &str = "cards.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "cq";

/// Errors that can occur while reading or writing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to determine the XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read catalog file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write or directory creation.
    #[error("failed to write catalog file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// One catalog entry as stored on disk.
///
/// A printing record requires `name`, so it is tried first; anything else is
/// read as a card entry.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Details(CardDetails),
    Card(Card),
}

impl From<CatalogEntry> for Card {
    fn from(entry: CatalogEntry) -> Self {
        match entry {
            CatalogEntry::Details(details) => Card::from_details(details),
            CatalogEntry::Card(card) => card,
        }
    }
}

/// Persistent storage for a card catalog.
///
/// # Example
///
/// ```no_run
/// use cardquery::catalog::CatalogStore;
///
/// let store = CatalogStore::new()?;
/// let cards = store.load_or_default()?;
/// println!("{} cards", cards.len());
/// # Ok::<(), cardquery::catalog::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CatalogStore {
    /// Path to the catalog file.
    path: PathBuf,
}

impl CatalogStore {
    /// Creates a new `CatalogStore` with the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a new `CatalogStore` with a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default XDG data path for the catalog file.
    ///
    /// On Unix: `~/.local/share/cq/cards.json`
    /// On macOS: `~/Library/Application Support/cq/cards.json`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(CatalogError::NoDataDir)?;
        Ok(project_dirs.data_dir().join(CATALOG_FILENAME))
    }

    /// Returns the path to the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the catalog file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads every card in the catalog, in file order.
    ///
    /// # Errors
    ///
    /// - Returns `CatalogError::ReadError` if the file cannot be read.
    /// - Returns `CatalogError::Json` if the file is not a JSON array of cards.
    pub fn load(&self) -> Result<Vec<Card>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| CatalogError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&contents)?;
        let cards: Vec<Card> = entries.into_iter().map(Card::from).collect();
        debug!(path = %self.path.display(), count = cards.len(), "Loaded catalog");
        Ok(cards)
    }

    /// Loads the catalog, returning no cards if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `CatalogError::ReadError` for I/O errors other than "file not found".
    /// - Returns `CatalogError::Json` if the file contains invalid JSON.
    pub fn load_or_default(&self) -> Result<Vec<Card>> {
        match self.load() {
            Ok(cards) => Ok(cards),
            Err(CatalogError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Writes the cards to disk as pretty-printed JSON.
    ///
    /// Creates the parent directory if needed and writes through a temporary
    /// file so a crash never leaves a half-written catalog.
    ///
    /// # Errors
    ///
    /// - Returns `CatalogError::WriteError` if the file or directory cannot be written.
    /// - Returns `CatalogError::Json` if serialization fails.
    pub fn save(&self, cards: &[Card]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CatalogError::WriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(cards)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| CatalogError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| CatalogError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}
