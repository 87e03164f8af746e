//! See [`TabStore`].

use std::{
    io,
    path::{Path, PathBuf},
};

use serde_json::Value;
use thiserror::Error;
use tokio::{fs, sync::RwLock};
use tracing::{info, warn};

use crate::tab::default_tabs;

/// The tabs served by the server, held in memory and saved to a JSON file on a best-effort basis.
///
/// The stored value is whatever JSON was last uploaded. It's expected to be an array of
/// [`Tab`](crate::tab::Tab)s, but nothing enforces that.
#[derive(Debug)]
pub struct TabStore {
    /// The current tabs.
    tabs: RwLock<Value>,

    /// The path of the file the tabs are saved to.
    path: PathBuf,
}

/// An error loading or saving the tabs file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The file couldn't be read or written.
    #[error("tabs file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The file's contents weren't valid JSON, or the tabs couldn't be serialized.
    #[error("tabs file JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

impl TabStore {
    /// Constructs a [`TabStore`] holding the specified tabs, saved to the specified path.
    pub fn new<P: Into<PathBuf>>(path: P, tabs: Value) -> Self {
        Self {
            tabs: RwLock::new(tabs),
            path: path.into(),
        }
    }

    /// Loads the tabs from the file at the specified path, falling back to
    /// [`default_tabs`] if the file is missing or invalid.
    pub async fn load<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();

        let tabs = match read_tabs(&path).await {
            Ok(tabs) => {
                info!(path = %path.display(), "Loaded tabs file");
                tabs
            }
            Err(StoreError::Io(error)) if error.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No tabs file found, using default tabs");
                default_tabs_value()
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Unable to load tabs file, using default tabs");
                default_tabs_value()
            }
        };

        Self::new(path, tabs)
    }

    /// Gets the path of the file the tabs are saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current tabs.
    pub async fn tabs(&self) -> Value {
        self.tabs.read().await.clone()
    }

    /// Replaces all the tabs, then tries to save them to the tabs file.
    ///
    /// The in-memory tabs are replaced even if saving fails. Concurrent calls don't coordinate
    /// their file writes, so the file ends up with whichever write finishes last.
    ///
    /// # Errors
    ///
    /// Fails if the tabs couldn't be saved to the file. See [`StoreError`].
    pub async fn replace(&self, tabs: Value) -> Result<(), StoreError> {
        let contents = serde_json::to_vec(&tabs);

        *self.tabs.write().await = tabs;

        fs::write(&self.path, contents?).await?;

        Ok(())
    }
}

/// Reads and parses the tabs file at the specified path.
async fn read_tabs(path: &Path) -> Result<Value, StoreError> {
    let contents = fs::read(path).await?;

    Ok(serde_json::from_slice(&contents)?)
}

/// Gets [`default_tabs`] as a JSON value.
fn default_tabs_value() -> Value {
    serde_json::to_value(default_tabs()).expect("default tabs should be serializable")
}
