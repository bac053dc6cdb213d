//! JSON file repository for the endpoint store.

use super::blocking::run_blocking;
use super::persisted::{decode_store, encode_store};
use crate::config::RelayConfig;
use crate::endpoint::domain::EndpointStore;
use crate::endpoint::ports::{
    EndpointStoreError, EndpointStoreRepository, EndpointStoreResult, LoadOutcome,
};
use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File name of the persisted store inside the configuration directory.
pub const STORE_FILE_NAME: &str = "vaults.json";

/// Endpoint store persisted as one pretty-printed JSON document.
///
/// Saves write a sibling temporary file, flush it to disk, and rename it
/// over the store file, so readers see either the old or the new document.
#[derive(Debug, Clone)]
pub struct JsonFileEndpointStore {
    dir: PathBuf,
    file_name: String,
}

impl JsonFileEndpointStore {
    /// Creates a repository for the store file described by `config`.
    #[must_use]
    pub fn new(config: &RelayConfig) -> Self {
        Self::in_dir(config.config_dir(), STORE_FILE_NAME)
    }

    /// Creates a repository for `file_name` inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Returns the full path of the store file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

#[async_trait]
impl EndpointStoreRepository for JsonFileEndpointStore {
    async fn load(&self) -> EndpointStoreResult<LoadOutcome> {
        let dir = self.dir.clone();
        let file_name = self.file_name.clone();
        let path = self.path();

        let Some(bytes) = run_blocking(move || read_store_bytes(&dir, &file_name)).await? else {
            tracing::debug!(path = %path.display(), "no endpoint store on disk");
            return Ok(LoadOutcome::loaded(EndpointStore::empty()));
        };

        let decoded = String::from_utf8(bytes)
            .map_err(|err| err.to_string())
            .and_then(|text| decode_store(&text).map_err(|err| err.to_string()));
        match decoded {
            Ok(store) => {
                tracing::debug!(
                    path = %path.display(),
                    endpoints = store.len(),
                    "loaded endpoint store"
                );
                Ok(LoadOutcome::loaded(store))
            }
            Err(reason) => {
                let warning = format!(
                    "ignoring malformed endpoint store at {}: {reason}",
                    path.display()
                );
                tracing::warn!(path = %path.display(), error = %reason, "ignoring malformed endpoint store");
                Ok(LoadOutcome::recovered(warning))
            }
        }
    }

    async fn save(&self, store: &EndpointStore) -> EndpointStoreResult<()> {
        let text = encode_store(store).map_err(EndpointStoreError::serialization)?;
        let dir = self.dir.clone();
        let file_name = self.file_name.clone();

        run_blocking(move || write_store_text(&dir, &file_name, &text)).await?;
        tracing::debug!(
            path = %self.path().display(),
            endpoints = store.len(),
            "saved endpoint store"
        );
        Ok(())
    }
}

/// Reads the raw store file, treating a missing directory or file as absent.
fn read_store_bytes(path: &Path, file_name: &str) -> EndpointStoreResult<Option<Vec<u8>>> {
    let dir = match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(EndpointStoreError::io(err)),
    };

    match dir.read(file_name) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(EndpointStoreError::io(err)),
    }
}

fn write_store_text(path: &Path, file_name: &str, text: &str) -> EndpointStoreResult<()> {
    Dir::create_ambient_dir_all(path, ambient_authority()).map_err(EndpointStoreError::io)?;
    let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(EndpointStoreError::io)?;

    let temp_name = format!(".{file_name}.{}.tmp", std::process::id());
    let result = write_and_sync(&dir, &temp_name, text)
        .and_then(|()| dir.rename(&temp_name, &dir, file_name));
    if let Err(err) = result {
        if let Err(cleanup) = dir.remove_file(&temp_name) {
            tracing::debug!(error = %cleanup, "could not remove temporary store file");
        }
        return Err(EndpointStoreError::io(err));
    }
    Ok(())
}

fn write_and_sync(dir: &Dir, name: &str, text: &str) -> std::io::Result<()> {
    let mut file = dir.create(name)?;
    file.write_all(text.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()
}
