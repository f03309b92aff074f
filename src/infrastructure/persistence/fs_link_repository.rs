//! Filesystem implementation of link repository.

use async_trait::async_trait;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::domain::entities::{Link, SpecialCode};
use crate::domain::repositories::LinkRepository;
use crate::error::StoreError;
use crate::utils::code_generator::validate_code;

/// Link storage with one regular file per code.
///
/// The file name is the code and the file content is the target. The
/// filesystem is the uniqueness authority: creation uses `O_CREAT | O_EXCL`
/// so two concurrent writers for the same code cannot both succeed.
#[derive(Debug, Clone)]
pub struct FsLinkRepository {
    root: PathBuf,
}

impl FsLinkRepository {
    /// Creates a repository rooted at `root`. The directory is not checked
    /// here; configuration validation does that once at startup.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `code` to its file path, refusing anything that is not a
    /// single safe path component.
    fn path_for(&self, code: &str) -> Result<PathBuf, StoreError> {
        validate_code(code).map_err(|_| StoreError::InvalidCode(code.to_string()))?;
        Ok(self.root.join(code))
    }

    /// Overwrites the target of an operator-managed special code.
    ///
    /// Only [`SpecialCode::Root`] and [`SpecialCode::Fallback`] are backed by
    /// files; the other special codes are refused.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCode`] for special codes without a file.
    /// Returns [`StoreError::Io`] if the write fails.
    pub async fn write_special(&self, code: SpecialCode, target: &str) -> Result<(), StoreError> {
        match code {
            SpecialCode::Root | SpecialCode::Fallback => {}
            SpecialCode::List | SpecialCode::DefaultNotifyDir => {
                return Err(StoreError::InvalidCode(code.to_string()));
            }
        }

        let path = self.path_for(code.as_str())?;
        fs::write(&path, format!("{}\n", target.trim())).await?;
        Ok(())
    }
}

fn map_read_error(e: io::Error) -> StoreError {
    match e.kind() {
        ErrorKind::NotFound | ErrorKind::IsADirectory => StoreError::NotFound,
        _ => StoreError::Io(e),
    }
}

#[async_trait]
impl LinkRepository for FsLinkRepository {
    async fn read(&self, code: &str) -> Result<String, StoreError> {
        let path = self.path_for(code)?;

        let bytes = fs::read(&path).await.map_err(map_read_error)?;
        let target = String::from_utf8(bytes)
            .map_err(|e| StoreError::Io(io::Error::new(ErrorKind::InvalidData, e)))?;

        Ok(target.trim().to_string())
    }

    async fn create_exclusive(&self, code: &str, target: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(code)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StoreError::AlreadyExists,
                _ => StoreError::Io(e),
            })?;

        let written = async {
            file.write_all(target).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            // Leave no half-written link behind; the code stays free.
            if let Err(cleanup) = fs::remove_file(&path).await {
                warn!("Failed to remove partial link file {}: {}", path.display(), cleanup);
            }
            return Err(StoreError::Io(e));
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Link>, StoreError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut links = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let code = entry.file_name().to_string_lossy().into_owned();

            match entry.file_type().await {
                Ok(ft) if ft.is_dir() => continue,
                Ok(_) => {}
                Err(e) => {
                    links.push(Link::unreadable(code, e));
                    continue;
                }
            }

            let link = match self.read(&code).await {
                Ok(target) => Link::new(code, &target),
                Err(e) => Link::unreadable(code, e),
            };
            links.push(link);
        }

        links.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(links)
    }
}
