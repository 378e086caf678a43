use std::io;
use std::path::{Path, PathBuf};

/// Maps package ids to staging directories on local disk. All files for one
/// package id live under exactly one directory; the unpacked source tree is
/// placed in a subdirectory named after the package id.
#[derive(Debug)]
pub struct StagingStore {
    root: PathBuf,
}

impl StagingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.root.join(package)
    }

    /// Creates the package's staging directory if it does not exist yet.
    pub async fn ensure_package_dir(&self, package: &str) -> io::Result<PathBuf> {
        let dir = self.package_dir(package);
        tokio::fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Where an uploaded file for this package is stored.
    pub fn upload_path(&self, package: &str, filename: &str) -> PathBuf {
        self.package_dir(package).join(filename)
    }

    /// Deterministic destination the unpack tool extracts into.
    pub fn unpack_dir(&self, package: &str) -> PathBuf {
        self.package_dir(package).join(package)
    }
}
