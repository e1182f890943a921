use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;

use crate::errors::ImportError;

// @module: File, directory and URI utilities

/// Extension of TXML files
pub const TXML_EXTENSION: &str = "txml";

/// Where the bytes of a TXML file come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Local file system path
    Path(PathBuf),
    /// `http` or `https` URI
    Remote(Url),
}

impl Location {
    // @parses: Path, file URI or http(s) URI
    pub fn parse(location: &str) -> Result<Self, ImportError> {
        match Url::parse(location) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(Self::Remote(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::Path)
                .map_err(|_| ImportError::File(format!("Invalid file URI: {}", location))),
            // Anything else, including Windows drive letters, is a local path
            _ => Ok(Self::Path(PathBuf::from(location))),
        }
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a whole file into memory
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, ImportError> {
        let path = path.as_ref();
        fs::read(path).map_err(|e| ImportError::File(format!("Failed to read file {:?}: {}", path, e)))
    }

    /// Fetch the body of an `http(s)` URI
    pub async fn fetch_bytes(url: &Url) -> Result<Vec<u8>, ImportError> {
        debug!("Fetching {}", url);
        let response = reqwest::get(url.clone()).await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    /// Bytes of a local path or remote URI
    pub async fn load_bytes(location: &str) -> Result<Vec<u8>, ImportError> {
        match Location::parse(location)? {
            Location::Remote(url) => Self::fetch_bytes(&url).await,
            Location::Path(path) => tokio::fs::read(&path)
                .await
                .map_err(|e| ImportError::File(format!("Failed to read file {:?}: {}", path, e))),
        }
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let wanted = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(wanted) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// All TXML files below a directory, sorted by path
    pub fn find_txml_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        Self::find_files(dir, TXML_EXTENSION)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
