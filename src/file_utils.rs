use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::locator::DirectoryEntry;

// @module: File and directory utilities

/// Marker between the tool name and the original name of a derivative
pub const DERIVATIVE_INFIX: &str = "_modified_";

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
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// List the files of a directory, non-recursively, sorted by file name
    ///
    /// The sort gives the locator's tie-break a stable order independent of
    /// the platform's enumeration order.
    pub fn list_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<DirectoryEntry>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref())
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.context("Failed to read directory entry")?;
            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = entry
                .metadata()
                .with_context(|| format!("Failed to read metadata: {:?}", entry.path()))?;
            let modified = metadata
                .modified()
                .with_context(|| format!("Failed to read modification time: {:?}", entry.path()))?;

            result.push(DirectoryEntry::new(
                entry.file_name().to_string_lossy().to_string(),
                DateTime::<Utc>::from(modified),
            ));
        }

        Ok(result)
    }

    // @generates: Path of the derivative produced from `original`
    // @params: original, output_dir, tool_name, extension
    pub fn derivative_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        original: P1,
        output_dir: P2,
        tool_name: &str,
        extension: &str,
    ) -> PathBuf {
        let stem = original.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = String::from(tool_name);
        output_filename.push_str(DERIVATIVE_INFIX);
        output_filename.push_str(&stem.to_string_lossy());
        output_filename.push('.');
        output_filename.push_str(extension);

        output_dir.as_ref().join(output_filename)
    }

    /// Copy a file from one location to another, ensuring the target directory exists
    pub fn copy_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> Result<()> {
        let from = from.as_ref();
        let to = to.as_ref();

        if !from.exists() {
            return Err(anyhow::anyhow!("Source file does not exist: {:?}", from));
        }

        if let Some(parent) = to.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::copy(from, to)
            .with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;

        Ok(())
    }

    /// Temporary file inside `dir`, removed on drop unless persisted
    pub fn temp_file_in<P: AsRef<Path>>(dir: P, suffix: &str) -> Result<NamedTempFile> {
        let dir = dir.as_ref();
        Self::ensure_dir(dir)?;

        tempfile::Builder::new()
            .prefix(".partial-")
            .suffix(suffix)
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", dir))
    }

    /// Move a finished temporary file to its final path, replacing any old file
    pub fn persist<P: AsRef<Path>>(temp: NamedTempFile, path: P) -> Result<()> {
        let path = path.as_ref();
        temp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to move output into place: {:?}", path))?;
        Ok(())
    }

    /// Write a string to a file through a temporary sibling
    pub fn write_atomically<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = Self::temp_file_in(dir, ".tmp")?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to file: {:?}", path))?;
        Self::persist(temp, path)
    }
}
