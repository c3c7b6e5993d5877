/*!
 * Provenance tracking for generated subtitles.
 *
 * Every derivative written by the pipeline starts with a marker line
 * `[<tool>] original_sub <path>` naming the file it was produced from.
 * Resolving a candidate through this module always yields that original,
 * so converting a derivative again never stacks derivatives.
 */

use log::{debug, warn};
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::errors::ProvenanceError;

/// Extension of the files this tool produces, the only ones worth scanning
pub const DERIVATIVE_EXTENSION: &str = "ass";

/// Validated identity of the producing tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolIdentity {
    name: String,
    id: String,
}

impl ToolIdentity {
    /// Create an identity from the add-on display name and add-on id
    pub fn new(name: &str, id: &str) -> Result<Self, ProvenanceError> {
        for value in [name, id] {
            if value.trim().is_empty() || value.contains(['\n', '\r']) {
                return Err(ProvenanceError::InvalidToolIdentity(value.to_string()));
            }
        }

        Ok(Self {
            name: name.to_string(),
            id: id.to_string(),
        })
    }

    /// Name embedded in markers and derivative file names
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add-on id used in plugin URLs
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Pattern matching this tool's marker, capturing the original path
    pub fn marker_pattern(&self) -> Regex {
        // The escaped name contains only literals, so the pattern always compiles
        Regex::new(&format!(r"\[{}\] original_sub <(.+)>\s*$", regex::escape(&self.name)))
            .expect("escaped marker pattern is valid")
    }
}

/// Marker line recording the original of a derivative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceMarker {
    pub tool_name: String,
    pub original_path: PathBuf,
}

impl ProvenanceMarker {
    /// Build a marker, rejecting paths that cannot round-trip on one line
    pub fn new(tool: &ToolIdentity, original_path: &Path) -> Result<Self, ProvenanceError> {
        let text = original_path.to_string_lossy();
        if text.is_empty() || text.contains(['\n', '\r']) {
            return Err(ProvenanceError::InvalidOriginalPath(text.to_string()));
        }

        Ok(Self {
            tool_name: tool.name().to_string(),
            original_path: original_path.to_path_buf(),
        })
    }

    /// Text of the marker line, without line terminator
    pub fn format(&self) -> String {
        format!("[{}] original_sub <{}>", self.tool_name, self.original_path.display())
    }
}

/// Capability to stream the lines of a text file
pub trait LineReader {
    fn read_lines<'a>(&'a self, path: &Path) -> io::Result<Box<dyn Iterator<Item = io::Result<String>> + 'a>>;
}

/// Reads files line by line, dropping bytes that are not valid UTF-8
#[derive(Debug, Default, Clone, Copy)]
pub struct LossyFileReader;

impl LineReader for LossyFileReader {
    fn read_lines<'a>(&'a self, path: &Path) -> io::Result<Box<dyn Iterator<Item = io::Result<String>> + 'a>> {
        let reader = BufReader::new(File::open(path)?);
        Ok(Box::new(reader.split(b'\n').map(|line| {
            line.map(|bytes| {
                String::from_utf8_lossy(&bytes)
                    .chars()
                    .filter(|c| *c != char::REPLACEMENT_CHARACTER)
                    .collect()
            })
        })))
    }
}

fn is_derivative_format(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(DERIVATIVE_EXTENSION))
}

/// Return the original a derivative was produced from, or `path` itself
///
/// Stops at the first marker line. Files that cannot be opened are treated as
/// unmarked, decoding reports the real failure later.
pub fn resolve_original(path: &Path, tool: &ToolIdentity, reader: &dyn LineReader) -> PathBuf {
    if !is_derivative_format(path) {
        return path.to_path_buf();
    }

    let lines = match reader.read_lines(path) {
        Ok(lines) => lines,
        Err(e) => {
            warn!("Cannot scan {:?} for a provenance marker: {}", path, e);
            return path.to_path_buf();
        }
    };

    let pattern = tool.marker_pattern();
    for line in lines {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Stopped scanning {:?}: {}", path, e);
                break;
            }
        };

        if let Some(caps) = pattern.captures(&line) {
            let original = PathBuf::from(&caps[1]);
            debug!("Original subtitle path is: {:?}", original);
            return original;
        }
    }

    path.to_path_buf()
}
