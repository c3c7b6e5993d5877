/*!
 * Tests for provenance markers and original-path resolution
 */

use anyhow::Result;
use std::cell::Cell;
use std::io;
use std::path::{Path, PathBuf};

use subcustomizer::errors::ProvenanceError;
use subcustomizer::provenance::{LineReader, LossyFileReader, ProvenanceMarker, ToolIdentity, resolve_original};
use crate::common;

fn tool(name: &str) -> ToolIdentity {
    ToolIdentity::new(name, "service.subtitles.test").unwrap()
}

/// Reader serving fixed lines and counting how many were consumed
struct CountingReader {
    lines: Vec<String>,
    consumed: Cell<usize>,
}

impl CountingReader {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            consumed: Cell::new(0),
        }
    }
}

impl LineReader for CountingReader {
    fn read_lines<'a>(&'a self, _path: &Path) -> io::Result<Box<dyn Iterator<Item = io::Result<String>> + 'a>> {
        Ok(Box::new(self.lines.iter().map(move |line| {
            self.consumed.set(self.consumed.get() + 1);
            Ok(line.clone())
        })))
    }
}

#[test]
fn test_resolve_original_withMarkerLine_shouldReturnEmbeddedPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let derivative = common::create_test_file(
        temp_dir.path(),
        "ToolX_modified_Movie.ass",
        "; [ToolX] original_sub <Movie.eng.srt>\n[Script Info]\nScriptType: v4.00+\n",
    )?;

    let original = resolve_original(&derivative, &tool("ToolX"), &LossyFileReader);
    assert_eq!(original, PathBuf::from("Movie.eng.srt"));
    Ok(())
}

#[test]
fn test_resolve_original_withoutMarker_shouldReturnInputPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let plain = common::create_test_file(temp_dir.path(), "Movie.ass", "[Script Info]\nTitle: plain\n")?;

    assert_eq!(resolve_original(&plain, &tool("ToolX"), &LossyFileReader), plain);
    Ok(())
}

#[test]
fn test_resolve_original_withOtherToolsMarker_shouldIgnoreIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let derivative = common::create_test_file(
        temp_dir.path(),
        "Other_modified_Movie.ass",
        "; [OtherTool] original_sub </media/Movie.srt>\n",
    )?;

    assert_eq!(resolve_original(&derivative, &tool("ToolX"), &LossyFileReader), derivative);
    Ok(())
}

#[test]
fn test_resolve_original_withNonDerivativeExtension_shouldNotScan() {
    let reader = CountingReader::new(&["[ToolX] original_sub </media/Movie.srt>"]);
    let path = Path::new("/media/Movie.srt");

    assert_eq!(resolve_original(path, &tool("ToolX"), &reader), path);
    assert_eq!(reader.consumed.get(), 0);
}

#[test]
fn test_resolve_original_withEarlyMarker_shouldStopReading() {
    let reader = CountingReader::new(&[
        "[Script Info]",
        "; [ToolX] original_sub </media/first.srt>",
        "; [ToolX] original_sub </media/second.srt>",
        "Dialogue: 0,0,1,Default,never read",
    ]);

    let original = resolve_original(Path::new("/out/ToolX_modified_first.ass"), &tool("ToolX"), &reader);
    assert_eq!(original, PathBuf::from("/media/first.srt"));
    assert_eq!(reader.consumed.get(), 2);
}

#[test]
fn test_resolve_original_withRegexMetacharactersInName_shouldMatchLiterally() {
    let name = "Subs (v1.2) [beta]+";
    let marker = ProvenanceMarker::new(&tool(name), Path::new("/media/Movie.srt")).unwrap();
    let reader = CountingReader::new(&[
        "; [Subs Xv1.2X [beta]+] original_sub </media/decoy.srt>",
        &format!("; {}", marker.format()),
    ]);

    let original = resolve_original(Path::new("/out/x.ass"), &tool(name), &reader);
    assert_eq!(original, PathBuf::from("/media/Movie.srt"));
}

#[test]
fn test_resolve_original_withInvalidUtf8_shouldSkipMalformedBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.ass");
    let mut content = b"Title: caf\xe9 \xff\xfe\n".to_vec();
    content.extend_from_slice(b"; [ToolX] original_sub </media/Movie.srt>\r\n");
    std::fs::write(&path, content)?;

    assert_eq!(
        resolve_original(&path, &tool("ToolX"), &LossyFileReader),
        PathBuf::from("/media/Movie.srt")
    );
    Ok(())
}

#[test]
fn test_resolve_original_withMissingFile_shouldReturnInputPath() {
    let path = Path::new("/definitely/not/here.ass");
    assert_eq!(resolve_original(path, &tool("ToolX"), &LossyFileReader), path);
}

#[test]
fn test_marker_format_withPath_shouldRoundTripThroughPattern() {
    let tool = tool("ToolX");
    let marker = ProvenanceMarker::new(&tool, Path::new("/media/a <b> c.srt")).unwrap();

    assert_eq!(marker.format(), "[ToolX] original_sub </media/a <b> c.srt>");
    let formatted = marker.format();
    let caps = tool.marker_pattern().captures(&formatted).unwrap();
    assert_eq!(&caps[1], "/media/a <b> c.srt");
}

#[test]
fn test_marker_new_withMultilinePath_shouldFail() {
    let result = ProvenanceMarker::new(&tool("ToolX"), Path::new("/media/a\nb.srt"));
    assert!(matches!(result, Err(ProvenanceError::InvalidOriginalPath(_))));
}

#[test]
fn test_tool_identity_withEmptyOrMultilineName_shouldFail() {
    assert!(matches!(
        ToolIdentity::new("", "id"),
        Err(ProvenanceError::InvalidToolIdentity(_))
    ));
    assert!(matches!(
        ToolIdentity::new("Tool\nX", "id"),
        Err(ProvenanceError::InvalidToolIdentity(_))
    ));
    assert!(ToolIdentity::new("Tool X", "service.tool").is_ok());
}
