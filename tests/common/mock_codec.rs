/*!
 * Mock codec implementation for testing
 *
 * Decodes any text file into a document with two styles and one event per
 * non-empty line, and encodes a minimal ASS-like file whose first line is
 * the header notice. Calls are recorded so tests can check the encoding and
 * frame rate the pipeline passed along.
 */

use std::cell::RefCell;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use subcustomizer::document::{SubtitleCodec, SubtitleDocument, SubtitleEvent};
use subcustomizer::errors::CodecError;
use subcustomizer::style::{Color, StyleRecord};

/// Arguments of one codec call
#[derive(Debug, Clone, PartialEq)]
pub struct CodecCall {
    pub path: PathBuf,
    pub encoding: String,
    pub frames_per_second: f64,
}

/// Style a source author might have written, far from the forced values
pub fn authored_style(font_name: &str) -> StyleRecord {
    StyleRecord {
        font_name: font_name.to_string(),
        font_size: 72.0,
        primary_color: Color::new(10, 20, 30, 40),
        secondary_color: Color::new(10, 20, 30, 40),
        tertiary_color: Color::new(10, 20, 30, 40),
        outline_color: Color::new(10, 20, 30, 40),
        back_color: Color::new(10, 20, 30, 40),
        bold: true,
        italic: true,
        underline: true,
        strikeout: true,
        scale_x: 150.0,
        scale_y: 80.0,
        spacing: 3.5,
        angle: 12.0,
        border_style: 3,
        outline: 9.0,
        shadow: 9.0,
        alignment: 7,
        margin_l: 1,
        margin_r: 2,
        margin_v: 3,
        encoding: 128,
    }
}

/// In-memory stand-in for the subtitle library
#[derive(Debug, Default)]
pub struct MockCodec {
    pub fail_decode: bool,
    pub fail_encode: bool,
    pub decoded: RefCell<Vec<CodecCall>>,
    pub encoded: RefCell<Vec<CodecCall>>,
    pub last_document: RefCell<Option<SubtitleDocument>>,
}

impl MockCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_encode() -> Self {
        Self {
            fail_encode: true,
            ..Self::default()
        }
    }

    pub fn failing_decode() -> Self {
        Self {
            fail_decode: true,
            ..Self::default()
        }
    }

    fn style_line(name: &str, style: &StyleRecord) -> String {
        format!(
            "Style: {},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            name,
            style.font_name,
            style.font_size,
            style.primary_color.to_ass(),
            style.secondary_color.to_ass(),
            style.outline_color.to_ass(),
            style.back_color.to_ass(),
            if style.bold { -1 } else { 0 },
            if style.italic { -1 } else { 0 },
            if style.underline { -1 } else { 0 },
            if style.strikeout { -1 } else { 0 },
            style.scale_x,
            style.scale_y,
            style.spacing,
            style.angle,
            style.border_style,
            style.outline,
            style.shadow,
            style.alignment,
            style.margin_l,
            style.margin_r,
            style.margin_v,
        ) + &format!(",{}", style.encoding)
    }
}

impl SubtitleCodec for MockCodec {
    fn decode(&self, path: &Path, encoding: &str, frames_per_second: f64) -> Result<SubtitleDocument, CodecError> {
        self.decoded.borrow_mut().push(CodecCall {
            path: path.to_path_buf(),
            encoding: encoding.to_string(),
            frames_per_second,
        });

        if self.fail_decode {
            return Err(CodecError::Decode {
                path: path.to_path_buf(),
                message: "malformed subtitle".to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| CodecError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let events = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(i, line)| SubtitleEvent {
                start_ms: i as u64 * 1000,
                end_ms: i as u64 * 1000 + 900,
                style: "Default".to_string(),
                text: line.to_string(),
            })
            .collect();

        Ok(SubtitleDocument {
            info: vec![("ScriptType".to_string(), "v4.00+".to_string())],
            styles: vec![
                ("Default".to_string(), authored_style("Comic Sans MS")),
                ("Signs".to_string(), authored_style("Impact")),
            ],
            events,
        })
    }

    fn encode(
        &self,
        document: &SubtitleDocument,
        path: &Path,
        encoding: &str,
        frames_per_second: f64,
        header_notice: &str,
    ) -> Result<(), CodecError> {
        self.encoded.borrow_mut().push(CodecCall {
            path: path.to_path_buf(),
            encoding: encoding.to_string(),
            frames_per_second,
        });
        *self.last_document.borrow_mut() = Some(document.clone());

        let mut out = String::new();
        let _ = writeln!(out, "; {}", header_notice);
        let _ = writeln!(out, "[Script Info]");
        for (key, value) in &document.info {
            let _ = writeln!(out, "{}: {}", key, value);
        }
        let _ = writeln!(out, "\n[V4+ Styles]");
        for (name, style) in &document.styles {
            let _ = writeln!(out, "{}", Self::style_line(name, style));
        }

        if self.fail_encode {
            // Leave a half-written file behind, like a crash mid-write would
            let _ = fs::write(path, &out);
            return Err(CodecError::Encode {
                path: path.to_path_buf(),
                message: "disk full".to_string(),
            });
        }

        let _ = writeln!(out, "\n[Events]");
        for event in &document.events {
            let _ = writeln!(out, "Dialogue: 0,{},{},{},{}", event.start_ms, event.end_ms, event.style, event.text);
        }

        fs::write(path, out).map_err(|e| CodecError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
