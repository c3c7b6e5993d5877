use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module normalizes the language tags found in subtitle file names and
/// the language codes reported by the player. The player reports ISO 639-2/B
/// codes ("fre", "ger"), file names use anything from ISO 639-1 to English
/// language names, so everything goes through `isolang` first.

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("dut", "nld"),
    ("fre", "fra"),
    ("geo", "kat"),
    ("ger", "deu"),
    ("gre", "ell"),
    ("ice", "isl"),
    ("mac", "mkd"),
    ("mao", "mri"),
    ("may", "msa"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("tib", "bod"),
    ("wel", "cym"),
];

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

fn part2t_to_part2b(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(_, t)| *t == code)
        .map(|(b, _)| *b)
}

/// Resolve a code or English language name to an `isolang` language
fn lookup(code: &str) -> Option<Language> {
    let trimmed = code.trim();
    let normalized_code = trimmed.to_lowercase();

    match normalized_code.len() {
        0 => None,
        2 => Language::from_639_1(&normalized_code),
        3 => {
            let part2t = part2b_to_part2t(&normalized_code).unwrap_or(&normalized_code);
            Language::from_639_3(part2t)
        }
        _ => {
            // English names, e.g. "Movie.English.srt"
            let mut chars = normalized_code.chars();
            let capitalized = match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => return None,
            };
            Language::from_name(trimmed).or_else(|| Language::from_name(&capitalized))
        }
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    lookup(code)
        .map(|lang| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-2/B (3-letter) format
///
/// This is the form the player uses when it reports the current subtitle
/// language, so it is the canonical form for comparing file name tags.
pub fn normalize_to_part2b(code: &str) -> Result<String> {
    let part2t = normalize_to_part2t(code)?;
    Ok(part2t_to_part2b(&part2t)
        .map(str::to_string)
        .unwrap_or(part2t))
}

/// Convert a language code to its ISO 639-1 (2-letter) country-style code
///
/// Returns an empty string when the language is unknown or has no ISO 639-1
/// code; callers treat that like "no hint".
pub fn to_part1(code: &str) -> String {
    lookup(code)
        .and_then(|lang| lang.to_639_1())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = lookup(code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}
