/*!
 * Tests for language utility functions
 */

use subcustomizer::language_utils::{get_language_name, normalize_to_part2b, normalize_to_part2t, to_part1};

/// Test normalization of language codes to ISO 639-2/T format
#[test]
fn test_normalize_to_part2t_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("fr").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("eng").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");

    // Case insensitivity
    assert_eq!(normalize_to_part2t("EN").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("FRE").unwrap(), "fra");

    // Whitespace
    assert_eq!(normalize_to_part2t(" en ").unwrap(), "eng");
}

/// The player reports bibliographic codes, so file tags are compared in that form
#[test]
fn test_normalize_to_part2b_withAnyForm_shouldReturnBibliographicCode() {
    assert_eq!(normalize_to_part2b("fr").unwrap(), "fre");
    assert_eq!(normalize_to_part2b("fra").unwrap(), "fre");
    assert_eq!(normalize_to_part2b("fre").unwrap(), "fre");
    assert_eq!(normalize_to_part2b("de").unwrap(), "ger");
    assert_eq!(normalize_to_part2b("zh").unwrap(), "chi");
    assert_eq!(normalize_to_part2b("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2b("English").unwrap(), "eng");
    assert_eq!(normalize_to_part2b("french").unwrap(), "fre");
}

#[test]
fn test_normalize_withInvalidCodes_shouldReturnError() {
    assert!(normalize_to_part2t("").is_err());
    assert!(normalize_to_part2t("x").is_err());
    assert!(normalize_to_part2t("xx").is_err());
    assert!(normalize_to_part2b("forced").is_err());
    assert!(normalize_to_part2b("Klingonese").is_err());
}

#[test]
fn test_to_part1_withKnownAndUnknownCodes_shouldReturnTwoLetterOrEmpty() {
    assert_eq!(to_part1("eng"), "en");
    assert_eq!(to_part1("gre"), "el");
    assert_eq!(to_part1("jpn"), "ja");
    assert_eq!(to_part1("pl"), "pl");
    assert_eq!(to_part1(""), "");
    assert_eq!(to_part1("xyz"), "");
}

/// Test retrieval of language names from codes
#[test]
fn test_get_language_name_withValidCodes_shouldReturnCorrectName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert_eq!(get_language_name("fre").unwrap(), "French");
    assert_eq!(get_language_name("de").unwrap(), "German");
    assert!(get_language_name("invalid").is_err());
}
