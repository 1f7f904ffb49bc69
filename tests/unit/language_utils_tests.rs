/*!
 * Tests for language utility functions
 */

use transfix::language_utils::{
    get_language_name, normalize_to_part1, validate_language_code, LanguageCodeType,
};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    assert_eq!(validate_language_code("cs").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("ces").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("eng").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("cze").unwrap(), LanguageCodeType::Part2B);
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);

    // Whitespace and case
    assert_eq!(validate_language_code(" CS ").unwrap(), LanguageCodeType::Part1);
}

#[test]
fn test_validate_language_code_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("english").is_err());
}

#[test]
fn test_normalize_to_part1_shouldFoldToTwoLetters() {
    assert_eq!(normalize_to_part1("eng").unwrap(), "en");
    assert_eq!(normalize_to_part1("fre").unwrap(), "fr");
    assert_eq!(normalize_to_part1("EN").unwrap(), "en");
    assert!(normalize_to_part1("zz").is_err());
}

#[test]
fn test_normalize_to_part1_withThreeLetterOnlyLanguage_shouldFail() {
    assert!(validate_language_code("yue").is_err());
    assert!(normalize_to_part1("yue").is_err());
    assert!(normalize_to_part1("haw").is_err());
}

#[test]
fn test_get_language_name_shouldReturnEnglishName() {
    assert_eq!(get_language_name("cs").unwrap(), "Czech");
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert!(get_language_name("xx").is_err());
}
