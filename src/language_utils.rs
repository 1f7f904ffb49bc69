use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for the codes sent to the translation services
///
/// The translation API is addressed with 2-letter codes (`src=cs&tgt=en`),
/// while users tend to type whatever they are used to. This module validates
/// ISO 639-1 and ISO 639-2 codes and folds them to the 2-letter form.
/// Three-letter codes are only accepted for languages that have a 2-letter
/// code, so anything that validates can be sent.

/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

// ISO 639-2/B codes that differ from their 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
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
    ("may", "msa"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

fn terminological_for(bibliographic: &str) -> Option<&'static str> {
    BIBLIOGRAPHIC_CODES
        .iter()
        .find(|(b, _)| *b == bibliographic)
        .map(|(_, t)| *t)
}

// ISO 639-3 also covers languages outside ISO 639-2; those have no 2-letter form
fn with_part1(lang: Language) -> Option<Language> {
    lang.to_639_1().map(|_| lang)
}

fn lookup(code: &str) -> Option<(Language, LanguageCodeType)> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized).map(|l| (l, LanguageCodeType::Part1)),
        3 => Language::from_639_3(&normalized)
            .and_then(with_part1)
            .map(|l| (l, LanguageCodeType::Part2T))
            .or_else(|| {
                terminological_for(&normalized)
                    .and_then(Language::from_639_3)
                    .and_then(with_part1)
                    .map(|l| (l, LanguageCodeType::Part2B))
            }),
        _ => None,
    }
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    lookup(code)
        .map(|(_, kind)| kind)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-1 (2-letter) format
pub fn normalize_to_part1(code: &str) -> Result<String> {
    lookup(code)
        .and_then(|(lang, _)| lang.to_639_1())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let (lang, _) = lookup(code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}
