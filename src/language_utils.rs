use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for resolving user-supplied language identifiers
///
/// This module accepts ISO 639-1 (2-letter) codes, ISO 639-2 (3-letter)
/// codes and plain English language names, and resolves them to the
/// canonical English name used in the generation prompts.
/// Resolve a language identifier to its English name.
///
/// Accepts "en", "eng", "english" or "English" alike and returns
/// "English" for all of them.
pub fn resolve_language_name(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Empty language identifier"));
    }

    let lowered = trimmed.to_lowercase();
    let by_code = match lowered.chars().count() {
        2 => Language::from_639_1(&lowered),
        3 => Language::from_639_3(&lowered)
            .or_else(|| Language::from_639_3(part2b_to_part2t(&lowered))),
        _ => None,
    };
    if let Some(lang) = by_code {
        return Ok(lang.to_name().to_string());
    }

    // Not a code, try it as an English language name. The name table is
    // title-cased, so "english" needs its first letter raised first.
    Language::from_name(trimmed)
        .or_else(|| Language::from_name(&title_case(trimmed)))
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unrecognized language: {}", input))
}

/// Map an ISO 639-2/B (bibliographic) code to its 639-2/T equivalent.
/// Codes that have no distinct B form pass through unchanged.
fn part2b_to_part2t(code: &str) -> &str {
    match code {
        "fre" => "fra", // French
        "ger" => "deu", // German
        "dut" => "nld", // Dutch
        "gre" => "ell", // Greek
        "chi" => "zho", // Chinese
        "cze" => "ces", // Czech
        "ice" => "isl", // Icelandic
        "alb" => "sqi", // Albanian
        "arm" => "hye", // Armenian
        "baq" => "eus", // Basque
        "bur" => "mya", // Burmese
        "per" => "fas", // Persian
        "geo" => "kat", // Georgian
        "may" => "msa", // Malay
        "mac" => "mkd", // Macedonian
        "rum" => "ron", // Romanian
        "slo" => "slk", // Slovak
        "wel" => "cym", // Welsh
        other => other,
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
