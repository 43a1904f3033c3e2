/*!
 * Parsing of language model replies into [`WordData`].
 *
 * Replies are expected to follow the labelled line format the prompts ask
 * for. Lines with unknown labels are ignored, so chatter around the
 * structured block does no harm.
 */

use crate::cards::model::{Gender, WordData, WordType};

/// Parse a content reply into a fresh [`WordData`] for `word`.
/// Fields the reply does not mention stay empty.
pub fn parse_reply(word: &str, reply: &str) -> WordData {
    let mut data = WordData::new(word);

    for line in reply.lines() {
        let line = line.trim();
        if let Some(value) = label_value(line, "Word type:") {
            data.word_type = parse_word_type(value);
        } else if let Some(value) = label_value(line, "Word translation:") {
            data.word_translation = value.to_string();
        } else if let Some(value) = label_value(line, "German sentence:") {
            data.phrase = value.to_string();
        } else if let Some(value) = label_value(line, "English translation:")
            .or_else(|| label_value(line, "Translation:"))
        {
            data.translation = value.to_string();
        } else if let Some(value) = label_value(line, "Conjugation:") {
            data.conjugation = value.to_string();
        } else if let Some(value) = label_value(line, "Case:") {
            data.case_info = value.to_string();
        } else if let Some(value) = label_value(line, "Gender:") {
            data.gender = parse_gender(value);
        } else if let Some(value) = label_value(line, "Plural form:") {
            data.plural = value.to_string();
        } else if let Some(value) = label_value(line, "Additional info:") {
            data.additional_info = value.to_string();
        } else if let Some(value) = label_value(line, "Related words:") {
            data.related_words = value.to_string();
        }
    }

    data
}

/// Fold a translation pass reply into existing word data.
///
/// Only the four translatable fields are replaced; the German word,
/// sentence and grammar fields always stay as generated.
pub fn parse_translated_reply(mut data: WordData, reply: &str) -> WordData {
    for line in reply.lines() {
        let line = line.trim();
        if let Some(value) = label_value(line, "Word translation:") {
            data.word_translation = value.to_string();
        } else if let Some(value) = label_value(line, "English translation:") {
            data.translation = value.to_string();
        } else if let Some(value) = label_value(line, "Related words:") {
            data.related_words = value.to_string();
        } else if let Some(value) = label_value(line, "Additional info:") {
            data.additional_info = value.to_string();
        }
    }
    data
}

fn label_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label).map(str::trim)
}

/// Lenient word type parse: the model sometimes appends subtypes
/// ("verb, separable"), so substring matching is enough.
pub fn parse_word_type(raw: &str) -> WordType {
    let lowered = raw.to_lowercase();
    if lowered.contains("noun") {
        WordType::Noun
    } else if lowered.contains("adverb") {
        // "adverb" also matches "verb", so it is checked first
        WordType::Adverb
    } else if lowered.contains("verb") {
        WordType::Verb
    } else if lowered.contains("adjective") {
        WordType::Adjective
    } else if lowered.contains("preposition") {
        WordType::Preposition
    } else {
        WordType::Other
    }
}

/// Lenient gender parse; anything unrecognized means no gender.
pub fn parse_gender(raw: &str) -> Option<Gender> {
    let lowered = raw.to_lowercase();
    if lowered.contains("masculine") {
        Some(Gender::Masculine)
    } else if lowered.contains("feminine") {
        Some(Gender::Feminine)
    } else if lowered.contains("neuter") {
        Some(Gender::Neuter)
    } else {
        None
    }
}
