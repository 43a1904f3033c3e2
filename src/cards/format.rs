/*!
 * Assembly of Anki import lines from parsed word data.
 *
 * A card line is `<front>;<back>`. The front carries the translation side,
 * the back the German side. Media tags are spliced in at the start of each
 * side once the files exist, so formatting stays independent of media
 * generation.
 */

use crate::cards::model::{WordData, WordType};

/// The two text sides of a card, before media tags are added
#[derive(Debug, Clone, PartialEq)]
pub struct CardText {
    /// Translation side (question)
    pub front: String,
    /// German side (answer)
    pub back: String,
}

/// Build both card sides from parsed word data.
pub fn format_card(data: &WordData) -> CardText {
    let mut front = data.word_translation.clone();
    if !data.translation.is_empty() {
        front.push_str("<br><br>");
        front.push_str(&data.translation);
    }

    let core = match data.word_type {
        WordType::Noun => noun_core(data),
        WordType::Verb => verb_core(data),
        _ => data.word.clone(),
    };

    let mut parts: Vec<String> = Vec::new();
    if !core.is_empty() {
        parts.push(core);
    }
    if !data.phrase.is_empty() {
        parts.push(data.phrase.clone());
    }
    if !data.related_words.is_empty() {
        parts.push(format!("Related: {}", data.related_words));
    }
    if !data.additional_info.is_empty() {
        parts.push(format!("Info: {}", data.additional_info));
    }

    CardText {
        front,
        back: parts.join("<br><br><br>"),
    }
}

/// Noun core: colored article when the gender is known, plural in
/// parentheses when reported.
fn noun_core(data: &WordData) -> String {
    let mut core = match data.gender {
        Some(gender) => format!("{} {}", gender.colored_article(), data.word),
        None => data.word.clone(),
    };
    if !data.plural.is_empty() {
        core.push_str(&format!(" ({})", data.plural));
    }
    core
}

/// Verb core: infinitive, then conjugation and case lines when reported.
fn verb_core(data: &WordData) -> String {
    let mut core = data.word.clone();
    if !data.conjugation.is_empty() {
        core.push_str(&format!("<br><br><br>Conj: {}", data.conjugation));
    }
    if !data.case_info.is_empty() {
        core.push_str(&format!("<br><br><br>Case: {}", data.case_info));
    }
    core
}

/// Anki audio marker for a media file name (with extension)
pub fn sound_tag(file_name: &str) -> String {
    format!("[sound:{}]", file_name)
}

/// Anki image marker for a media file name (with extension)
pub fn image_tag(file_name: &str) -> String {
    format!("<img src=\"{}\"><br>", file_name)
}

/// Final import line: image ahead of the front, audio ahead of the back.
/// Either tag may be empty when that medium was skipped.
pub fn assemble_line(card: &CardText, img_tag: &str, audio_tag: &str) -> String {
    format!("{}{};{}{}", img_tag, card.front, audio_tag, card.back)
}
