/*!
 * Structured linguistic data for a single vocabulary word.
 */

/// Grammatical category the model assigned to a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordType {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    #[default]
    Other,
}

/// Grammatical gender of a German noun
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Gender {
    /// Definite article for the gender
    pub fn article(self) -> &'static str {
        match self {
            Gender::Masculine => "Der",
            Gender::Feminine => "Die",
            Gender::Neuter => "Das",
        }
    }

    /// Article wrapped in the color span shown on the card back
    pub fn colored_article(self) -> &'static str {
        match self {
            Gender::Masculine => r#"<span style="color: rgb(10, 2, 255)">Der</span>"#,
            Gender::Feminine => r#"<span style="color: rgb(170, 0, 0)">Die</span>"#,
            Gender::Neuter => r#"<span style="color: rgb(0, 255, 51)">Das</span>"#,
        }
    }
}

/// Everything the language model produced for one word.
///
/// Fields the model did not fill stay empty and are skipped by the
/// formatter. Only the word translation is mandatory for a usable card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordData {
    /// The German word as it appeared in the input list
    pub word: String,
    /// Word category, used to pick the card back layout
    pub word_type: WordType,
    /// Noun gender when the model reported one
    pub gender: Option<Gender>,
    /// Noun plural form
    pub plural: String,
    /// Verb conjugation summary (er form Präsens, Perfekt, Präteritum)
    pub conjugation: String,
    /// Cases the verb governs
    pub case_info: String,
    /// Translation of the word itself
    pub word_translation: String,
    /// Example sentence in German
    pub phrase: String,
    /// Translation of the example sentence
    pub translation: String,
    /// Related vocabulary with translations in parentheses
    pub related_words: String,
    /// Usage notes and nuances
    pub additional_info: String,
}

impl WordData {
    /// Empty record for a word, ready to be filled by the parser
    pub fn new(word: impl Into<String>) -> Self {
        WordData {
            word: word.into(),
            ..Default::default()
        }
    }

    /// A reply is usable once it carries at least a word translation
    pub fn has_translation(&self) -> bool {
        !self.word_translation.is_empty()
    }
}
