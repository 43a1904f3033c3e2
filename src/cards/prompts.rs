/*!
 * Prompt templates for the language model.
 *
 * The system prompt is chosen per word from surface features: likely verbs
 * get the conjugation oriented template, likely nouns the gender and plural
 * oriented one, everything else a general template. The reply format the
 * templates demand is what `cards::parser` understands.
 */

use crate::cards::model::WordData;

const VERB_PROMPT: &str = r#"You are a German language expert assistant. For the German verb provided, generate:
1. A detailed English translation of the verb (1-2 phrases maximum explaining the meaning more precisely)
2. An example German sentence using the verb.
3. Ensure the verb is used in its proper form—respecting whether it is trennbar (separable) or nicht trennbar (inseparable)—within the sentence.
4. An accurate English translation of that sentence
5. The 3rd person singular (er/sie/es) conjugation for Präsens, Perfekt (including auxiliary verb), and Präteritum, separated by commas. Example: er geht, er ist gegangen, er ging
6. Whether the verb requires accusative, dative, or both cases
7. The word type (verb) and any subtypes (regular, separable, reflexive, etc.)
8. Related German words (3-5 words maximum) with their English translations in parentheses, e.g., "kaufen (to buy), Verkauf (sale), einkaufen (to shop)"
9. Any additional relevant information about usage, nuances, or special considerations

Format your response exactly like this:
Word type: verb, [subtype if applicable]
Word translation: <detailed translation with 1-2 phrases maximum>
German sentence: <sentence>
English translation: <translation>
Conjugation: <er form präsens>, <er form perfekt>, <er form präteritum>
Case: <Akkusativ/Dativ/Both>
Related words: <list of 5 related German words with English translations in parentheses>
Additional info: <any relevant usage information or nuances>

Keep responses concise and grammatically correct."#;

const NOUN_PROMPT: &str = r#"You are a German language expert assistant. For the German noun provided, generate:
1. A detailed English translation of the noun (1-2 phrases maximum explaining the meaning more precisely)
2. An example German sentence using the noun
3. An accurate English translation of that sentence
4. The gender of the noun (masculine, feminine, neuter)
5. The plural form of the noun
6. The word type (noun)
7. Related German words (3-5 words maximum) with their English translations in parentheses, e.g., "Buch (book), Buchhandlung (bookstore), Bücherei (library)"
8. Any additional relevant information about usage, nuances, or special considerations

Format your response exactly like this:
Word type: noun
Gender: <masculine/feminine/neuter>
Plural form: <plural>
Word translation: <detailed translation with 1-2 phrases maximum>
German sentence: <sentence>
English translation: <translation>
Related words: <list of 5 related German words with English translations in parentheses>
Additional info: <any relevant usage information or nuances>

Keep responses concise and grammatically correct."#;

const GENERAL_PROMPT: &str = r#"You are a German language expert AI that efficiently analyzes and provides key information about German words. For each given German word, analyze and return the following information in this exact format:

Word type: <adjective/adverb/preposition/etc.>
Word translation: <detailed translation with 1-2 phrases maximum>
German sentence: <sentence>
English translation: <translation>
Related words: <list of 5 related German words, each with its English translation in parentheses, e.g., "Buchstabe (letter), Buchstabieren (to spell)">
Additional info: <any relevant grammar information or usage nuances>

Keep responses concise and grammatically correct."#;

/// Pick the system prompt for a word from its surface shape.
///
/// The verb check runs first, so a capitalized word ending in `-en` is
/// still treated as a verb candidate.
pub fn select_system_prompt(word: &str) -> &'static str {
    if looks_like_verb(word) {
        VERB_PROMPT
    } else if looks_like_noun(word) {
        NOUN_PROMPT
    } else {
        GENERAL_PROMPT
    }
}

/// German infinitives end in -n (-en, -eln, -ern)
fn looks_like_verb(word: &str) -> bool {
    word.to_lowercase().ends_with('n') && word.chars().count() > 2
}

/// An article prefix or a leading capital suggests a noun
fn looks_like_noun(word: &str) -> bool {
    let lowered = word.to_lowercase();
    ["der ", "die ", "das "].iter().any(|a| lowered.starts_with(a))
        || word.chars().next().is_some_and(char::is_uppercase)
}

/// User message carrying the word itself
pub fn user_prompt(word: &str) -> String {
    format!("Generate information for the German word: {}", word)
}

/// System prompt for translating the English card content into another
/// target language. The German fields are quoted so the model keeps them.
pub fn translation_prompt(data: &WordData, target_language: &str) -> String {
    format!(
        r#"You are a professional translator. Translate the following English content to {target_language}.
Keep the original German word unchanged and translate only the English text.

Original German word: {word}

English content to translate:
- Word translation: {word_translation}
- English translation: {translation}
- Related words: {related_words}
- Additional info: {additional_info}

Translate the content and format your response exactly like this:
Word translation: <translated word translation>
English translation: <translated sentence translation>
Related words: <translated related words with {target_language} translations in parentheses>
Additional info: <translated additional info>

Keep the same structure and meaning, but translate to {target_language}."#,
        target_language = target_language,
        word = data.word,
        word_translation = data.word_translation,
        translation = data.translation,
        related_words = data.related_words,
        additional_info = data.additional_info,
    )
}

/// User message for the translation pass
pub fn translation_user_prompt(target_language: &str) -> String {
    format!("Translate the following English content to {}:", target_language)
}

/// Prompt for the image model: a flashcard style illustration of the
/// word's meaning, with the example sentence as extra context when known.
pub fn illustration_prompt(word_translation: &str, sentence_translation: &str) -> String {
    let mut prompt = format!(
        r#"
Create a vibrant, flashcard illustration for the word '{}'.
SCENE DETAILS:
- Create a clear, engaging scene that instantly communicates the word's meaning
- Include characters demonstrating the word through their actions/interactions
- Maintain a clean, uncluttered background to help with focus and memory retention

LEARNING EFFECTIVENESS:
- Position the key concept centrally with strong visual hierarchy
- Include 1-2 distinctive visual elements that serve as memory anchors
- Use color psychology to enhance emotional connection
- Create a visual that works effectively at flashcard size
"#,
        word_translation
    );
    if !sentence_translation.is_empty() {
        prompt.push_str(&format!("\nCONTEXT SENTENCE:\n- {}\n", sentence_translation));
    }
    prompt
}
