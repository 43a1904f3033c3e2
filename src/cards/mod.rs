/*!
 * Card content pipeline for the generated deck.
 *
 * This module turns language model replies into Anki import lines.
 * It is split into several submodules:
 *
 * - `model`: structured linguistic data for a single word
 * - `prompts`: prompt templates and the word type heuristics that pick them
 * - `parser`: parsing of model replies into the data model
 * - `format`: assembly of the semicolon separated import lines
 */

// Re-export main types for easier usage
pub use self::format::{CardText, assemble_line, format_card, image_tag, sound_tag};
pub use self::model::{Gender, WordData, WordType};
pub use self::parser::{parse_reply, parse_translated_reply};

// Submodules
pub mod format;
pub mod model;
pub mod parser;
pub mod prompts;
