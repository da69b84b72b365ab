//! The four decision lists.
//!
//! Patterns read thumb, index, middle, ring, pinky. Order is significant:
//! several patterns overlap and only the earliest listed rule can fire.

mod letters_ar;
mod letters_en;
mod words;

pub use letters_ar::AR_LETTERS;
pub use letters_en::EN_LETTERS;
pub use words::{AR_WORDS, EN_WORDS};
