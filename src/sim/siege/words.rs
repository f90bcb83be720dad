//! Vocabulary and palette for falling targets

use rand::Rng;

use crate::renderer::{Rgba, colors};

pub const WORDS: [&str; 54] = [
    "const", "let", "var", "function", "return", "interface", "type", "class",
    "import", "export", "default", "async", "await", "promise", "try", "catch",
    "throw", "new", "this", "void", "null", "undefined", "true", "false",
    "if", "else", "switch", "case", "break", "continue", "while", "for",
    "map", "filter", "reduce", "push", "pop", "shift", "unshift", "splice",
    "react", "nextjs", "node", "typescript", "javascript", "css", "html",
    "component", "props", "state", "hook", "effect", "ref", "context",
];

pub const PALETTE: [Rgba; 4] = [
    colors::PRIMARY,
    colors::ACCENT,
    colors::SECONDARY,
    colors::SECONDARY_DARK,
];

pub fn random_word<R: Rng>(rng: &mut R) -> &'static str {
    WORDS[rng.random_range(0..WORDS.len())]
}

pub fn random_color<R: Rng>(rng: &mut R) -> Rgba {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_lowercase_ascii() {
        for word in WORDS {
            assert!(!word.is_empty());
            assert!(word.chars().all(|c| c.is_ascii_lowercase()), "{word}");
        }
    }
}
