//! Post metadata extraction.
//!
//! Applied identically to thread posts and single posts before they are
//! persisted: a technical-depth estimate, the key concepts the text covers,
//! and any parenthetical prerequisite explanations.

use serde::{Deserialize, Serialize};

/// Vocabulary used to estimate technical depth.
const DEPTH_TERMS: &[&str] = &[
    "buffer overflow",
    "race condition",
    "heap",
    "stack",
    "kernel",
    "syscall",
    "memory corruption",
    "exploit",
    "vulnerability",
    "payload",
    "shellcode",
    "rop chain",
    "sandbox escape",
    "privilege escalation",
];

/// Vocabulary used to tag key concepts; a superset of the depth terms.
const CONCEPT_TERMS: &[&str] = &[
    "buffer overflow",
    "race condition",
    "heap",
    "stack",
    "kernel",
    "syscall",
    "memory corruption",
    "exploit",
    "vulnerability",
    "payload",
    "shellcode",
    "rop chain",
    "sandbox escape",
    "privilege escalation",
    "authentication bypass",
    "remote code execution",
    "zero day",
    "use after free",
    "side channel",
    "type confusion",
    "code injection",
    "deserialization",
];

/// Words marking a parenthetical as a definitional explanation rather than an
/// aside.
const CUE_WORDS: &[&str] = &["is", "are", "means", "when", "how"];

/// Metadata extracted from post content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Estimated technical depth, 1-5
    pub technical_depth: u8,
    /// Concept vocabulary members literally present in the content
    pub key_concepts: Vec<String>,
    /// Lower-cased contents of definitional parentheticals
    pub prerequisites: Vec<String>,
}

/// Extracts all post metadata in one pass.
pub fn annotate(content: &str) -> Annotation {
    Annotation {
        technical_depth: technical_depth(content),
        key_concepts: key_concepts(content),
        prerequisites: prerequisites(content),
    }
}

/// Estimates technical depth on a 1-5 scale from term density.
pub fn technical_depth(content: &str) -> u8 {
    let lower = content.to_lowercase();
    let matched = DEPTH_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .count() as u8;
    (1 + matched / 2).clamp(1, 5)
}

/// Tags the concept vocabulary members literally present in the content.
pub fn key_concepts(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    CONCEPT_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .map(|term| term.to_string())
        .collect()
}

/// Extracts prerequisite explanations from parenthesized spans.
///
/// A span counts as an explanation when it contains one of the definitional
/// cue words as a standalone word; the span content is kept verbatim,
/// lower-cased. Anything else is a non-explanatory aside and is discarded.
pub fn prerequisites(content: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = content;

    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(')') else {
            break;
        };
        let span = after[..close].to_lowercase();
        let explanatory = span
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .any(|word| CUE_WORDS.contains(&word));
        if explanatory {
            found.push(span);
        }
        rest = &after[close + 1..];
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_floor_is_one() {
        assert_eq!(technical_depth("nothing technical here"), 1);
    }

    #[test]
    fn test_depth_scales_with_term_count() {
        // Two terms: 1 + 2/2 = 2
        assert_eq!(technical_depth("heap overflow in the kernel"), 2);
        // Four terms: 1 + 4/2 = 3
        assert_eq!(
            technical_depth("kernel heap exploit with a crafted payload"),
            3
        );
    }

    #[test]
    fn test_depth_caps_at_five() {
        let dense = "buffer overflow race condition heap stack kernel syscall \
                     memory corruption exploit vulnerability payload shellcode";
        assert_eq!(technical_depth(dense), 5);
    }

    #[test]
    fn test_key_concepts_case_insensitive() {
        let concepts = key_concepts("Remote Code Execution via Use After Free");
        assert_eq!(
            concepts,
            vec!["remote code execution".to_string(), "use after free".to_string()]
        );
    }

    #[test]
    fn test_prerequisites_keep_definitional_spans() {
        let text = "ASLR (which is address randomization) blocks this (mostly)";
        assert_eq!(
            prerequisites(text),
            vec!["which is address randomization".to_string()]
        );
    }

    #[test]
    fn test_prerequisites_cue_word_must_stand_alone() {
        // "this" contains "is" as a substring but not as a word
        assert!(prerequisites("exploit (this one)").is_empty());
    }

    #[test]
    fn test_prerequisites_multiple_spans() {
        let text = "a (heap is dynamic memory) plus b (how ROP works) and (an aside)";
        assert_eq!(
            prerequisites(text),
            vec![
                "heap is dynamic memory".to_string(),
                "how rop works".to_string(),
            ]
        );
    }

    #[test]
    fn test_unclosed_paren_discarded() {
        assert!(prerequisites("dangling (is this ever closed").is_empty());
    }
}
