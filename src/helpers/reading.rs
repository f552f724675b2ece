//! Reading-time estimation

use lazy_static::lazy_static;
use regex::Regex;

use crate::content::ContentSection;

/// Assumed reading speed
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

lazy_static! {
    // ASCII word class: accented letters split words, as the browser regex did
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_]+").unwrap();
}

/// Number of tokens a piece of text splits into
///
/// An empty string still yields a single (empty) token.
pub fn count_tokens(text: &str) -> usize {
    NON_WORD.split(text).count()
}

/// Total tokens across every heading and body block
pub fn count_words(content: &[ContentSection]) -> usize {
    content
        .iter()
        .map(|section| {
            let heading = section.heading.as_deref().map(count_tokens).unwrap_or(0);
            let body: usize = section.body.iter().map(|b| count_tokens(&b.text)).sum();
            heading + body
        })
        .sum()
}

/// Estimated reading time in whole minutes
pub fn estimate(content: &[ContentSection], words_per_minute: u32) -> u64 {
    let words = count_words(content);
    let wpm = words_per_minute.max(1) as f64;
    (words as f64 / wpm).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::RichTextBlock;

    fn section(heading: Option<&str>, body: &[&str]) -> ContentSection {
        ContentSection {
            heading: heading.map(str::to_string),
            body: body.iter().map(|t| RichTextBlock::paragraph(*t)).collect(),
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(estimate(&[], DEFAULT_WORDS_PER_MINUTE), 0);
    }

    #[test]
    fn test_three_words_round_to_zero() {
        let content = [section(Some(""), &["one two three"])];
        // the empty heading counts as one token
        assert_eq!(count_words(&content), 4);
        assert_eq!(estimate(&content, DEFAULT_WORDS_PER_MINUTE), 0);
    }

    #[test]
    fn test_six_hundred_tokens_is_three_minutes() {
        let content = [
            section(Some(words(100).as_str()), &[words(250).as_str()]),
            section(None, &[words(150).as_str(), words(100).as_str()]),
        ];
        assert_eq!(count_words(&content), 600);
        assert_eq!(estimate(&content, DEFAULT_WORDS_PER_MINUTE), 3);
    }

    #[test]
    fn test_rounds_half_up() {
        let content = [section(None, &[words(300).as_str()])];
        assert_eq!(estimate(&content, DEFAULT_WORDS_PER_MINUTE), 2);
        let content = [section(None, &[words(299).as_str()])];
        assert_eq!(estimate(&content, DEFAULT_WORDS_PER_MINUTE), 1);
    }

    #[test]
    fn test_token_rules() {
        assert_eq!(count_tokens(""), 1);
        assert_eq!(count_tokens("one, two...  three"), 3);
        assert_eq!(count_tokens("fim."), 2);
        assert_eq!(count_tokens("não"), 2);
        assert_eq!(count_tokens("snake_case"), 1);
    }

    #[test]
    fn test_custom_speed() {
        let content = [section(None, &[words(100).as_str()])];
        assert_eq!(estimate(&content, 50), 2);
        assert_eq!(estimate(&content, 0), 100);
    }
}
