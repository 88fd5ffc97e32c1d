use std::path::Path;

use chrono::NaiveDateTime;

/// Extract the bare filename from a path.
///
/// Returns `None` for paths without a usable final component (`""`, `"."`,
/// `".."`, `"/"`).
pub fn extract_filename(path: &str) -> Option<String> {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .map(|s| s.to_string())
}

/// Name proposed by Save As for a note that has never been saved.
pub fn default_note_name(now: NaiveDateTime, extension: &str) -> String {
    format!("{}.{}", now.format("%Y%m%d_%H%M%S"), extension)
}

/// Render a countdown as `MM:SS`. Minutes keep growing past 59.
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Number of whitespace-separated words.
pub fn word_count(line: &str) -> usize {
    line.split_whitespace().count()
}

/// Rough English syllable estimate: vowel groups per word, minus a silent
/// trailing `e`, at least one per word.
pub fn syllable_count(line: &str) -> usize {
    line.split_whitespace().map(word_syllables).sum()
}

fn word_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    let n = letters.len();
    if n > 2 && letters[n - 1] == 'e' && !is_vowel(letters[n - 2]) && !(letters[n - 2] == 'l' && !is_vowel(letters[n - 3])) {
        groups -= 1;
    }
    groups.max(1)
}
