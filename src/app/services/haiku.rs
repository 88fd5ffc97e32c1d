use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::text_ops::{syllable_count, word_count};

pub type Haiku = [String; 3];

/// How the three lines of a deletion haiku are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HaikuRule {
    /// 3-5, 4-7 and 3-5 words per line.
    #[default]
    WordRanges,
    /// Exactly 5, 7 and 5 syllables per line (estimated).
    StrictSyllables,
}

impl HaikuRule {
    fn bounds(self) -> [RangeInclusive<usize>; 3] {
        match self {
            Self::WordRanges => [3..=5, 4..=7, 3..=5],
            Self::StrictSyllables => [5..=5, 7..=7, 5..=5],
        }
    }

    /// Size of each line as this rule measures it.
    pub fn measure(self, lines: &[String; 3]) -> [usize; 3] {
        let count: fn(&str) -> usize = match self {
            Self::WordRanges => word_count,
            Self::StrictSyllables => syllable_count,
        };
        [count(&lines[0]), count(&lines[1]), count(&lines[2])]
    }

    pub fn is_valid(self, lines: &[String; 3]) -> bool {
        self.measure(lines)
            .iter()
            .zip(self.bounds())
            .all(|(n, range)| range.contains(n))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::WordRanges => "3-5 / 4-7 / 3-5 words",
            Self::StrictSyllables => "5 / 7 / 5 syllables",
        }
    }
}

/// Haiku prompts shown when a deletion is requested, handed out in file
/// order and starting over after the last one.
#[derive(Debug, Clone, Default)]
pub struct HaikuBank {
    haikus: Vec<Haiku>,
    cursor: usize,
}

impl HaikuBank {
    /// Load haikus from `path`. A missing or unreadable file gives an empty bank.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => {
                let bank = Self::from_text(&text);
                debug!(count = bank.len(), "Loaded haikus");
                bank
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), "Could not read haikus: {}", e);
                Self::default()
            }
        }
    }

    /// Group non-blank lines into threes. A trailing group of one or two
    /// lines is dropped.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let haikus = lines
            .chunks_exact(3)
            .map(|c| [c[0].to_string(), c[1].to_string(), c[2].to_string()])
            .collect();
        Self { haikus, cursor: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.haikus.is_empty()
    }

    pub fn len(&self) -> usize {
        self.haikus.len()
    }

    /// The haiku under the cursor; the cursor then moves on, wrapping.
    pub fn next(&mut self) -> Option<Haiku> {
        if self.haikus.is_empty() {
            return None;
        }
        let haiku = self.haikus[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.haikus.len();
        Some(haiku)
    }
}
