use std::fs;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::app::infrastructure::error::{AppError, Result};

/// Motivational quotes, one per line of the resource file.
#[derive(Debug, Clone, Default)]
pub struct QuoteBank {
    quotes: Vec<String>,
}

impl QuoteBank {
    /// Load quotes from `path`. A missing or unreadable file gives an empty bank.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => {
                let bank = Self::from_text(&text);
                debug!(count = bank.len(), "Loaded quotes");
                bank
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), "Could not read quotes: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_text(text: &str) -> Self {
        let quotes = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Self { quotes }
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn quotes(&self) -> &[String] {
        &self.quotes
    }

    pub fn pick_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str> {
        self.quotes
            .choose(rng)
            .map(String::as_str)
            .ok_or(AppError::EmptyBank("quote"))
    }

    pub fn pick_random(&self) -> Result<&str> {
        self.pick_random_with(&mut rand::thread_rng())
    }
}
