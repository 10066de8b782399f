#![forbid(unsafe_code)]

//! Per-word reveal of the spotlight header.
//!
//! The header is split into words; each word flips from hidden to shown once
//! window-local progress reaches `index / word_count`. Word 0 therefore
//! appears at the window start and the last word shortly before its end.
//! The shown set is always a prefix of the word list.

use serde::{Deserialize, Serialize};

use crate::window::{PhaseWindow, WindowPosition};

/// Window and word count for the header reveal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordRevealConfig {
    pub window: PhaseWindow,
    #[serde(default)]
    pub word_count: usize,
}

impl WordRevealConfig {
    #[must_use]
    pub fn new(window: PhaseWindow, word_count: usize) -> Self {
        Self { window, word_count }
    }

    /// Number of revealed words at `progress`.
    #[must_use]
    pub fn revealed_count(&self, progress: f64) -> usize {
        let total = self.word_count;
        match self.window.position(progress) {
            WindowPosition::Before => 0,
            WindowPosition::After => total,
            WindowPosition::Inside => {
                let text_progress = self.window.normalize(progress);
                (0..total)
                    .take_while(|&index| text_progress >= index as f64 / total as f64)
                    .count()
            }
        }
    }

    /// Revealed flag for every word, in order.
    #[must_use]
    pub fn reveal(&self, progress: f64) -> Vec<bool> {
        let shown = self.revealed_count(progress);
        (0..self.word_count).map(|index| index < shown).collect()
    }
}

/// Split header text into words, skipping empty segments.
#[must_use]
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
