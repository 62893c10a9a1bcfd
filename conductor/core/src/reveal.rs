//! Typewriter Reveal
//!
//! Produces the text frames for the greeting: each string in the list is
//! revealed one user-perceived character at a time, then the revealer pauses
//! before moving on. The list is walked once.
//!
//! The revealer is a plain iterator of [`RevealStep`]s; the Conductor decides
//! what to do with each step (emit the text, sleep for the delay).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// How a string is cut into reveal units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Extended grapheme clusters (emoji, combining marks stay whole)
    #[default]
    Graphemes,
    /// Unicode scalar values; may split a cluster across frames
    Chars,
}

impl SplitMode {
    /// Split `text` into reveal units
    #[must_use]
    pub fn split(self, text: &str) -> Vec<&str> {
        match self {
            Self::Graphemes => text.graphemes(true).collect(),
            Self::Chars => text
                .char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect(),
        }
    }
}

impl std::str::FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graphemes" | "grapheme" => Ok(Self::Graphemes),
            "chars" | "char" | "codepoints" => Ok(Self::Chars),
            other => Err(format!("unknown split mode: {other}")),
        }
    }
}

/// One step of a reveal
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealStep {
    /// Show `text`, then wait `hold` before the next step
    Show {
        /// Prefix of the current string
        text: String,
        /// Time to leave this frame on screen
        hold: Duration,
    },
    /// A string has been fully revealed; wait `pause` before continuing
    StringDone {
        /// Index of the finished string in the input list
        index: usize,
        /// Pause before the next string (or before completion)
        pause: Duration,
    },
    /// Every string has been revealed
    Finished,
}

/// Typewriter reveal over a list of strings
#[derive(Clone, Debug)]
pub struct Typewriter {
    texts: Vec<String>,
    char_delay: Duration,
    string_delay: Duration,
    split: SplitMode,
}

impl Typewriter {
    /// Create a revealer with the default 160ms/1000ms timing
    #[must_use]
    pub fn new(texts: Vec<String>) -> Self {
        Self {
            texts,
            char_delay: Duration::from_millis(160),
            string_delay: Duration::from_millis(1000),
            split: SplitMode::default(),
        }
    }

    /// Set the per-character delay
    #[must_use]
    pub fn with_char_delay(mut self, delay: Duration) -> Self {
        self.char_delay = delay;
        self
    }

    /// Set the delay after each string
    #[must_use]
    pub fn with_string_delay(mut self, delay: Duration) -> Self {
        self.string_delay = delay;
        self
    }

    /// Set the split mode
    #[must_use]
    pub fn with_split(mut self, split: SplitMode) -> Self {
        self.split = split;
        self
    }

    /// Whether there is anything to reveal
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Lazily walk the reveal steps
    pub fn steps(&self) -> RevealSteps<'_> {
        RevealSteps {
            typewriter: self,
            text_index: 0,
            units: self.texts.first().map(|t| self.split.split(t)).unwrap_or_default(),
            shown: 0,
            finished: false,
        }
    }

    /// Just the displayed prefixes, in order
    pub fn prefixes(&self) -> impl Iterator<Item = String> + '_ {
        self.steps().filter_map(|step| match step {
            RevealStep::Show { text, .. } => Some(text),
            _ => None,
        })
    }

    /// Total time the reveal takes
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.steps()
            .map(|step| match step {
                RevealStep::Show { hold, .. } => hold,
                RevealStep::StringDone { pause, .. } => pause,
                RevealStep::Finished => Duration::ZERO,
            })
            .sum()
    }
}

/// Iterator over the steps of a [`Typewriter`]
pub struct RevealSteps<'a> {
    typewriter: &'a Typewriter,
    text_index: usize,
    units: Vec<&'a str>,
    shown: usize,
    finished: bool,
}

impl Iterator for RevealSteps<'_> {
    type Item = RevealStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let tw = self.typewriter;
        if self.text_index >= tw.texts.len() {
            self.finished = true;
            // An empty list never completes a string, so it never finishes
            return if tw.texts.is_empty() {
                None
            } else {
                Some(RevealStep::Finished)
            };
        }

        if self.shown < self.units.len() {
            self.shown += 1;
            let text = self.units[..self.shown].concat();
            return Some(RevealStep::Show {
                text,
                hold: tw.char_delay,
            });
        }

        let index = self.text_index;
        self.text_index += 1;
        self.shown = 0;
        self.units = tw
            .texts
            .get(self.text_index)
            .map(|t| tw.split.split(t))
            .unwrap_or_default();

        Some(RevealStep::StringDone {
            index,
            pause: tw.string_delay,
        })
    }
}
