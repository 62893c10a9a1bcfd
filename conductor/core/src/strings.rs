//! String Table
//!
//! The user-facing text, keyed the same way a resource table would be. The
//! choreography treats every entry as an opaque string; translations come in
//! through the `[strings]` section of the config file.

use serde::{Deserialize, Serialize};

/// Localized strings consumed by the choreography
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringTable {
    /// Breathing cycle is about to start
    pub ready: String,
    /// Breathe in
    pub inhale: String,
    /// Hold the breath
    pub hold: String,
    /// Breathe out
    pub exhale: String,
    /// Shown after the final repetition
    pub praise: String,
    /// Terminal label, invites another round
    pub again: String,
    /// Static button text before the first activation
    pub tap_here: String,
    /// First greeting line
    pub greeting_hello: String,
    /// Second greeting line
    pub greeting_question: String,
    /// Closing greeting line
    pub greeting_breathe: String,
}

impl Default for StringTable {
    fn default() -> Self {
        Self {
            ready: "ready".to_string(),
            inhale: "inhale".to_string(),
            hold: "hold".to_string(),
            exhale: "exhale".to_string(),
            praise: "well done".to_string(),
            again: "tap to breathe again".to_string(),
            tap_here: "tap here".to_string(),
            greeting_hello: "Hello there.".to_string(),
            greeting_question: "How are you feeling today?".to_string(),
            greeting_breathe: "Let's take a moment to breathe together.".to_string(),
        }
    }
}

impl StringTable {
    /// The greeting revealed by the typewriter, as one string
    #[must_use]
    pub fn greeting(&self) -> String {
        format!(
            "{}\n{}\n\n{}",
            self.greeting_hello, self.greeting_question, self.greeting_breathe
        )
    }

    /// Overlay the non-empty entries of `other` onto this table
    pub fn merge(&mut self, other: &StringTableOverrides) {
        let pairs = [
            (&mut self.ready, &other.ready),
            (&mut self.inhale, &other.inhale),
            (&mut self.hold, &other.hold),
            (&mut self.exhale, &other.exhale),
            (&mut self.praise, &other.praise),
            (&mut self.again, &other.again),
            (&mut self.tap_here, &other.tap_here),
            (&mut self.greeting_hello, &other.greeting_hello),
            (&mut self.greeting_question, &other.greeting_question),
            (&mut self.greeting_breathe, &other.greeting_breathe),
        ];
        for (slot, value) in pairs {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                slot.clone_from(value);
            }
        }
    }
}

/// Partial string table as read from a config file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringTableOverrides {
    /// Label shown while getting ready
    pub ready: Option<String>,
    /// Label for the inhale phase
    pub inhale: Option<String>,
    /// Label for both holds
    pub hold: Option<String>,
    /// Label for the exhale phase
    pub exhale: Option<String>,
    /// Label shown when the cycle is done
    pub praise: Option<String>,
    /// Label inviting another round
    pub again: Option<String>,
    /// Static button text before the first tap
    pub tap_here: Option<String>,
    /// First greeting line
    pub greeting_hello: Option<String>,
    /// Second greeting line
    pub greeting_question: Option<String>,
    /// Closing greeting line
    pub greeting_breathe: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_layout() {
        let table = StringTable {
            greeting_hello: "Hi".into(),
            greeting_question: "How are you?".into(),
            greeting_breathe: "Breathe.".into(),
            ..StringTable::default()
        };
        assert_eq!(table.greeting(), "Hi\nHow are you?\n\nBreathe.");
    }

    #[test]
    fn test_merge_only_touches_given_keys() {
        let mut table = StringTable::default();
        let overrides = StringTableOverrides {
            inhale: Some("einatmen".into()),
            exhale: Some("ausatmen".into()),
            ..StringTableOverrides::default()
        };

        table.merge(&overrides);

        assert_eq!(table.inhale, "einatmen");
        assert_eq!(table.exhale, "ausatmen");
        assert_eq!(table.hold, StringTable::default().hold);
    }

    #[test]
    fn test_merge_skips_empty_entries() {
        let mut table = StringTable::default();
        let overrides = StringTableOverrides {
            ready: Some(String::new()),
            praise: Some("gut gemacht".into()),
            ..StringTableOverrides::default()
        };

        table.merge(&overrides);

        assert_eq!(table.ready, StringTable::default().ready);
        assert_eq!(table.praise, "gut gemacht");
    }
}
