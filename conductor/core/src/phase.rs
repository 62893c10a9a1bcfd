//! Phases and Colours
//!
//! The breathing button is always in exactly one [`Phase`]. The phase decides
//! both the label shown on the button and its colour; colour is never stored
//! separately, so the two cannot disagree.

use serde::{Deserialize, Serialize};

use crate::strings::StringTable;

/// Which breath a hold follows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldAfter {
    /// Holding with full lungs
    Inhale,
    /// Holding with empty lungs
    Exhale,
}

/// Named stage of the breathing exercise
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No label; the button is at rest
    #[default]
    Idle,
    /// Countdown before the first repetition
    Ready,
    /// Breathing in while the button shrinks
    Inhale,
    /// Holding between breaths
    Hold(HoldAfter),
    /// Breathing out while the button grows
    Exhale,
    /// All repetitions finished
    Done,
    /// Waiting for the user to go again
    Restart,
}

impl Phase {
    /// Colour the button takes in this phase
    #[must_use]
    pub fn color(self) -> ButtonColor {
        match self {
            Self::Idle | Self::Ready => ButtonColor::LightBlue,
            Self::Inhale | Self::Hold(HoldAfter::Inhale) => ButtonColor::PaleBlue,
            Self::Exhale | Self::Hold(HoldAfter::Exhale) | Self::Done | Self::Restart => {
                ButtonColor::Purple
            }
        }
    }

    /// Label text for this phase, looked up in `strings`
    #[must_use]
    pub fn label(self, strings: &StringTable) -> &str {
        match self {
            Self::Idle => "",
            Self::Ready => &strings.ready,
            Self::Inhale => &strings.inhale,
            Self::Hold(_) => &strings.hold,
            Self::Exhale => &strings.exhale,
            Self::Done => &strings.praise,
            Self::Restart => &strings.again,
        }
    }

    /// String-table key for this phase's label
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Ready => "ready",
            Self::Inhale => "inhale",
            Self::Hold(_) => "hold",
            Self::Exhale => "exhale",
            Self::Done => "praise",
            Self::Restart => "again",
        }
    }
}

/// Fixed palette of the exercise
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonColor {
    /// Resting button
    LightBlue,
    /// Inhale
    PaleBlue,
    /// Exhale
    Purple,
    /// Greeting text
    GreyBlue,
    /// Muted accents
    LightGrey,
}

impl ButtonColor {
    /// 24-bit RGB value
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::PaleBlue => (0xba, 0xda, 0xee),
            Self::LightBlue => (0x8c, 0xc2, 0xe3),
            Self::GreyBlue => (0x62, 0x87, 0x9e),
            Self::Purple => (0xb6, 0xbd, 0xe1),
            Self::LightGrey => (0xdd, 0xdd, 0xdd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [Phase; 8] = [
        Phase::Idle,
        Phase::Ready,
        Phase::Inhale,
        Phase::Hold(HoldAfter::Inhale),
        Phase::Exhale,
        Phase::Hold(HoldAfter::Exhale),
        Phase::Done,
        Phase::Restart,
    ];

    #[test]
    fn test_breath_colors() {
        assert_eq!(Phase::Inhale.color(), ButtonColor::PaleBlue);
        assert_eq!(Phase::Exhale.color(), ButtonColor::Purple);
        assert_eq!(Phase::Idle.color(), ButtonColor::LightBlue);
        assert_eq!(Phase::Ready.color(), ButtonColor::LightBlue);
    }

    #[test]
    fn test_hold_keeps_color_of_preceding_breath() {
        assert_eq!(
            Phase::Hold(HoldAfter::Inhale).color(),
            Phase::Inhale.color()
        );
        assert_eq!(
            Phase::Hold(HoldAfter::Exhale).color(),
            Phase::Exhale.color()
        );
    }

    #[test]
    fn test_labels_come_from_string_table() {
        let strings = StringTable::default();
        for phase in ALL_PHASES {
            let label = phase.label(&strings);
            match phase {
                Phase::Idle => assert!(label.is_empty()),
                _ => assert!(!label.is_empty(), "{phase:?} has no label"),
            }
        }
        assert_eq!(Phase::Hold(HoldAfter::Exhale).label(&strings), strings.hold);
        assert_eq!(Phase::Done.label(&strings), strings.praise);
        assert_eq!(Phase::Restart.label(&strings), strings.again);
    }

    #[test]
    fn test_palette_values() {
        assert_eq!(ButtonColor::LightBlue.rgb(), (140, 194, 227));
        assert_eq!(ButtonColor::Purple.rgb(), (182, 189, 225));
    }
}
