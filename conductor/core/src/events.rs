//! Surface Events
//!
//! Events sent from a surface up to the Conductor.

use serde::{Deserialize, Serialize};

/// Events from UI surface to Conductor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// The user activated the button
    Tap,
    /// The user wants to leave
    Quit,
}

impl std::str::FromStr for SurfaceEvent {
    type Err = String;

    /// Parse a headless command line (`tap`, `quit`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tap" | "t" | "" => Ok(Self::Tap),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("tap".parse::<SurfaceEvent>(), Ok(SurfaceEvent::Tap));
        assert_eq!("".parse::<SurfaceEvent>(), Ok(SurfaceEvent::Tap));
        assert_eq!(" QUIT\n".parse::<SurfaceEvent>(), Ok(SurfaceEvent::Quit));
        assert!("jump".parse::<SurfaceEvent>().is_err());
    }
}
