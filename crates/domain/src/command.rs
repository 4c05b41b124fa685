//! Manual commands issued by an operator.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidCommandError;
use crate::light::ActuationState;

/// Requested relay state for a manual command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    On,
    Off,
}

impl Action {
    /// The actuation state this action forces.
    #[must_use]
    pub fn target(self) -> ActuationState {
        match self {
            Self::On => ActuationState::On,
            Self::Off => ActuationState::Off,
        }
    }
}

impl FromStr for Action {
    type Err = InvalidCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("on") {
            Ok(Self::On)
        } else if trimmed.eq_ignore_ascii_case("off") {
            Ok(Self::Off)
        } else {
            Err(InvalidCommandError::UnknownAction(s.to_string()))
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_lowercase_actions() {
        assert_eq!("on".parse::<Action>().unwrap(), Action::On);
        assert_eq!("off".parse::<Action>().unwrap(), Action::Off);
    }

    #[test]
    fn should_parse_actions_case_insensitively() {
        assert_eq!("ON".parse::<Action>().unwrap(), Action::On);
        assert_eq!(" Off ".parse::<Action>().unwrap(), Action::Off);
    }

    #[test]
    fn should_reject_unknown_action() {
        let result = "toggle".parse::<Action>();
        assert_eq!(
            result,
            Err(InvalidCommandError::UnknownAction("toggle".to_string()))
        );
    }

    #[test]
    fn should_reject_empty_action() {
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn should_map_action_to_target_state() {
        assert_eq!(Action::On.target(), ActuationState::On);
        assert_eq!(Action::Off.target(), ActuationState::Off);
    }
}
