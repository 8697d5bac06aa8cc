//! Controller input codes
//!
//! Numeric values match the host's input tables so codes can be passed
//! across the engine boundary unchanged.

/// Which controller a code or pose belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

/// Controller control codes (left 520..=527, right 570..=576)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum InputKeyCode {
    LeftSqueeze = 520,
    LeftTrigger = 521,
    LeftThumbstickX = 522,
    LeftThumbstickY = 523,
    LeftThumbstickClick = 524,
    LeftXClick = 525,
    LeftYClick = 526,
    LeftMenuClick = 527,

    RightSqueeze = 570,
    RightTrigger = 571,
    RightThumbstickX = 572,
    RightThumbstickY = 573,
    RightThumbstickClick = 574,
    RightAClick = 575,
    RightBClick = 576,
}

impl InputKeyCode {
    pub const ALL: [InputKeyCode; 15] = [
        Self::LeftSqueeze,
        Self::LeftTrigger,
        Self::LeftThumbstickX,
        Self::LeftThumbstickY,
        Self::LeftThumbstickClick,
        Self::LeftXClick,
        Self::LeftYClick,
        Self::LeftMenuClick,
        Self::RightSqueeze,
        Self::RightTrigger,
        Self::RightThumbstickX,
        Self::RightThumbstickY,
        Self::RightThumbstickClick,
        Self::RightAClick,
        Self::RightBClick,
    ];

    /// Look up a code by its host value
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Host value of this code
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn hand(self) -> Hand {
        if self.code() < 570 {
            Hand::Left
        } else {
            Hand::Right
        }
    }

    /// Whether the control reports a continuous value (-1..1 or 0..1)
    /// rather than a click
    pub fn is_analog(self) -> bool {
        matches!(
            self,
            Self::LeftSqueeze
                | Self::LeftTrigger
                | Self::LeftThumbstickX
                | Self::LeftThumbstickY
                | Self::RightSqueeze
                | Self::RightTrigger
                | Self::RightThumbstickX
                | Self::RightThumbstickY
        )
    }
}

/// Device pose streams delivered by the tracking system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoseStream {
    LeftAim,
    LeftGrip,
    RightAim,
    RightGrip,
}

impl PoseStream {
    pub const ALL: [PoseStream; 4] = [
        Self::LeftAim,
        Self::LeftGrip,
        Self::RightAim,
        Self::RightGrip,
    ];

    pub fn hand(self) -> Hand {
        match self {
            Self::LeftAim | Self::LeftGrip => Hand::Left,
            Self::RightAim | Self::RightGrip => Hand::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_values() {
        assert_eq!(InputKeyCode::LeftSqueeze.code(), 520);
        assert_eq!(InputKeyCode::LeftThumbstickX.code(), 522);
        assert_eq!(InputKeyCode::LeftThumbstickY.code(), 523);
        assert_eq!(InputKeyCode::LeftMenuClick.code(), 527);
        assert_eq!(InputKeyCode::RightSqueeze.code(), 570);
        assert_eq!(InputKeyCode::RightBClick.code(), 576);
    }

    #[test]
    fn test_from_code() {
        for code in InputKeyCode::ALL {
            assert_eq!(InputKeyCode::from_code(code.code()), Some(code));
        }
        assert_eq!(InputKeyCode::from_code(528), None);
        assert_eq!(InputKeyCode::from_code(569), None);
        assert_eq!(InputKeyCode::from_code(577), None);
    }

    #[test]
    fn test_hand() {
        assert_eq!(InputKeyCode::LeftMenuClick.hand(), Hand::Left);
        assert_eq!(InputKeyCode::RightSqueeze.hand(), Hand::Right);
        assert_eq!(PoseStream::RightGrip.hand(), Hand::Right);
    }

    #[test]
    fn test_analog_controls() {
        assert!(InputKeyCode::LeftThumbstickX.is_analog());
        assert!(!InputKeyCode::LeftThumbstickClick.is_analog());
        assert!(!InputKeyCode::RightAClick.is_analog());
    }
}
