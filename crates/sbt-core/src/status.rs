#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of evaluating a node.
///
/// `Fail` doubles as the resting state of a node that has never been started or
/// was forcibly retired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    Success,
    #[default]
    Fail,
    Running,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_fail(self) -> bool {
        matches!(self, Status::Fail)
    }

    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Swaps Success and Fail; Running is kept.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Fail,
            Status::Fail => Status::Success,
            Status::Running => Status::Running,
        }
    }

    /// Compact numeric form used in trace events.
    #[inline]
    pub fn code(self) -> u64 {
        match self {
            Status::Success => 0,
            Status::Fail => 1,
            Status::Running => 2,
        }
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_keeps_running() {
        assert_eq!(Status::Success.invert(), Status::Fail);
        assert_eq!(Status::Fail.invert(), Status::Success);
        assert_eq!(Status::Running.invert(), Status::Running);
    }

    #[test]
    fn default_is_fail() {
        assert_eq!(Status::default(), Status::Fail);
    }
}
