//! Quest status as reported by the profile source.
//!
//! The same enum is used for the raw upstream status and for the effective
//! status the engine reports. Numeric tags are part of the wire contract and
//! must not be reordered.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum QuestStatus {
    /// Not startable yet
    #[default]
    Locked = 0,
    /// Can be started
    Available = 1,
    Started = 2,
    /// Objectives done, waiting for hand-in
    AvailableForFinish = 3,
    /// Completed; satisfies prerequisites
    Success = 4,
    Fail = 5,
    FailRestartable = 6,
    Fail2 = 7,
    Expired = 8,
    TimeExpired = 9,
}

impl QuestStatus {
    pub fn all() -> &'static [QuestStatus] {
        &[
            QuestStatus::Locked,
            QuestStatus::Available,
            QuestStatus::Started,
            QuestStatus::AvailableForFinish,
            QuestStatus::Success,
            QuestStatus::Fail,
            QuestStatus::FailRestartable,
            QuestStatus::Fail2,
            QuestStatus::Expired,
            QuestStatus::TimeExpired,
        ]
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_locked(self) -> bool {
        self == QuestStatus::Locked
    }

    /// Only a completed quest unlocks the quests depending on it.
    pub fn satisfies_prerequisite(self) -> bool {
        self == QuestStatus::Success
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            QuestStatus::Locked => "Locked",
            QuestStatus::Available => "Available",
            QuestStatus::Started => "Started",
            QuestStatus::AvailableForFinish => "Available for finish",
            QuestStatus::Success => "Success",
            QuestStatus::Fail => "Fail",
            QuestStatus::FailRestartable => "Fail (restartable)",
            QuestStatus::Fail2 => "Marked as failed",
            QuestStatus::Expired => "Expired",
            QuestStatus::TimeExpired => "Time expired",
        }
    }
}

impl From<QuestStatus> for u8 {
    fn from(status: QuestStatus) -> Self {
        status.as_u8()
    }
}

impl TryFrom<u8> for QuestStatus {
    type Error = DomainError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        QuestStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_u8() == tag)
            .ok_or_else(|| DomainError::parse(format!("Unknown quest status tag: {}", tag)))
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tags_are_stable() {
        assert_eq!(QuestStatus::Locked.as_u8(), 0);
        assert_eq!(QuestStatus::Available.as_u8(), 1);
        assert_eq!(QuestStatus::Success.as_u8(), 4);
        assert_eq!(QuestStatus::TimeExpired.as_u8(), 9);
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&QuestStatus::Started).unwrap(), "2");
        let parsed: QuestStatus = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, QuestStatus::AvailableForFinish);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(QuestStatus::try_from(10).is_err());
        assert!(serde_json::from_str::<QuestStatus>("42").is_err());
    }

    #[test]
    fn only_success_satisfies_prerequisites() {
        let satisfying: Vec<_> = QuestStatus::all()
            .iter()
            .filter(|s| s.satisfies_prerequisite())
            .collect();
        assert_eq!(satisfying, vec![&QuestStatus::Success]);
    }
}
