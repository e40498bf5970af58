//! Time-slot preferences ("franjas").
//!
//! A preference labels a weekly block as either off-limits (`Blocked`) or
//! desirable (`Preferred`). Blocked slots are hard constraints on
//! generation; preferred slots only feed the `preferredSlotsUsed` metric.

use serde::{Deserialize, Serialize};

use super::TimeBlock;

/// Kind of a slot preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// No class may overlap this slot.
    Blocked,
    /// Classes inside this slot score better.
    Preferred,
}

/// A labeled time block used as a constraint or a scoring hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPreference {
    /// The slot itself.
    #[serde(flatten)]
    pub block: TimeBlock,
    /// Whether the slot is blocked or preferred.
    pub kind: SlotKind,
}

impl SlotPreference {
    /// Creates a blocked slot.
    pub fn blocked(block: TimeBlock) -> Self {
        Self {
            block,
            kind: SlotKind::Blocked,
        }
    }

    /// Creates a preferred slot.
    pub fn preferred(block: TimeBlock) -> Self {
        Self {
            block,
            kind: SlotKind::Preferred,
        }
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.kind == SlotKind::Blocked
    }

    #[inline]
    pub fn is_preferred(&self) -> bool {
        self.kind == SlotKind::Preferred
    }
}

/// Blocks of every `Blocked` preference.
pub fn blocked_blocks(preferences: &[SlotPreference]) -> Vec<TimeBlock> {
    preferences
        .iter()
        .filter(|p| p.is_blocked())
        .map(|p| p.block)
        .collect()
}

/// Blocks of every `Preferred` preference.
pub fn preferred_blocks(preferences: &[SlotPreference]) -> Vec<TimeBlock> {
    preferences
        .iter()
        .filter(|p| p.is_preferred())
        .map(|p| p.block)
        .collect()
}
