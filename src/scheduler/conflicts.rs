//! Conflict reports.
//!
//! The generator only needs a yes/no answer; these functions explain *why*
//! a hand-picked set of sections does not fit, one entry per overlapping
//! block pair.

use serde::{Deserialize, Serialize};

use crate::models::{ClassSection, SlotPreference, TimeBlock};

/// One side of a conflict: which section, which block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictSide {
    pub course_code: String,
    pub section_code: String,
    #[serde(flatten)]
    pub block: TimeBlock,
}

impl ConflictSide {
    fn new(section: &ClassSection, block: TimeBlock) -> Self {
        Self {
            course_code: section.course_code.clone(),
            section_code: section.section_code.clone(),
            block,
        }
    }
}

/// Two sections meeting at the same time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConflict {
    pub first: ConflictSide,
    pub second: ConflictSide,
}

/// A section meeting inside a blocked slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedConflict {
    pub section: ConflictSide,
    pub blocked_slot: TimeBlock,
}

/// Lists every overlapping block pair between distinct sections.
pub fn check_conflicts(sections: &[ClassSection]) -> Vec<SectionConflict> {
    let mut conflicts = Vec::new();
    for (i, first) in sections.iter().enumerate() {
        for second in &sections[i + 1..] {
            for a in &first.blocks {
                for b in second.blocks.iter().filter(|b| a.overlaps(b)) {
                    conflicts.push(SectionConflict {
                        first: ConflictSide::new(first, *a),
                        second: ConflictSide::new(second, *b),
                    });
                }
            }
        }
    }
    conflicts
}

/// Lists every block of `section` that overlaps a blocked slot.
pub fn check_blocked_conflicts(
    section: &ClassSection,
    preferences: &[SlotPreference],
) -> Vec<BlockedConflict> {
    let mut conflicts = Vec::new();
    for block in &section.blocks {
        for pref in preferences.iter().filter(|p| p.is_blocked()) {
            if block.overlaps(&pref.block) {
                conflicts.push(BlockedConflict {
                    section: ConflictSide::new(section, *block),
                    blocked_slot: pref.block,
                });
            }
        }
    }
    conflicts
}
