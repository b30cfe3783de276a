//! Stage normalization: decoded stages → ordered descriptors.
//!
//! Ordering is a stable sort on [`StageKind::rank`], so stages of equal rank
//! keep their document order and the result is deterministic.

use serde::{Deserialize, Serialize};

use crate::pipeline::id::StageId;
use crate::program::{ProgramStructure, StageInfo, StageKind};

/// Per-stage summary counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStats {
    pub table_count: usize,
    /// 0 when the stage's `actions` is not a sequence
    pub action_count: usize,
    /// 0 when the stage has no `states`
    pub state_count: usize,
}

impl StageStats {
    pub fn of(stage: &StageInfo) -> Self {
        Self {
            table_count: stage.tables.len(),
            action_count: stage.actions.as_ref().map_or(0, Vec::len),
            state_count: stage.states.as_ref().map_or(0, Vec::len),
        }
    }
}

/// A stage's position and summary in the normalized pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDescriptor {
    pub id: StageId,
    pub name: String,
    pub kind: StageKind,
    pub order_index: usize,
    pub stats: StageStats,
}

/// Order the structure's stages into pipeline sequence.
///
/// An empty structure yields an empty sequence: nothing to visualize.
pub fn normalize(structure: &ProgramStructure) -> Vec<StageDescriptor> {
    let mut ordered: Vec<&StageInfo> = structure.stages.iter().collect();
    // slice::sort_by_key is stable
    ordered.sort_by_key(|stage| stage.kind.rank());

    ordered
        .into_iter()
        .enumerate()
        .map(|(order_index, stage)| StageDescriptor {
            id: StageId::new(stage.name.clone()),
            name: stage.name.clone(),
            kind: stage.kind.clone(),
            order_index,
            stats: StageStats::of(stage),
        })
        .collect()
}
