//! Program-wide rollups for the overview mode.

use serde::{Deserialize, Serialize};

use crate::pipeline::normalizer::StageDescriptor;
use crate::pipeline::resolver::CrossReferenceResolver;
use crate::program::Registries;

/// Aggregate statistics over one loaded program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramOverview {
    pub stage_count: usize,
    /// Size of the table registry
    pub table_count: usize,
    /// Size of the header registry
    pub header_type_count: usize,
    /// Sum of per-stage action counts
    pub total_action_count: usize,
    pub extern_count: usize,
}

impl ProgramOverview {
    pub fn compute(stages: &[StageDescriptor], registries: &Registries) -> Self {
        let resolver = CrossReferenceResolver::new(registries);
        Self {
            stage_count: stages.len(),
            table_count: resolver.table_count(),
            header_type_count: resolver.header_count(),
            total_action_count: stages.iter().map(|s| s.stats.action_count).sum(),
            extern_count: resolver.extern_count(),
        }
    }
}
