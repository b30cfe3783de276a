//! Tables tab: the stage's table references resolved against the registry.

use crate::pipeline::CrossReferenceResolver;
use crate::program::StageInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCard {
    pub name: String,
    pub keys: Vec<String>,
    pub actions: Vec<String>,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablesView {
    /// Resolved tables in reference order; unresolved references are omitted
    pub tables: Vec<TableCard>,
}

impl TablesView {
    pub fn render(stage: &StageInfo, resolver: &CrossReferenceResolver<'_>) -> Self {
        let tables = resolver
            .resolve_tables(&stage.tables)
            .into_iter()
            .map(|(name, table)| TableCard {
                name: name.to_string(),
                keys: table.keys.clone(),
                actions: table.actions.clone(),
                size: table.size,
            })
            .collect();
        Self { tables }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
