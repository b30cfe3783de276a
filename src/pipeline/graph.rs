//! Pipeline graph: one node per stage, one edge per adjacent pair.
//!
//! Edges only express sequential flow, never data dependency. Header and
//! extern badges are global registry sizes and are identical on every node.

use serde::{Deserialize, Serialize};

use crate::pipeline::id::{EdgeId, StageId};
use crate::pipeline::normalizer::StageDescriptor;
use crate::pipeline::resolver::CrossReferenceResolver;
use crate::program::{Registries, StageKind};

/// Badge counts shown on a stage card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeBadges {
    pub tables: usize,
    pub actions: usize,
    pub states: usize,
    /// Global header-type count
    pub headers: usize,
    /// Global extern count
    pub externs: usize,
}

/// A stage node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: StageId,
    pub label: String,
    pub kind: StageKind,
    pub order_index: usize,
    pub badges: NodeBadges,
}

/// A directed flow edge between consecutive stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub source: StageId,
    pub target: StageId,
}

/// Complete graph model of the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl PipelineGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &StageId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}

/// Builds a [`PipelineGraph`] from normalized stages.
pub struct PipelineGraphBuilder<'a> {
    registries: &'a Registries,
}

impl<'a> PipelineGraphBuilder<'a> {
    pub fn new(registries: &'a Registries) -> Self {
        Self { registries }
    }

    /// Build nodes in descriptor order and chain them with edges.
    pub fn build(&self, stages: &[StageDescriptor]) -> PipelineGraph {
        let resolver = CrossReferenceResolver::new(self.registries);
        let headers = resolver.header_count();
        let externs = resolver.extern_count();

        let nodes = stages
            .iter()
            .map(|stage| GraphNode {
                id: stage.id.clone(),
                label: stage.name.clone(),
                kind: stage.kind.clone(),
                order_index: stage.order_index,
                badges: NodeBadges {
                    tables: stage.stats.table_count,
                    actions: stage.stats.action_count,
                    states: stage.stats.state_count,
                    headers,
                    externs,
                },
            })
            .collect();

        let edges = stages
            .windows(2)
            .map(|pair| {
                let (source, target) = (pair[0].id.clone(), pair[1].id.clone());
                GraphEdge {
                    id: EdgeId::new(source.clone(), target.clone()),
                    source,
                    target,
                }
            })
            .collect();

        PipelineGraph { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalizer::normalize;
    use crate::program::ProgramStructure;
    use serde_json::json;

    #[test]
    fn test_empty_graph() {
        let structure = ProgramStructure::default();
        let graph = PipelineGraphBuilder::new(&structure.registries).build(&normalize(&structure));
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_single_stage_has_no_edges() {
        let structure = ProgramStructure::from_value(&json!({"only": {"type": "parser"}}));
        let graph = PipelineGraphBuilder::new(&structure.registries).build(&normalize(&structure));
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_chain_and_badges() {
        let structure = ProgramStructure::from_value(&json!({
            "MyDeparser": {"type": "deparser"},
            "MyIngress": {"type": "control", "tables": ["ipv4_lpm"]},
            "MyParser": {"type": "parser"},
            "_headers": {"ethernet_t": [], "ipv4_t": []},
            "_externs": [{"type": "counter", "name": "c"}]
        }));
        let graph = PipelineGraphBuilder::new(&structure.registries).build(&normalize(&structure));

        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].id.to_string(), "e-MyParser-MyIngress");
        assert_eq!(graph.edges[1].source, "MyIngress");
        assert_eq!(graph.edges[1].target, "MyDeparser");

        for node in &graph.nodes {
            assert_eq!(node.badges.headers, 2);
            assert_eq!(node.badges.externs, 1);
        }
        let ingress = graph.node(&StageId::from("MyIngress")).unwrap();
        assert_eq!(ingress.badges.tables, 1);
        assert_eq!(ingress.order_index, 1);
    }
}
