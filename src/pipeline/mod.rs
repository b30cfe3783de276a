//! Stage pipeline derivation.
//!
//! A loaded [`ProgramStructure`](crate::program::ProgramStructure) flows
//! through three pure steps, recomputed in full on every load:
//!
//! ```text
//! ProgramStructure ──► normalize() ──► [StageDescriptor] ──► PipelineGraphBuilder ──► PipelineGraph
//!                                             └──────────► ProgramOverview
//! ```
//!
//! [`CrossReferenceResolver`] gives the detail views name lookups into the
//! shared registries.

pub mod graph;
pub mod id;
pub mod normalizer;
pub mod overview;
pub mod resolver;

pub use graph::{GraphEdge, GraphNode, NodeBadges, PipelineGraph, PipelineGraphBuilder};
pub use id::{EdgeId, StageId};
pub use normalizer::{normalize, StageDescriptor, StageStats};
pub use overview::ProgramOverview;
pub use resolver::CrossReferenceResolver;
