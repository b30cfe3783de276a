//! Deep-Dive: a plain-language explanation of one stage.
//!
//! The explanation text is chosen by stage kind. Parser stages list their
//! states, control stages show their apply body, and every stage carries the
//! global header and extern references.

use crate::pipeline::CrossReferenceResolver;
use crate::program::{ExternInfo, HeaderType, StageInfo, StageKind};

/// Transition values that are parser keywords rather than destinations
pub const SUPPRESSED_TRANSITIONS: [&str; 2] = ["select", "accept"];

/// One parser state as shown in the Deep-Dive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserStepLine {
    pub state: String,
    pub extract: Option<String>,
    /// Destination state; `None` for keywords and missing entries
    pub transitions_to: Option<String>,
}

impl ParserStepLine {
    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(extract) = &self.extract {
            parts.push(format!("extracts {}", extract));
        }
        if let Some(next) = &self.transitions_to {
            parts.push(format!("transitions to {}", next));
        }
        if parts.is_empty() {
            self.state.clone()
        } else {
            format!("{}: {}", self.state, parts.join(", "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepDiveView {
    pub stage_name: String,
    pub kind: StageKind,
    pub explanation: String,
    /// Parser stages only
    pub parser_steps: Vec<ParserStepLine>,
    /// Control stages only, verbatim
    pub apply_body: Option<String>,
    pub headers: Vec<HeaderType>,
    pub externs: Vec<ExternInfo>,
}

impl DeepDiveView {
    pub fn render(stage: &StageInfo, resolver: &CrossReferenceResolver<'_>) -> Self {
        let parser_steps = match stage.kind {
            StageKind::Parser => stage
                .states()
                .iter()
                .map(|step| ParserStepLine {
                    state: step.name.clone(),
                    extract: step.extract.clone(),
                    transitions_to: step
                        .transition
                        .clone()
                        .filter(|t| !SUPPRESSED_TRANSITIONS.contains(&t.as_str())),
                })
                .collect(),
            _ => Vec::new(),
        };

        let apply_body = match stage.kind {
            StageKind::Control => stage
                .apply_logic
                .as_ref()
                .and_then(|logic| logic.raw_apply_body.clone()),
            _ => None,
        };

        Self {
            stage_name: stage.name.clone(),
            kind: stage.kind.clone(),
            explanation: explain(stage),
            parser_steps,
            apply_body,
            headers: resolver.headers().to_vec(),
            externs: resolver.externs().to_vec(),
        }
    }
}

fn explain(stage: &StageInfo) -> String {
    let name = &stage.name;
    match &stage.kind {
        StageKind::Parser => format!(
            "{} is the parser. It reads the incoming packet from the first byte and \
             walks a state machine: each state may extract a header into the packet \
             representation and then selects the next state, until the packet is \
             accepted or rejected. This parser defines {} state(s).",
            name,
            stage.states().len()
        ),
        StageKind::Control => format!(
            "{} is a control block. It runs after parsing and applies match-action \
             tables to the extracted headers and metadata: each table matches on its \
             keys and invokes one of its actions, which may rewrite headers, set the \
             egress port or drop the packet. This block references {} table(s) and \
             {} action(s).",
            name,
            stage.tables.len(),
            stage.actions().len()
        ),
        StageKind::Deparser => format!(
            "{} is the deparser. It serializes the valid headers back onto the wire \
             in the order they are emitted, producing the outgoing packet.",
            name
        ),
        StageKind::Other(label) => format!(
            "{} is a stage of type \"{}\". No detailed explanation is available for \
             this kind of stage; its tables, actions and flow are listed in the other tabs.",
            name, label
        ),
    }
}
