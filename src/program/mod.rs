//! Program structure data model
//!
//! This module holds the immutable snapshot of an analyzed P4 program as the
//! explorer consumes it: stages in input order plus the program-wide
//! registries (tables, headers, externs).
//!
//! # Main Types
//!
//! - [`ProgramStructure`] - One loaded document, stages plus registries
//! - [`StageInfo`] - A parser, control, deparser or unrecognized block
//! - [`ActionEntry`] - A bare action name or a structured [`ActionInfo`]
//! - [`ParserStateStep`] - A parser state with its aligned extract and transition
//! - [`Registries`] - Read-only maps shared by every stage
//!
//! # Decoding
//!
//! [`ProgramStructure::from_value`] never fails. Missing fields become empty
//! values, unexpected shapes become neutral ones and an untyped stage becomes
//! [`StageKind::Other`] labelled `unknown`.

mod decode;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Prefix marking reserved registry and metadata keys
pub const RESERVED_PREFIX: &str = "_";

/// Reserved key holding the table registry
pub const TABLES_KEY: &str = "_tables";

/// Reserved key holding the header registry
pub const HEADERS_KEY: &str = "_headers";

/// Reserved key holding the extern registry
pub const EXTERNS_KEY: &str = "_externs";

/// Reserved metadata key naming the analyzed source file
pub const FILENAME_KEY: &str = "_filename";

/// Label used for stages whose type is missing or not a string
pub const UNKNOWN_KIND: &str = "unknown";

/// Check whether a top-level key names a registry or metadata entry
pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX)
}

/// Kind of pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    Parser,
    Control,
    Deparser,
    /// Anything else, keeping the raw label for display
    Other(String),
}

impl StageKind {
    /// Classify a raw `type` label (case-insensitive)
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "parser" => StageKind::Parser,
            "control" => StageKind::Control,
            "deparser" => StageKind::Deparser,
            "" => StageKind::unknown(),
            _ => StageKind::Other(label.to_string()),
        }
    }

    /// The fallback kind for untyped stages
    pub fn unknown() -> Self {
        StageKind::Other(UNKNOWN_KIND.to_string())
    }

    /// Pipeline rank: parser, control, deparser, then everything else
    pub fn rank(&self) -> u8 {
        match self {
            StageKind::Parser => 0,
            StageKind::Control => 1,
            StageKind::Deparser => 2,
            StageKind::Other(_) => 99,
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            StageKind::Parser => "parser",
            StageKind::Control => "control",
            StageKind::Deparser => "deparser",
            StageKind::Other(label) => label,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One parser state with its positionally aligned extract and transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserStateStep {
    pub name: String,
    pub extract: Option<String>,
    pub transition: Option<String>,
}

/// A typed action parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionParam {
    pub ty: String,
    pub name: String,
}

/// Structured action metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInfo {
    pub name: String,
    pub parameters: Vec<ActionParam>,
    pub body_preview: Option<String>,
}

/// An action reference as it appears in a stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionEntry {
    Name(String),
    Detailed(ActionInfo),
}

impl ActionEntry {
    pub fn name(&self) -> &str {
        match self {
            ActionEntry::Name(name) => name,
            ActionEntry::Detailed(info) => &info.name,
        }
    }
}

/// Control-block orchestration description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyLogic {
    /// Apply body text, rendered verbatim
    pub raw_apply_body: Option<String>,
    /// Ordered flow steps; `None` when the document has no `logic` sequence
    pub logic: Option<Vec<String>>,
}

/// One stage of the pipeline as decoded from the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInfo {
    pub name: String,
    pub kind: StageKind,
    /// Table-name references into [`Registries::tables`]
    pub tables: Vec<String>,
    /// `None` when `actions` is missing or not a sequence
    pub actions: Option<Vec<ActionEntry>>,
    /// `None` when `states` is missing or not a sequence
    pub states: Option<Vec<ParserStateStep>>,
    pub apply_logic: Option<ApplyLogic>,
}

impl StageInfo {
    /// An empty stage of the given kind
    pub fn new(name: impl Into<String>, kind: StageKind) -> Self {
        Self {
            name: name.into(),
            kind,
            tables: Vec::new(),
            actions: None,
            states: None,
            apply_logic: None,
        }
    }

    pub fn actions(&self) -> &[ActionEntry] {
        self.actions.as_deref().unwrap_or_default()
    }

    pub fn states(&self) -> &[ParserStateStep] {
        self.states.as_deref().unwrap_or_default()
    }
}

/// Match-action table metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub keys: Vec<String>,
    pub actions: Vec<String>,
    pub size: Option<u64>,
}

/// One field of a header layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub field: String,
    pub bits: u32,
}

/// A named header layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderType {
    pub name: String,
    pub fields: Vec<FieldInfo>,
}

impl HeaderType {
    /// Sum of field widths
    pub fn total_bits(&self) -> u64 {
        self.fields.iter().map(|f| u64::from(f.bits)).sum()
    }
}

/// An externally defined object referenced by the program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternInfo {
    pub ty: String,
    pub name: String,
}

/// Program-wide registries shared across stages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registries {
    pub tables: BTreeMap<String, TableInfo>,
    /// Header layouts in document order
    pub headers: Vec<HeaderType>,
    pub externs: Vec<ExternInfo>,
}

/// Immutable snapshot of one analyzed program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramStructure {
    /// Stages in document key order
    pub stages: Vec<StageInfo>,
    pub registries: Registries,
    /// Source file name from `_filename` (or the upload envelope)
    pub filename: Option<String>,
}

impl ProgramStructure {
    /// Decode a structure from a JSON value, degrading malformed input.
    ///
    /// Anything other than a JSON object decodes to the empty structure.
    pub fn from_value(value: &serde_json::Value) -> Self {
        decode::decode_structure(value)
    }

    /// Look up a stage by name
    pub fn stage(&self, name: &str) -> Option<&StageInfo> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// True when there is nothing to visualize
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
