//! # P4Lens: P4 Pipeline Explorer
//!
//! Turns the structural description of a compiled P4 program (stages, tables,
//! header types, externs) into an ordered pipeline graph and lets the user
//! drill into any stage.
//!
//! ## Architecture
//!
//! - **Program**: Lenient decoding of the structure document
//! - **Pipeline**: Stage ordering, graph construction, cross references and overview counts
//! - **Explorer**: Selection, view mode and detail tab as a reducer over actions
//! - **Session**: Owns the loaded program, its derived models and the explorer
//! - **Loader**: Reads documents on a worker thread behind crossbeam channels
//! - **Frontend**: Renders the session with eframe/egui
//!
//! ## Configuration
//!
//! Preferences are stored as TOML in the platform config directory under
//! `dev.p4lens.p4lens`. Loaded programs are never persisted.
//!
//! ## Example
//!
//! ```
//! use p4lens::Session;
//! use serde_json::json;
//!
//! let mut session = Session::new();
//! session.load_value(&json!({
//!     "MyIngress": {"type": "control", "tables": ["ipv4_lpm"]},
//!     "MyParser": {"type": "parser"},
//! }));
//!
//! let names: Vec<_> = session.stages().iter().map(|s| s.name.as_str()).collect();
//! assert_eq!(names, ["MyParser", "MyIngress"]);
//!
//! session.select_stage("MyIngress");
//! assert!(session.detail().is_some());
//! ```

pub mod config;
pub mod error;
pub mod explorer;
pub mod frontend;
pub mod loader;
pub mod pipeline;
pub mod program;
pub mod session;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{P4LensError, Result};
pub use explorer::{DetailTab, ExplorerAction, ExplorerState, ViewMode};
pub use frontend::P4LensApp;
pub use pipeline::{PipelineGraph, ProgramOverview, StageDescriptor, StageId};
pub use program::{ProgramStructure, StageInfo, StageKind};
pub use session::{ProgramStatus, Session};
