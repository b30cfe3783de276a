//! Action types for the frontend
//!
//! Views never mutate the session or the config. They return `AppAction`s
//! and the app applies them in one place after the frame's panels are drawn.

use std::path::PathBuf;

use crate::config::Orientation;
use crate::explorer::ExplorerAction;

/// Actions that any view can emit
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Explorer transition, forwarded to the session
    Explorer(ExplorerAction),

    // Program management
    /// Show the native file picker
    OpenFileDialog,
    /// Load a structure document from disk
    OpenFile(PathBuf),
    /// Drop the loaded program
    CloseProgram,

    // Preferences
    SetDarkMode(bool),
    SetOrientation(Orientation),

    /// Reset canvas pan and zoom
    ResetCanvas,

    /// Dismiss the last loader error
    DismissError,
}

impl From<ExplorerAction> for AppAction {
    fn from(action: ExplorerAction) -> Self {
        AppAction::Explorer(action)
    }
}
