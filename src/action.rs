//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next visible row
    NextRow,
    /// Move to previous visible row
    PrevRow,
    /// Jump to first visible row
    FirstRow,
    /// Jump to last visible row
    LastRow,
    /// Scroll down one page
    PageDown,
    /// Scroll up one page
    PageUp,

    // ─────────────────────────────────────────────────────────────────────────
    // Filter Bar
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter filter editing mode
    EnterFilterMode,
    /// Leave filter editing mode
    ExitFilterMode,
    /// Add character to the focused filter field
    FilterInput(char),
    /// Remove last character from the focused filter field
    FilterBackspace,
    /// Switch focus between include and exclude fields
    FilterNextField,
    /// Toggle the exclude filter on/off
    ToggleExclusion,
    /// Clear both filter fields
    ClearFilter,

    // ─────────────────────────────────────────────────────────────────────────
    // Row Operations
    // ─────────────────────────────────────────────────────────────────────────
    /// Append a row and open the edit form for it
    AddRow,
    /// Open the edit form for the selected row
    EditRow,
    /// Ask for confirmation before deleting the selected row
    OpenDeleteConfirm,
    /// Delete a row after confirmation
    DeleteRow(usize),
    /// Commit the row form into the document
    ConfirmRowEdit,
    /// Show the selected row as copyable text
    CopyRows,

    // ─────────────────────────────────────────────────────────────────────────
    // Table Operations
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the header name/percentage editor
    EditHeader,
    /// Validate and commit the header edit
    ConfirmHeaderEdit,
    /// Drop all data rows
    ClearTable,

    // ─────────────────────────────────────────────────────────────────────────
    // File Operations
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the path prompt for loading a file
    OpenFilePrompt,
    /// Load the file at the given path
    LoadFile(String),
    /// Save to the current file, or prompt when none is set
    Save,
    /// Open the path prompt for saving to a new file
    OpenSaveAsPrompt,
    /// Save to the given path
    SaveFile(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open the about dialog
    OpenAbout,
    /// Close the current modal
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::PageDown => write!(f, "PageDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::EnterFilterMode => write!(f, "EnterFilterMode"),
            Action::ExitFilterMode => write!(f, "ExitFilterMode"),
            Action::FilterInput(c) => write!(f, "FilterInput('{}')", c),
            Action::FilterBackspace => write!(f, "FilterBackspace"),
            Action::FilterNextField => write!(f, "FilterNextField"),
            Action::ToggleExclusion => write!(f, "ToggleExclusion"),
            Action::ClearFilter => write!(f, "ClearFilter"),
            Action::AddRow => write!(f, "AddRow"),
            Action::EditRow => write!(f, "EditRow"),
            Action::OpenDeleteConfirm => write!(f, "OpenDeleteConfirm"),
            Action::DeleteRow(i) => write!(f, "DeleteRow({})", i),
            Action::ConfirmRowEdit => write!(f, "ConfirmRowEdit"),
            Action::CopyRows => write!(f, "CopyRows"),
            Action::EditHeader => write!(f, "EditHeader"),
            Action::ConfirmHeaderEdit => write!(f, "ConfirmHeaderEdit"),
            Action::ClearTable => write!(f, "ClearTable"),
            Action::OpenFilePrompt => write!(f, "OpenFilePrompt"),
            Action::LoadFile(path) => write!(f, "LoadFile({})", path),
            Action::Save => write!(f, "Save"),
            Action::OpenSaveAsPrompt => write!(f, "OpenSaveAsPrompt"),
            Action::SaveFile(path) => write!(f, "SaveFile({})", path),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenAbout => write!(f, "OpenAbout"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
