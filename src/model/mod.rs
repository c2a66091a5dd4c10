//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `TableDocument` - the loaded table and its column metadata
//! - `Query` - the include/exclude filter state
//! - Column layout arithmetic and the header-edit workflow
//! - `ModalStack` - modal overlay management

pub mod filter;
pub mod layout;
pub mod modal;
pub mod table;

// Re-export commonly used types
pub use filter::{visible_rows, Query};
pub use layout::{compute_widths, HeaderEditor, LayoutError};
pub use modal::{Modal, ModalStack};
pub use table::TableDocument;
