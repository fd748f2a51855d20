//! Roster - an employee roster editor
//!
//! Core modules:
//! - `store`: The roster itself (add/update/delete, write-through persistence, change events)
//! - `editor`: Add/edit form and its Idle/Editing workflow
//! - `app`: Controller tying store, form and filter to UI events
//! - `filter`: Case-insensitive name filter
//! - `persistence`: Stored JSON shape, fail-soft load, best-effort save
//! - `platform`: Browser/native platform abstraction (storage, clock)
//! - `settings`: User preferences

pub mod app;
pub mod editor;
pub mod employee;
pub mod error;
pub mod filter;
pub mod notify;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod store;

pub use app::{RosterApp, UiEvent};
pub use editor::{EditMode, EmployeeForm, Submitted};
pub use employee::{Employee, EmployeeFields, EmployeeId, Field, ValidFields};
pub use error::{PersistenceError, StorageError, ValidationError};
pub use notify::{Notice, ToastPosition};
pub use settings::Settings;
pub use store::{RosterEvent, RosterStore, SubscriptionId};

/// Configuration constants
pub mod consts {
    /// Storage key holding the roster
    pub const ROSTER_KEY: &str = "employees";
    /// Storage key holding user settings
    pub const SETTINGS_KEY: &str = "roster_settings";
    /// Default toast auto-dismiss delay
    pub const DEFAULT_TOAST_MS: u32 = 5000;
}
