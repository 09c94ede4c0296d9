//! crudmonkey TUI library exports.
//!
//! Metadata-driven CRUD screens: register a [`crudmonkey_core::Describable`]
//! record type under a resource name and get a menu entry pair, a list page
//! and create/edit forms for it.

pub mod config;
pub mod error;
pub mod events;
pub mod form;
pub mod keys;
pub mod list;
pub mod logging;
pub mod menu;
pub mod models;
pub mod nav;
pub mod notifications;
pub mod pages;
pub mod persistence;
pub mod registry;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;

pub use form::{build_form, FormMode, FormView, SubmitError};
pub use list::{build_list, ListView};
pub use nav::{transition, NavEvent, PageId};
pub use registry::Registration;
pub use state::App;
