//! Reusable widget components.

pub mod detail;
pub mod input;
pub mod status;

pub use detail::DetailPanel;
pub use input::TextInput;
pub use status::StatusIndicator;
