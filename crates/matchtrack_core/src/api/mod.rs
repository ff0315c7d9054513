//! Read-models exposed to UI hosts.

pub mod view;

pub use view::{PlayerRow, SessionView};
