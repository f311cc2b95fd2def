//! Command implementations
//!
//! Each command takes the wired-up environment, runs its workflow, and
//! returns the ordered list of output events for the formatter.

pub mod list;
pub mod update;

pub use list::ListWrap;
pub use update::UpdateWrap;
