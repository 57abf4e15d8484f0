//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect_save;
mod validate_content;

pub use inspect_save::InspectSave;
pub use validate_content::ValidateContent;
