//! Commands
//!
//! CLI command implementations.
//! Each command is in its own submodule.

pub mod extract;
pub mod file;
pub mod models;
pub mod transfer;
pub mod types;

pub use extract::{execute_extract, ExtractCommandOptions};
pub use file::{execute_file, FileOptions};
pub use models::execute_models;
pub use transfer::{execute_transfer, RunSettings, TransferCommandOptions};
pub use types::{execute_types, TypesOptions};
