//! External collaborators: key generation, the Shelby CLI, dependency probes
//!
//! Each collaborator sits behind a narrow trait so the workflow can be
//! exercised against fakes.

mod command;
pub mod deps;
mod keygen;
mod shelby_cli;

pub use command::{describe, run_captured, run_interactive, CommandStatus};
pub use deps::{DependencyReport, DependencyStatus};
pub use keygen::{parse_generated_key, GeneratedKey, KeyGenerator, NodeKeyGenerator};
pub use shelby_cli::{download_args, faucet_args, upload_args, ShelbyCli, UploadService};
