//! On-disk persistence for secrets and configuration

mod private_file;

pub use private_file::{ensure_private_dir, read_optional, write_private};
