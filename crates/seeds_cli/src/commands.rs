//! Command modules for the seeds CLI.
//!
//! - `init_cmd`: writes a starter configuration file
//! - `check_cmd`: checks connectivity with the seeds API
//! - `seed_cmd`: creates, and optionally removes, the seeds of a seed file

pub mod check_cmd;
pub mod init_cmd;
pub mod seed_cmd;
