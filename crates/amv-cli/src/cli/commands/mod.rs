//! CLI command handlers. Each command is in its own file.

mod checksum;
mod make;
mod size;
mod verify;

pub use checksum::run_checksum;
pub use make::run_make;
pub use size::run_size;
pub use verify::run_verify;
