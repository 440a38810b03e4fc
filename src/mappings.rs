//! Command-mapping tables
//!
//! Per-OS tables mapping file extensions to command templates, plus the
//! exec-mapping list used to swap Windows executables for native builds.

mod io;
mod types;

pub use io::{load_command_mapping, load_exec_mappings};
pub use types::{CommandMapping, ExecMapping, MappingRule};
