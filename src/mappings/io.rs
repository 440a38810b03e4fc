//! Mapping file loading
//!
//! Both files live in the data directory and are read once at startup. A
//! broken or missing command-mapping file degrades to an empty table with a
//! warning; a missing exec-mapping file just means native substitution
//! never matches.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::host::{Host, LogEntry};
use crate::launch::OsKind;

use super::types::{CommandMapping, ExecMapping};

pub fn command_mapping_filename(os: OsKind) -> String {
    format!("commands_{}.json", os.key())
}

pub fn load_command_mapping(dir: &Path, os: OsKind, host: &dyn Host) -> CommandMapping {
    let path = dir.join(command_mapping_filename(os));

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) => {
            host.log(LogEntry::new(
                "Launcher",
                format!(
                    "warning: could not open command mapping file {}: {}",
                    path.display(),
                    err
                ),
            ));
            return CommandMapping::default();
        }
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(mapping) => mapping,
        Err(err) => {
            host.log(LogEntry::new(
                "Launcher",
                format!(
                    "warning: could not parse command mapping file {}: {}",
                    path.display(),
                    err
                ),
            ));
            CommandMapping::default()
        }
    }
}

pub fn load_exec_mappings(dir: &Path) -> Vec<ExecMapping> {
    let Ok(file) = File::open(dir.join("execs.json")) else {
        return Vec::new();
    };
    serde_json::from_reader(BufReader::new(file)).unwrap_or_default()
}
