use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::sync::Arc;

use crate::host::Host;
use crate::mappings::{CommandMapping, ExecMapping};

/// Soundfont MIDI player shipped with the audio collections. It reads its
/// config relative to its own directory and silently fails otherwise, so the
/// mapper forces cwd and a compatibility-layer invocation for it (never on
/// Windows, where it runs as-is under the selected rule).
pub const NAMED_MIDI_PLAYER: &str = "MidiPly.exe";

/// Compatibility-layer binary used for the named-executable override.
pub const COMPAT_LAYER_COMMAND: &str = "wine";

/// Legacy pseudo-path: show the add-app's launch command as a dialog.
pub const PSEUDO_PATH_MESSAGE: &str = ":message:";

/// Legacy pseudo-path: open a file under `<collection root>/Extras/`.
pub const PSEUDO_PATH_EXTRAS: &str = ":extras:";

/// Filename substituted for the game executable by setup launches.
pub const SETUP_SCRIPT_FILENAME: &str = "install.command";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsKind {
    Windows,
    Linux,
    MacOs,
}

impl OsKind {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            OsKind::Windows
        } else if cfg!(target_os = "macos") {
            OsKind::MacOs
        } else {
            OsKind::Linux
        }
    }

    /// Key used in mapping files and exec-mapping rows.
    pub fn key(self) -> &'static str {
        match self {
            OsKind::Windows => "win32",
            OsKind::Linux => "linux",
            OsKind::MacOs => "darwin",
        }
    }

    pub fn separator(self) -> char {
        match self {
            OsKind::Windows => '\\',
            _ => '/',
        }
    }

    pub fn is_windows(self) -> bool {
        self == OsKind::Windows
    }
}

/// Final command string plus working directory. Produced fresh per call,
/// never cached, never mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub command: String,
    /// `None` means the ambient working directory.
    pub cwd: Option<String>,
}

#[derive(Debug)]
pub enum LaunchError {
    /// The mapping table has no usable default rule.
    Configuration(String),
    /// The OS refused to create the process.
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::Configuration(msg) => write!(f, "configuration error: {}", msg),
            LaunchError::Spawn { command, source } => {
                write!(f, "failed to spawn \"{}\": {}", command, source)
            }
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Lifecycle signal from a spawned process, relayed to the log sink.
#[derive(Debug)]
pub enum ProcessEvent {
    Stdout(String),
    Stderr(String),
    /// OS-level error emitted after the process started. Logged only.
    Error(String),
    Exited(ExitStatus),
}

impl ProcessEvent {
    pub fn describe(&self) -> String {
        match self {
            ProcessEvent::Stdout(line) => line.clone(),
            ProcessEvent::Stderr(line) => format!("stderr: {}", line),
            ProcessEvent::Error(msg) => format!("process error: {}", msg),
            ProcessEvent::Exited(status) => format!("exited ({})", status),
        }
    }
}

/// Per-request launch context supplied by the caller.
#[derive(Clone, Debug)]
pub struct LaunchOpts {
    pub collection_root: PathBuf,
    /// Prefer native executables from the exec-mapping list.
    pub native: bool,
}

/// Launch orchestrator. Holds the immutable mapping tables and the host
/// capabilities; concurrent launch requests are independent.
pub struct Launcher {
    pub os: OsKind,
    pub mappings: CommandMapping,
    pub exec_mappings: Vec<ExecMapping>,
    pub host: Arc<dyn Host>,
}

impl Launcher {
    pub fn new(
        os: OsKind,
        mappings: CommandMapping,
        exec_mappings: Vec<ExecMapping>,
        host: Arc<dyn Host>,
    ) -> Self {
        Launcher {
            os,
            mappings,
            exec_mappings,
            host,
        }
    }
}
