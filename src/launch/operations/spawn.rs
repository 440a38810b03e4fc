//! Process spawning and lifecycle relay
//!
//! Spawns a resolved command and forwards everything the process does
//! (stdout/stderr lines, late OS errors, exit status) as `ProcessEvent`s
//! over a channel drained by a single logging thread. The relay is purely
//! observational; it never alters control flow.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::mpsc::{Sender, channel};
use std::thread::JoinHandle;

use crate::host::{Host, LogEntry};
use crate::launch::pure::command::split_command;
use crate::launch::types::{LaunchError, OsKind, ProcessEvent, ResolvedCommand};

/// Handle to a spawned process. Dropping it detaches the process; the relay
/// threads keep logging until it exits.
#[derive(Debug)]
pub struct LaunchedProcess {
    pid: u32,
    monitor: JoinHandle<std::io::Result<ExitStatus>>,
}

impl LaunchedProcess {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Block until the process exits. Any exit code is a successful wait;
    /// an error here means the process could not be observed at all.
    pub fn wait(self) -> std::io::Result<ExitStatus> {
        match self.monitor.join() {
            Ok(result) => result,
            Err(_) => Err(std::io::Error::other("process monitor thread panicked")),
        }
    }
}

fn relay_lines<R: Read + Send + 'static>(
    stream: R,
    tx: Sender<ProcessEvent>,
    make_event: fn(String) -> ProcessEvent,
) {
    std::thread::spawn(move || {
        for line in BufReader::new(stream).lines() {
            match line {
                Ok(line) => {
                    if tx.send(make_event(line)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
}

/// Spawn a resolved command and wire up its lifecycle relay.
pub fn spawn_process(
    resolved: &ResolvedCommand,
    os: OsKind,
    host: Arc<dyn Host>,
) -> Result<LaunchedProcess, LaunchError> {
    let argv = split_command(&resolved.command, os);
    let Some((program, rest)) = argv.split_first() else {
        return Err(LaunchError::Configuration(
            "cannot spawn an empty command".to_string(),
        ));
    };

    let mut cmd = Command::new(program);
    cmd.args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &resolved.cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
        command: resolved.command.clone(),
        source,
    })?;
    let pid = child.id();

    host.log(LogEntry::new(
        "Game Launcher",
        format!("process {} started: {}", pid, resolved.command),
    ));

    let (tx, rx) = channel::<ProcessEvent>();

    if let Some(stdout) = child.stdout.take() {
        relay_lines(stdout, tx.clone(), ProcessEvent::Stdout);
    }
    if let Some(stderr) = child.stderr.take() {
        relay_lines(stderr, tx.clone(), ProcessEvent::Stderr);
    }

    // Single logging thread drains the relay; it ends once every sender
    // (readers + monitor) is gone.
    std::thread::spawn(move || {
        for event in rx {
            host.log(LogEntry::new(format!("Process {}", pid), event.describe()));
        }
    });

    let monitor = std::thread::spawn(move || {
        let result = child.wait();
        match &result {
            Ok(status) => {
                let _ = tx.send(ProcessEvent::Exited(*status));
            }
            Err(err) => {
                let _ = tx.send(ProcessEvent::Error(err.to_string()));
            }
        }
        result
    });

    Ok(LaunchedProcess { pid, monitor })
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::host::DialogOptions;
    use std::error::Error;
    use std::sync::Mutex;

    struct NullHost {
        logs: Mutex<Vec<LogEntry>>,
    }

    impl Host for NullHost {
        fn open_dialog(&self, _options: DialogOptions) -> usize {
            0
        }
        fn open_external(&self, _path: &str) -> Result<(), Box<dyn Error>> {
            Ok(())
        }
        fn log(&self, entry: LogEntry) {
            self.logs.lock().unwrap().push(entry);
        }
    }

    fn null_host() -> Arc<NullHost> {
        Arc::new(NullHost {
            logs: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn nonzero_exit_is_not_a_spawn_failure() {
        let resolved = ResolvedCommand {
            command: "sh -c \"exit 3\"".to_string(),
            cwd: None,
        };
        let host = null_host();
        let process = spawn_process(&resolved, OsKind::current(), host).unwrap();
        let status = process.wait().unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let resolved = ResolvedCommand {
            command: "/nonexistent/exolaunch-test-binary".to_string(),
            cwd: None,
        };
        let err = spawn_process(&resolved, OsKind::current(), null_host()).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[test]
    fn relay_logs_stdout_tagged_with_pid() {
        let resolved = ResolvedCommand {
            command: "sh -c \"echo hello-from-child\"".to_string(),
            cwd: None,
        };
        let host = null_host();
        let process = spawn_process(&resolved, OsKind::current(), host.clone()).unwrap();
        let pid = process.pid();
        process.wait().unwrap();

        // Reader threads race the wait; give the relay a moment to drain.
        for _ in 0..50 {
            if host
                .logs
                .lock()
                .unwrap()
                .iter()
                .any(|e| e.content == "hello-from-child")
            {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        let logs = host.logs.lock().unwrap();
        let line = logs
            .iter()
            .find(|e| e.content == "hello-from-child")
            .expect("stdout line should be relayed");
        assert_eq!(line.source, format!("Process {}", pid));
    }
}
