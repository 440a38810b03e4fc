//! Single-command and additional-application launches

use crate::game::AdditionalApp;
use crate::host::{DialogOptions, LogEntry};
use crate::launch::operations::{LaunchedProcess, spawn_process};
use crate::launch::pure::command::build_command;
use crate::launch::pure::resolve::resolve_app_path;
use crate::launch::types::{
    LaunchError, LaunchOpts, Launcher, PSEUDO_PATH_EXTRAS, PSEUDO_PATH_MESSAGE,
};

impl Launcher {
    /// Build and spawn a command for an already-absolute path. The returned
    /// handle's `wait()` resolves on any exit code; the call itself fails
    /// only on configuration or spawn-level errors.
    pub fn launch_command(
        &self,
        abs_path: &str,
        args: &str,
    ) -> Result<LaunchedProcess, LaunchError> {
        let resolved = build_command(abs_path, args, &self.mappings, self.os)?;
        spawn_process(&resolved, self.os, self.host.clone())
    }

    /// Launch an additional application, handling the two legacy
    /// pseudo-paths that never spawn a process.
    pub fn launch_additional_app(
        &self,
        add_app: &AdditionalApp,
        opts: &LaunchOpts,
    ) -> Result<Option<LaunchedProcess>, LaunchError> {
        match add_app.application_path.as_str() {
            PSEUDO_PATH_MESSAGE => {
                self.host.open_dialog(DialogOptions::message(
                    "About This Game",
                    &add_app.launch_command,
                ));
                Ok(None)
            }
            PSEUDO_PATH_EXTRAS => {
                let root = opts.collection_root.to_string_lossy();
                // Extras are addressed posix-style regardless of OS.
                let path = format!(
                    "{}/Extras/{}",
                    root.trim_end_matches(['/', '\\']),
                    add_app.launch_command
                );
                if let Err(err) = self.host.open_external(&path) {
                    self.host.open_dialog(DialogOptions::error(
                        "Failed to Open Extras",
                        &format!("{}\nPath: {}", err, path),
                    ));
                }
                Ok(None)
            }
            relative => {
                let root = opts.collection_root.to_string_lossy();
                let abs_path =
                    resolve_app_path(relative, &root, &self.exec_mappings, opts.native, self.os);
                self.host.log(LogEntry::new(
                    "Game Launcher",
                    format!("launching additional application: {}", abs_path),
                ));
                self.launch_command(&abs_path, &add_app.launch_command)
                    .map(Some)
            }
        }
    }
}
