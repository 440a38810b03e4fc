//! Game launch orchestration
//!
//! These entry points favor resilience: one misconfigured entry is logged
//! and skipped so the player still reaches the game. Spawn failures never
//! propagate out of them.

use crate::game::GameRecord;
use crate::host::LogEntry;
use crate::launch::operations::spawn_process;
use crate::launch::pure::command::build_command;
use crate::launch::pure::resolve::{resolve_app_path, rewrite_filename};
use crate::launch::types::{LaunchOpts, Launcher, SETUP_SCRIPT_FILENAME};

impl Launcher {
    /// Start a game: auto-run additional applications first (in metadata
    /// order, suspending on wait-for-exit entries), then spawn the main
    /// process. Returns once the main process starts.
    pub fn launch_game(&self, game: &GameRecord, opts: &LaunchOpts) {
        if game.placeholder {
            return;
        }

        for add_app in game
            .additional_applications
            .iter()
            .filter(|a| a.auto_run_before)
        {
            match self.launch_additional_app(add_app, opts) {
                Ok(Some(process)) if add_app.wait_for_exit => {
                    if let Err(err) = process.wait() {
                        self.host.log(LogEntry::new(
                            "Game Launcher",
                            format!(
                                "warning: could not observe additional application \"{}\": {}",
                                add_app.name, err
                            ),
                        ));
                    }
                }
                Ok(_) => {}
                // A failed pre-run entry does not block the rest of the
                // sequence or the game itself.
                Err(err) => {
                    self.host.log(LogEntry::new(
                        "Game Launcher",
                        format!(
                            "additional application \"{}\" failed to launch: {}",
                            add_app.name, err
                        ),
                    ));
                }
            }
        }

        self.spawn_main(&game.application_path, game, opts);
    }

    /// Start a game's installer: the application path with its filename
    /// swapped for the setup script, fire-and-forget.
    pub fn launch_game_setup(&self, game: &GameRecord, opts: &LaunchOpts) {
        if game.placeholder {
            return;
        }
        let setup_path = rewrite_filename(&game.application_path, SETUP_SCRIPT_FILENAME);
        self.spawn_main(&setup_path, game, opts);
    }

    /// Resolve, build and spawn without awaiting exit. Failures are logged,
    /// never raised.
    fn spawn_main(&self, app_path: &str, game: &GameRecord, opts: &LaunchOpts) {
        let root = opts.collection_root.to_string_lossy();
        let abs_path = resolve_app_path(app_path, &root, &self.exec_mappings, opts.native, self.os);

        let resolved = match build_command(&abs_path, &game.launch_command, &self.mappings, self.os)
        {
            Ok(resolved) => resolved,
            Err(err) => {
                self.host.log(LogEntry::new(
                    "Game Launcher",
                    format!("could not build launch command for \"{}\": {}", game.title, err),
                ));
                return;
            }
        };

        self.host.log(LogEntry::new(
            "Game Launcher",
            format!("launching \"{}\": {}", game.title, resolved.command),
        ));

        if let Err(err) = spawn_process(&resolved, self.os, self.host.clone()) {
            self.host.log(LogEntry::new(
                "Game Launcher",
                format!("could not launch \"{}\": {}", game.title, err),
            ));
        }
    }
}
