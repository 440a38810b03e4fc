mod game;
mod host;
mod launch;
mod mappings;
mod paths;

use std::path::PathBuf;
use std::sync::Arc;

use crate::game::load_game_record;
use crate::host::{DesktopHost, Host};
use crate::launch::{LaunchOpts, Launcher, OsKind};
use crate::mappings::{load_command_mapping, load_exec_mappings};
use crate::paths::PATH_DATA;

const USAGE_TEXT: &str = "\
usage: exolaunch [options] <game.json>

options:
    --setup                launch the game's installer instead of the game
    --native               prefer native executables from the exec mappings
    --collection <dir>     collection root (default: current directory)
    --mappings <dir>       directory with commands_<os>.json and execs.json
                           (default: the exolaunch data directory)
    --help                 show this text";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        return;
    }

    let mut setup = false;
    let mut native = false;
    let mut collection_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut mappings_dir = PATH_DATA.clone();
    let mut record_path: Option<PathBuf> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--setup" => setup = true,
            "--native" => native = true,
            "--collection" => {
                let Some(value) = iter.next() else {
                    eprintln!("[exolaunch] --collection needs a directory");
                    std::process::exit(1);
                };
                collection_root = PathBuf::from(value);
            }
            "--mappings" => {
                let Some(value) = iter.next() else {
                    eprintln!("[exolaunch] --mappings needs a directory");
                    std::process::exit(1);
                };
                mappings_dir = PathBuf::from(value);
            }
            other if other.starts_with("--") => {
                eprintln!("[exolaunch] unknown option: {}", other);
                println!("{}", USAGE_TEXT);
                std::process::exit(1);
            }
            other => record_path = Some(PathBuf::from(other)),
        }
    }

    let Some(record_path) = record_path else {
        println!("{}", USAGE_TEXT);
        std::process::exit(1);
    };

    let game = match load_game_record(&record_path) {
        Ok(game) => game,
        Err(err) => {
            eprintln!(
                "[exolaunch] could not load game record {}: {}",
                record_path.display(),
                err
            );
            std::process::exit(1);
        }
    };

    let host: Arc<dyn Host> = Arc::new(DesktopHost);
    let os = OsKind::current();
    let mappings = load_command_mapping(&mappings_dir, os, host.as_ref());
    let exec_mappings = load_exec_mappings(&mappings_dir);

    let launcher = Launcher::new(os, mappings, exec_mappings, host);
    let opts = LaunchOpts {
        collection_root,
        native,
    };

    if setup {
        launcher.launch_game_setup(&game, &opts);
    } else {
        launcher.launch_game(&game, &opts);
    }
}
