mod spawn;

pub use spawn::{LaunchedProcess, spawn_process};
