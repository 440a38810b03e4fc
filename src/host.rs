//! Host capabilities - services the embedding process provides
//!
//! The launch engine never talks to the desktop directly; dialogs, external
//! file opening and logging go through the `Host` trait so the embedding
//! process (or a test) can supply its own implementation.

use std::error::Error;
use std::process::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct DialogOptions {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub buttons: Vec<String>,
    pub default_index: Option<usize>,
    pub cancel_index: Option<usize>,
}

impl DialogOptions {
    pub fn message(title: &str, message: &str) -> Self {
        DialogOptions {
            kind: DialogKind::Info,
            title: title.to_string(),
            message: message.to_string(),
            buttons: vec!["Ok".to_string()],
            default_index: Some(0),
            cancel_index: None,
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        DialogOptions {
            kind: DialogKind::Error,
            ..DialogOptions::message(title, message)
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub source: String,
    pub content: String,
}

impl LogEntry {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        LogEntry {
            source: source.into(),
            content: content.into(),
        }
    }
}

pub trait Host: Send + Sync {
    /// Show a dialog and return the index of the chosen button.
    fn open_dialog(&self, options: DialogOptions) -> usize;

    /// Open a file or folder with the desktop's default application.
    fn open_external(&self, path: &str) -> Result<(), Box<dyn Error>>;

    /// Append a log entry. Never blocks the launch flow.
    fn log(&self, entry: LogEntry);
}

/// Production host: desktop dialogs, xdg-open and stdout logging.
pub struct DesktopHost;

impl Host for DesktopHost {
    fn open_dialog(&self, options: DialogOptions) -> usize {
        use dialog::DialogBox;
        let _ = dialog::Message::new(options.message.as_str())
            .title(options.title.as_str())
            .show();
        options.default_index.unwrap_or(0)
    }

    fn open_external(&self, path: &str) -> Result<(), Box<dyn Error>> {
        let status = if cfg!(target_os = "windows") {
            Command::new("cmd").args(["/C", "start", "", path]).status()?
        } else if cfg!(target_os = "macos") {
            Command::new("open").arg(path).status()?
        } else {
            Command::new("xdg-open").arg(path).status()?
        };

        if !status.success() {
            return Err(format!("opener exited with {}", status).into());
        }
        Ok(())
    }

    fn log(&self, entry: LogEntry) {
        println!("[exolaunch] {} - {}", entry.source, entry.content);
    }
}
