//! Game metadata records
//!
//! These mirror the shape the collection metadata loader produces. The
//! launch engine only reads them; it never persists or mutates records.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Path of the main executable, relative to the collection root.
    #[serde(default)]
    pub application_path: String,
    /// Argument string passed to the main executable.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub launch_command: String,

    /// Placeholder entries exist in metadata only and are never launched.
    #[serde(default)]
    pub placeholder: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_applications: Vec<AdditionalApp>,
}

/// A secondary launchable entry tied to a game (installer, manual, ...).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalApp {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub application_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub launch_command: String,
    #[serde(default)]
    pub auto_run_before: bool,
    #[serde(default)]
    pub wait_for_exit: bool,
}

pub fn load_game_record(path: &Path) -> Result<GameRecord, Box<dyn Error>> {
    let file = File::open(path)?;
    let record = serde_json::from_reader(BufReader::new(file))?;
    Ok(record)
}
