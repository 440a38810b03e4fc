use serde::{Deserialize, Serialize};

/// One extension-keyed command rule from a per-OS mapping file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRule {
    /// Lowercase extensions, no dot. Empty set means the rule never matches
    /// by extension (only useful as the default rule).
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Command template the path and arguments are appended to.
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub include_filename: bool,
    #[serde(default)]
    pub include_args: bool,
    #[serde(default)]
    pub set_cwd_to_file_dir: bool,
}

impl MappingRule {
    /// A rule is usable as the default when it carries a command.
    pub fn is_usable(&self) -> bool {
        !self.command.trim().is_empty()
    }
}

/// Full mapping table for one OS. Loaded once at startup, immutable after.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandMapping {
    #[serde(default)]
    pub default_mapping: Option<MappingRule>,
    /// Ordered; on overlapping extension sets the first rule wins.
    #[serde(default)]
    pub commands_mapping: Vec<MappingRule>,
}

/// Translation from a Windows-relative path to a native equivalent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecMapping {
    pub win32: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub darwin: Option<String>,
}
