//! Command building (pure, no I/O)
//!
//! Turns a resolved absolute path, an argument string and a mapping table
//! into the final command string plus working directory. Identical inputs
//! (including the OS) always produce identical output.

use std::sync::LazyLock;

use regex::Regex;

use crate::launch::types::{
    COMPAT_LAYER_COMMAND, LaunchError, NAMED_MIDI_PLAYER, OsKind, ResolvedCommand,
};
use crate::mappings::{CommandMapping, MappingRule};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Which rule governs a launch. The named-executable override is a discrete
/// variant so its platform restriction stays explicit.
#[derive(Debug)]
pub enum RuleSelection<'a> {
    NamedExecutableOverride,
    Extension(&'a MappingRule),
    Default(&'a MappingRule),
}

/// Filename component, tolerating either separator style.
pub fn filename_of(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Directory component, tolerating either separator style.
pub fn dirname_of(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(0) => &path[..1],
        Some(idx) => &path[..idx],
        None => ".",
    }
}

/// Lowercase extension without the dot, empty when there is none.
pub fn extension_of(path: &str) -> String {
    let name = filename_of(path);
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => name[idx + 1..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Pick the rule for a path. The default rule is only consulted when no
/// extension rule matches; falling through to a missing or unusable default
/// is broken configuration and must never silently emit a broken command.
pub fn select_rule<'a>(
    abs_path: &str,
    table: &'a CommandMapping,
    os: OsKind,
) -> Result<RuleSelection<'a>, LaunchError> {
    if !os.is_windows() && filename_of(abs_path).eq_ignore_ascii_case(NAMED_MIDI_PLAYER) {
        return Ok(RuleSelection::NamedExecutableOverride);
    }

    let ext = extension_of(abs_path);
    for rule in &table.commands_mapping {
        if rule.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            return Ok(RuleSelection::Extension(rule));
        }
    }

    match &table.default_mapping {
        Some(rule) if rule.is_usable() => Ok(RuleSelection::Default(rule)),
        _ => Err(LaunchError::Configuration(
            "command mapping table has no usable default rule".to_string(),
        )),
    }
}

/// Quote a path for the target OS. Non-Windows escapes each space with a
/// backslash and never quotes; Windows double-quotes only when the path
/// contains a space and uses backslash separators.
pub fn quote_path(path: &str, os: OsKind) -> String {
    if os.is_windows() {
        let path = path.replace('/', "\\");
        if path.contains(' ') {
            format!("\"{}\"", path)
        } else {
            path
        }
    } else {
        path.replace(' ', "\\ ")
    }
}

fn assemble(parts: &[&str]) -> String {
    let joined = parts.join(" ");
    WHITESPACE.replace_all(joined.trim(), " ").into_owned()
}

/// Build the final command string and working directory for a path.
pub fn build_command(
    abs_path: &str,
    args: &str,
    table: &CommandMapping,
    os: OsKind,
) -> Result<ResolvedCommand, LaunchError> {
    match select_rule(abs_path, table, os)? {
        RuleSelection::NamedExecutableOverride => {
            // The player resolves its config relative to itself, so it runs
            // from its own directory and only the bare filename is passed.
            let filename = quote_path(filename_of(abs_path), os);
            Ok(ResolvedCommand {
                command: assemble(&[COMPAT_LAYER_COMMAND, filename.as_str(), args]),
                cwd: Some(dirname_of(abs_path).to_string()),
            })
        }
        RuleSelection::Extension(rule) | RuleSelection::Default(rule) => {
            let mut parts: Vec<&str> = vec![rule.command.as_str()];
            let quoted;
            if rule.include_filename {
                quoted = quote_path(abs_path, os);
                parts.push(quoted.as_str());
            }
            if rule.include_args {
                parts.push(args);
            }
            let cwd = rule
                .set_cwd_to_file_dir
                .then(|| dirname_of(abs_path).to_string());
            Ok(ResolvedCommand {
                command: assemble(&parts),
                cwd,
            })
        }
    }
}

/// Split a built command string into argv form for spawning. Understands
/// the quoting `build_command` emits: double quotes on Windows, backslash
/// escapes elsewhere.
pub fn split_command(command: &str, os: OsKind) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\\' if !os.is_windows() => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ' ' if !in_quotes => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(extensions: &[&str], command: &str) -> MappingRule {
        MappingRule {
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            command: command.to_string(),
            include_filename: true,
            include_args: true,
            set_cwd_to_file_dir: false,
        }
    }

    fn exo_table() -> CommandMapping {
        CommandMapping {
            default_mapping: Some(rule(&[], "xdg-open")),
            commands_mapping: vec![rule(&["exe"], "flatpak run com.retro_exo.wine")],
        }
    }

    // ── rule selection ──

    #[test]
    fn extension_rule_wins_over_default() {
        let table = exo_table();
        let cmd = build_command("/g/DOOM.exe", "-fullscreen", &table, OsKind::Linux).unwrap();

        let flatpak = cmd.command.find("flatpak run com.retro_exo.wine").unwrap();
        let path = cmd.command.find("DOOM.exe").unwrap();
        let args = cmd.command.find("-fullscreen").unwrap();
        assert!(flatpak < path && path < args);
    }

    #[test]
    fn unmatched_extension_falls_back_to_default() {
        let table = exo_table();
        let cmd = build_command("/g/manual.pdf", "", &table, OsKind::Linux).unwrap();
        assert!(cmd.command.contains("xdg-open"));
        assert!(cmd.command.contains("manual.pdf"));
        assert!(!cmd.command.contains("flatpak"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let table = exo_table();
        let cmd = build_command("/g/DOOM.EXE", "", &table, OsKind::Linux).unwrap();
        assert!(cmd.command.contains("flatpak run com.retro_exo.wine"));
    }

    #[test]
    fn first_rule_wins_on_overlapping_extensions() {
        let table = CommandMapping {
            default_mapping: Some(rule(&[], "xdg-open")),
            commands_mapping: vec![rule(&["exe"], "first-runner"), rule(&["exe"], "second-runner")],
        };
        let cmd = build_command("/g/DOOM.exe", "", &table, OsKind::Linux).unwrap();
        assert!(cmd.command.contains("first-runner"));
    }

    #[test]
    fn missing_default_mapping_fails_only_when_it_is_needed() {
        let table = CommandMapping {
            default_mapping: None,
            commands_mapping: vec![rule(&["exe"], "wine")],
        };
        let err = build_command("/g/manual.pdf", "", &table, OsKind::Linux).unwrap_err();
        assert!(matches!(err, LaunchError::Configuration(_)));
    }

    #[test]
    fn extension_rule_applies_without_a_default_mapping() {
        let table = CommandMapping {
            default_mapping: None,
            commands_mapping: vec![rule(&["exe"], "flatpak run com.retro_exo.wine")],
        };
        let cmd = build_command("/g/DOOM.exe", "", &table, OsKind::Linux).unwrap();
        assert!(cmd.command.contains("flatpak run com.retro_exo.wine"));
        assert!(cmd.command.contains("DOOM.exe"));
    }

    #[test]
    fn empty_default_command_is_a_configuration_error() {
        let table = CommandMapping {
            default_mapping: Some(rule(&[], "  ")),
            commands_mapping: vec![],
        };
        let err = build_command("/g/manual.pdf", "", &table, OsKind::Linux).unwrap_err();
        assert!(matches!(err, LaunchError::Configuration(_)));
    }

    // ── quoting ──

    #[test]
    fn non_windows_escapes_spaces_and_never_quotes() {
        let table = exo_table();
        let cmd = build_command("/g/My Game/GAME.exe", "", &table, OsKind::Linux).unwrap();
        assert!(cmd.command.contains("/g/My\\ Game/GAME.exe"));
        assert!(!cmd.command.contains('"'));
    }

    #[test]
    fn windows_quotes_spaced_paths_with_backslashes() {
        let table = exo_table();
        let cmd = build_command("C:/g/My Game/GAME.exe", "", &table, OsKind::Windows).unwrap();
        assert!(cmd.command.contains("\"C:\\g\\My Game\\GAME.exe\""));
    }

    #[test]
    fn windows_leaves_unspaced_paths_unquoted() {
        let table = exo_table();
        let cmd = build_command("C:/g/DOOM.exe", "", &table, OsKind::Windows).unwrap();
        assert!(cmd.command.contains("C:\\g\\DOOM.exe"));
        assert!(!cmd.command.contains('"'));
    }

    // ── assembly hygiene ──

    #[test]
    fn command_never_contains_undefined_or_stray_whitespace() {
        let table = exo_table();
        for (path, args) in [
            ("/g/DOOM.exe", ""),
            ("/g/manual.pdf", ""),
            ("/g/DOOM.exe", "  -fullscreen   -nosound "),
        ] {
            let cmd = build_command(path, args, &table, OsKind::Linux).unwrap();
            assert!(!cmd.command.contains("undefined"), "{}", cmd.command);
            assert!(!cmd.command.contains("  "), "{}", cmd.command);
            assert_eq!(cmd.command, cmd.command.trim());
        }
    }

    // ── working directory ──

    #[test]
    fn cwd_is_ambient_unless_rule_requests_file_dir() {
        let mut table = exo_table();
        let cmd = build_command("/g/Doom/DOOM.exe", "", &table, OsKind::Linux).unwrap();
        assert_eq!(cmd.cwd, None);

        table.commands_mapping[0].set_cwd_to_file_dir = true;
        let cmd = build_command("/g/Doom/DOOM.exe", "", &table, OsKind::Linux).unwrap();
        assert_eq!(cmd.cwd.as_deref(), Some("/g/Doom"));
    }

    // ── named-executable override ──

    #[test]
    fn midi_player_forces_cwd_and_compat_layer_off_windows() {
        let table = exo_table();
        let cmd = build_command("/g/Audio/MidiPly.exe", "song.mid", &table, OsKind::Linux).unwrap();
        assert!(cmd.command.starts_with("wine "));
        assert!(cmd.command.contains("MidiPly.exe"));
        assert!(cmd.command.contains("song.mid"));
        assert!(!cmd.command.contains("/g/Audio/"));
        assert_eq!(cmd.cwd.as_deref(), Some("/g/Audio"));
    }

    #[test]
    fn midi_player_override_matches_case_insensitively() {
        let table = exo_table();
        let cmd = build_command("/g/Audio/MIDIPLY.EXE", "", &table, OsKind::MacOs).unwrap();
        assert!(cmd.command.starts_with("wine "));
    }

    #[test]
    fn midi_player_override_never_fires_on_windows() {
        let table = exo_table();
        let cmd =
            build_command("C:/g/Audio/MidiPly.exe", "song.mid", &table, OsKind::Windows).unwrap();
        assert!(cmd.command.contains("flatpak run com.retro_exo.wine"));
        assert!(!cmd.command.starts_with("wine "));
        assert_eq!(cmd.cwd, None);
    }

    // ── extension extraction ──

    #[test]
    fn extension_of_handles_odd_names() {
        assert_eq!(extension_of("/g/DOOM.exe"), "exe");
        assert_eq!(extension_of("C:\\g\\DOOM.EXE"), "exe");
        assert_eq!(extension_of("/g/README"), "");
        assert_eq!(extension_of("/g/archive.tar."), "");
        assert_eq!(extension_of("/g.dir/README"), "");
    }

    // ── argv splitting ──

    #[test]
    fn split_command_honors_backslash_escapes_on_unix() {
        let argv = split_command("xdg-open /g/My\\ Game/manual.pdf", OsKind::Linux);
        assert_eq!(argv, vec!["xdg-open", "/g/My Game/manual.pdf"]);
    }

    #[test]
    fn split_command_honors_quotes_on_windows() {
        let argv = split_command(
            "launcher.exe \"C:\\g\\My Game\\GAME.exe\" -fullscreen",
            OsKind::Windows,
        );
        assert_eq!(argv, vec!["launcher.exe", "C:\\g\\My Game\\GAME.exe", "-fullscreen"]);
    }

    #[test]
    fn split_command_keeps_multiword_templates_apart() {
        let argv = split_command("flatpak run com.retro_exo.wine DOOM.exe", OsKind::Linux);
        assert_eq!(argv.len(), 4);
        assert_eq!(argv[0], "flatpak");
    }
}
