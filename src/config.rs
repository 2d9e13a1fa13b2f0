//! Persistent default flags.
//!
//! Config files hold ordinary command-line flags, one or more per line. Blank
//! lines and lines starting with `#` are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub number: bool,
    pub no_highlight: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` on top of `self`. Switches are OR-ed, options from
    /// `other` win when present.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            number: self.number || other.number,
            no_highlight: self.no_highlight || other.no_highlight,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("mpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("mpad").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mpadrc")
}

/// Read flags from `path`. A missing file yields the defaults.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

// `--log-file=PATH` takes the rest of its line so paths may contain spaces.
fn line_tokens(line: &str) -> Vec<String> {
    let (flags, log_file) = match line.find("--log-file=") {
        Some(start) => (&line[..start], Some(line[start..].trim_end())),
        None => (line, None),
    };
    flags
        .split_whitespace()
        .chain(log_file)
        .map(ToOwned::to_owned)
        .collect()
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# mpad defaults (saved with --save)".to_string()];
    if flags.number {
        lines.push("--number".to_string());
    }
    if flags.no_highlight {
        lines.push("--no-highlight".to_string());
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file={}", log_file.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list, skipping anything else
/// (the program name, the file argument, `--save`).
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut tokens = tokens.iter();
    while let Some(token) = tokens.next() {
        match token.as_str() {
            "--number" | "-n" => flags.number = true,
            "--no-highlight" => flags.no_highlight = true,
            "--log-file" => {
                if let Some(next) = tokens.next() {
                    flags.log_file = Some(PathBuf::from(next));
                }
            }
            other => {
                if let Some(value) = other.strip_prefix("--log-file=") {
                    flags.log_file = Some(PathBuf::from(value));
                }
            }
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| (*arg).to_string()).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "mpad",
            "--number",
            "--no-highlight",
            "--log-file",
            "mpad.log",
            "main.c",
        ]));
        assert!(flags.number);
        assert!(flags.no_highlight);
        assert_eq!(flags.log_file, Some(PathBuf::from("mpad.log")));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_unknown() {
        let flags = parse_flag_tokens(&tokens(&["mpad", "--save", "notes.txt"]));
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_dangling_log_file_is_ignored() {
        let flags = parse_flag_tokens(&tokens(&["--log-file"]));
        assert_eq!(flags.log_file, None);
    }

    #[test]
    fn test_config_union_merges_later_options() {
        let file = ConfigFlags {
            number: true,
            log_file: Some(PathBuf::from("a.log")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_highlight: true,
            log_file: Some(PathBuf::from("b.log")),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.number);
        assert!(merged.no_highlight);
        assert_eq!(merged.log_file, Some(PathBuf::from("b.log")));

        let kept = file.union(&ConfigFlags::default());
        assert_eq!(kept.log_file, Some(PathBuf::from("a.log")));
    }

    #[test]
    fn test_log_file_with_spaces_survives_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        let flags = ConfigFlags {
            number: true,
            log_file: Some(PathBuf::from("my logs/mpad run.log")),
            ..ConfigFlags::default()
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);
    }

    #[test]
    fn test_line_tokens_keep_log_path_whole() {
        assert_eq!(
            line_tokens("--number --log-file=a b.log"),
            vec!["--number".to_string(), "--log-file=a b.log".to_string()]
        );
        assert_eq!(
            line_tokens("--number  --no-highlight"),
            vec!["--number".to_string(), "--no-highlight".to_string()]
        );
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            number: true,
            no_highlight: true,
            log_file: Some(PathBuf::from("mpad.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }
}
