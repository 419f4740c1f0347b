//! Run defaults loaded from `bf.toml` in the XDG config home.
//!
//! ```toml
//! [run]
//! timeout_ms = 5000
//! max_steps = 1000000
//! strict_brackets = true
//! ```
//!
//! Each setting resolves as: CLI flag, then environment variable, then this
//! file, then the built-in default. `BF_CONFIG` points at an alternate file.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use cross_xdg::BaseDirs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Wall-clock limit for a run. `None` lets a run take as long as it needs.
    pub timeout_ms: Option<u64>,
    /// Maximum executed instructions. `None` is unlimited.
    pub max_steps: Option<u64>,
    /// Reject unmatched brackets before running.
    pub strict_brackets: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            max_steps: None,
            strict_brackets: true,
        }
    }
}

static RUN_CONFIG: OnceLock<RunConfig> = OnceLock::new();

pub fn run_config() -> &'static RunConfig {
    RUN_CONFIG.get_or_init(|| load_from_toml().unwrap_or_default())
}

/// Timeout in milliseconds: `--timeout`, then `BF_TIMEOUT_MS`, then `bf.toml`.
pub fn resolve_timeout_ms(flag: Option<u64>) -> Option<u64> {
    flag.or_else(|| env_u64("BF_TIMEOUT_MS"))
        .or(run_config().timeout_ms)
}

/// Step limit: `--max-steps`, then `BF_MAX_STEPS`, then `bf.toml`.
pub fn resolve_max_steps(flag: Option<u64>) -> Option<u64> {
    flag.or_else(|| env_u64("BF_MAX_STEPS"))
        .or(run_config().max_steps)
}

/// Eager bracket validation unless `--lenient` was given or the file turns it off.
pub fn resolve_strict_brackets(lenient: bool) -> bool {
    !lenient && run_config().strict_brackets
}

fn env_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|s| s.trim().parse::<u64>().ok())
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("BF_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // On Linux: resolves to /home/<user>/.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let config_home = base_dirs.config_home();

    let mut path = PathBuf::from(config_home);
    path.push("bf.toml");
    Some(path)
}

fn load_from_toml() -> Option<RunConfig> {
    let content = fs::read_to_string(config_path()?).ok()?;
    Some(parse_config(&content))
}

/// Parse the `[run]` section of a `bf.toml` document.
///
/// Only `key = value` lines are understood. Unknown keys and values that
/// fail to parse keep their defaults.
pub fn parse_config(content: &str) -> RunConfig {
    let mut in_run = false;
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            in_run = line[1..line.len() - 1].trim() == "run";
            continue;
        }
        if !in_run { continue; }
        if let Some((key, val_raw)) = line.split_once('=') {
            let val_raw = val_raw.trim();
            // Accept quoted or unquoted
            let val = val_raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(val_raw);
            map.insert(key.trim().to_string(), val.to_string());
        }
    }

    let mut cfg = RunConfig::default();

    if let Some(v) = map.get("timeout_ms").and_then(|s| s.parse::<u64>().ok()) {
        cfg.timeout_ms = Some(v);
    }
    if let Some(v) = map.get("max_steps").and_then(|s| s.parse::<u64>().ok()) {
        cfg.max_steps = Some(v);
    }
    if let Some(v) = map.get("strict_brackets").and_then(|s| s.parse::<bool>().ok()) {
        cfg.strict_brackets = v;
    }

    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config(""), RunConfig::default());
    }

    #[test]
    fn reads_run_section() {
        let cfg = parse_config(
            "# defaults for bf\n[run]\ntimeout_ms = 250\nmax_steps = \"1000\"\nstrict_brackets = false\n",
        );
        assert_eq!(cfg.timeout_ms, Some(250));
        assert_eq!(cfg.max_steps, Some(1000));
        assert!(!cfg.strict_brackets);
    }

    #[test]
    fn ignores_other_sections() {
        let cfg = parse_config("[colors]\ntimeout_ms = 10\n[run]\nmax_steps = 7\n");
        assert_eq!(cfg.timeout_ms, None);
        assert_eq!(cfg.max_steps, Some(7));
    }

    #[test]
    fn bad_values_keep_defaults() {
        let cfg = parse_config("[run]\ntimeout_ms = soon\nstrict_brackets = maybe\n");
        assert_eq!(cfg, RunConfig::default());
    }
}
