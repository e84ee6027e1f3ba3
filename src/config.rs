use crate::cli::RunCommand;
use crate::error::{MatchlogError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "matchlog.toml";
pub const DEFAULT_CONTENT_DIR: &str = "content";
pub const DEFAULT_WEIGHTS_FILE: &str = "weights.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "match_results.csv";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchlogConfig {
    pub paths: Option<PathsConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    pub content_dir: Option<PathBuf>,
    pub weights_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
}

/// The three file locations a run operates on, fully resolved.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub content_dir: PathBuf,
    pub weights_file: PathBuf,
    pub output_file: PathBuf,
}

pub fn load_config(root: &Path) -> Result<Option<MatchlogConfig>> {
    let path = root.join(DEFAULT_CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    let cfg: MatchlogConfig = toml::from_str(&content)
        .map_err(|e| MatchlogError::ConfigParse(format!("{}: {}", path.display(), e)))?;
    Ok(Some(cfg))
}

/// Resolution order for each path: CLI flag, then config file, then the
/// built-in default. Config and default paths are relative to `root`.
pub fn resolve_run_paths(cmd: &RunCommand, config: Option<&MatchlogConfig>) -> RunPaths {
    let paths = config.and_then(|cfg| cfg.paths.as_ref());
    RunPaths {
        content_dir: resolve(
            &cmd.root,
            cmd.content_dir.as_deref(),
            paths.and_then(|p| p.content_dir.as_deref()),
            DEFAULT_CONTENT_DIR,
        ),
        weights_file: resolve(
            &cmd.root,
            cmd.weights_file.as_deref(),
            paths.and_then(|p| p.weights_file.as_deref()),
            DEFAULT_WEIGHTS_FILE,
        ),
        output_file: resolve(
            &cmd.root,
            cmd.output.as_deref(),
            paths.and_then(|p| p.output_file.as_deref()),
            DEFAULT_OUTPUT_FILE,
        ),
    }
}

pub fn resolve_weights_path(
    root: &Path,
    flag: Option<&Path>,
    config: Option<&MatchlogConfig>,
) -> PathBuf {
    let configured = config
        .and_then(|cfg| cfg.paths.as_ref())
        .and_then(|paths| paths.weights_file.as_deref());
    resolve(root, flag, configured, DEFAULT_WEIGHTS_FILE)
}

fn resolve(root: &Path, flag: Option<&Path>, configured: Option<&Path>, default: &str) -> PathBuf {
    match flag {
        Some(path) => path.to_path_buf(),
        None => root.join(configured.unwrap_or(Path::new(default))),
    }
}
