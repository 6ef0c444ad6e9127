use crate::app::cli::Cli;
use crate::app::defaults;
use crate::app::models::ExclusionConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct PresetConfig {
    pub exclude_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
    pub exclude_extensions: Vec<String>,
    pub python_defaults: bool,
    pub frontend_defaults: bool,
    pub exclude_dotfiles: Option<bool>,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("code2md").join("presets.toml"))
}

fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content =
        fs::read_to_string(path).context(format!("Failed to read config at {:?}", path))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .context(format!("Failed to parse presets file {:?}", path))?;

    Ok(parsed.presets)
}

/// Picks the preset named on the command line, else one named after the project.
fn select_preset(
    mut presets: HashMap<String, PresetConfig>,
    requested: Option<&str>,
    project_name: Option<&str>,
) -> Result<PresetConfig> {
    if let Some(name) = requested {
        return presets
            .remove(name)
            .with_context(|| format!("Preset '{}' not found", name));
    }

    Ok(project_name
        .and_then(|name| presets.remove(name))
        .unwrap_or_default())
}

/// Collects trimmed, non-empty items in order, dropping duplicates.
#[derive(Default)]
struct ListBuilder {
    seen: BTreeSet<String>,
    items: Vec<String>,
}

impl ListBuilder {
    fn extend<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            let item = item.as_ref().trim();
            if !item.is_empty() && self.seen.insert(item.to_string()) {
                self.items.push(item.to_string());
            }
        }
    }
}

/// Merges general defaults, the preset and the CLI flags, in that order.
pub fn build_exclusions(cli: &Cli, preset: &PresetConfig) -> Result<ExclusionConfig> {
    let mut dirs = ListBuilder::default();
    let mut files = ListBuilder::default();
    let mut extensions = ListBuilder::default();

    dirs.extend(defaults::GENERAL_DIRS);
    files.extend(defaults::GENERAL_FILES);

    if cli.add_python_defaults || preset.python_defaults {
        dirs.extend(defaults::PYTHON_DIRS);
        files.extend(defaults::PYTHON_FILES);
        extensions.extend(defaults::PYTHON_EXTENSIONS);
    }

    if cli.add_frontend_defaults || preset.frontend_defaults {
        dirs.extend(defaults::FRONTEND_DIRS);
        files.extend(defaults::FRONTEND_FILES);
        extensions.extend(defaults::FRONTEND_EXTENSIONS);
    }

    dirs.extend(&preset.exclude_dirs);
    files.extend(&preset.exclude_files);
    extensions.extend(&preset.exclude_extensions);

    dirs.extend(&cli.exclude_dirs);
    files.extend(&cli.exclude_files);
    extensions.extend(&cli.exclude_extensions);

    let exclude_dotfiles = !cli.no_exclude_dotfiles && preset.exclude_dotfiles.unwrap_or(true);

    ExclusionConfig::new(dirs.items, files.items, extensions.items, exclude_dotfiles)
}

pub fn resolve_config(cli: &Cli, project_name: Option<&str>) -> Result<ExclusionConfig> {
    let presets = load_presets_file(&presets_path()?)?;
    let preset = select_preset(presets, cli.preset.as_deref(), project_name)?;
    log::debug!("Using preset: {:?}", preset);

    build_exclusions(cli, &preset)
}
