use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

const INDENT: &str = "    ";

/// Directory or file names to exclude. Every entry matches its literal name;
/// entries that also parse as globs additionally match by pattern.
#[derive(Debug, Clone)]
pub struct NameFilter {
    names: BTreeSet<String>,
    globs: GlobSet,
}

impl NameFilter {
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = BTreeSet::new();
        let mut builder = GlobSetBuilder::new();

        for entry in entries {
            let entry = entry.into();
            if has_glob_syntax(&entry) {
                match Glob::new(&entry) {
                    Ok(glob) => {
                        builder.add(glob);
                    }
                    Err(err) => log::debug!("Matching {:?} literally: {}", entry, err),
                }
            }
            names.insert(entry);
        }

        Ok(Self {
            names,
            globs: builder.build().context("Failed to build exclusion patterns")?,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.names.contains(name) || self.globs.is_match(name)
    }

    /// Configured entries, for logging.
    pub fn entries(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }
}

fn has_glob_syntax(entry: &str) -> bool {
    entry.contains(['*', '?', '[', '{'])
}

/// Normalizes an extension to lowercase with a single leading dot.
pub fn normalize_extension(ext: &str) -> String {
    format!(".{}", ext.trim().trim_start_matches('.').to_lowercase())
}

/// Everything that decides whether a walked entry makes it into the output.
#[derive(Debug, Clone)]
pub struct ExclusionConfig {
    pub dirs: NameFilter,
    pub files: NameFilter,
    pub extensions: BTreeSet<String>,
    pub exclude_dotfiles: bool,
    /// Exact paths kept out of the walk, such as the output document.
    pub paths: HashSet<PathBuf>,
}

impl ExclusionConfig {
    pub fn new<D, F, E>(dirs: D, files: F, extensions: E, exclude_dotfiles: bool) -> Result<Self>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            dirs: NameFilter::new(dirs)?,
            files: NameFilter::new(files)?,
            extensions: extensions
                .into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .collect(),
            exclude_dotfiles,
            paths: HashSet::new(),
        })
    }

    pub fn with_excluded_path(mut self, path: PathBuf) -> Self {
        self.paths.insert(path);
        self
    }

    fn is_hidden(&self, name: &str) -> bool {
        self.exclude_dotfiles && name.starts_with('.')
    }

    /// A directory failing this check is pruned along with everything below it.
    pub fn allows_dir(&self, path: &Path, name: &str) -> bool {
        !self.dirs.matches(name) && !self.is_hidden(name) && !self.paths.contains(path)
    }

    pub fn allows_file(&self, path: &Path, name: &str) -> bool {
        if self.files.matches(name) || self.is_hidden(name) || self.paths.contains(path) {
            return false;
        }

        match path.extension() {
            Some(ext) => !self
                .extensions
                .contains(&normalize_extension(&ext.to_string_lossy())),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One line of the rendered project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub depth: usize,
    pub kind: EntryKind,
    pub name: String,
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = INDENT.repeat(self.depth);
        match self.kind {
            EntryKind::Directory => write!(f, "{}📂 {}/", indent, self.name),
            EntryKind::File => write!(f, "{}📄 {}", indent, self.name),
        }
    }
}

/// Result of a walk: tree lines in traversal order and the files to include.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Collection {
    pub tree: Vec<TreeLine>,
    pub files: Vec<PathBuf>,
}
