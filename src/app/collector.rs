use crate::app::models::{Collection, EntryKind, ExclusionConfig, TreeLine};
use ignore::{DirEntry, WalkBuilder};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Walks a root directory and decides what ends up in the document.
pub trait Collector {
    fn collect(&self, root: &Path, exclusions: &ExclusionConfig) -> Collection;
}

/// Top-down walk that prunes excluded directories before descending.
/// Within a directory, files come first, then subdirectories, each sorted by name.
#[derive(Debug, Default, Clone)]
pub struct DirectoryCollector {
    respect_gitignore: bool,
}

impl DirectoryCollector {
    pub fn new(respect_gitignore: bool) -> Self {
        Self { respect_gitignore }
    }

    fn walker(&self, root: &Path, exclusions: &ExclusionConfig) -> ignore::Walk {
        let filter = Arc::new(exclusions.clone());

        WalkBuilder::new(root)
            .standard_filters(false)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .require_git(false)
            .follow_links(false)
            .sort_by_file_path(files_first)
            .filter_entry(move |entry| keep_entry(&filter, entry))
            .build()
    }
}

impl Collector for DirectoryCollector {
    fn collect(&self, root: &Path, exclusions: &ExclusionConfig) -> Collection {
        log::info!("Start collecting files from: {}", root.display());
        log::info!("Excluded directories: {:?}", exclusions.dirs.entries());
        log::info!("Excluded files: {:?}", exclusions.files.entries());
        log::info!("Excluded extensions: {:?}", exclusions.extensions);

        let mut collection = Collection::default();
        let mut progress = DirProgress::default();

        for result in self.walker(root, exclusions) {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::info!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            let depth = entry.depth();
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());

            if is_dir {
                let name = if depth == 0 {
                    root_name(root)
                } else {
                    entry.file_name().to_string_lossy().into_owned()
                };
                progress.enter(entry.path());
                collection.tree.push(TreeLine {
                    depth,
                    kind: EntryKind::Directory,
                    name,
                });
            } else if entry.path().is_file() {
                progress.add_file();
                collection.tree.push(TreeLine {
                    depth,
                    kind: EntryKind::File,
                    name: entry.file_name().to_string_lossy().into_owned(),
                });
                collection.files.push(entry.into_path());
            } else {
                log::debug!("Skipping non-regular entry: {}", entry.path().display());
            }
        }

        progress.finish();
        log::info!("Total files to include: {}", collection.files.len());

        collection
    }
}

fn keep_entry(exclusions: &ExclusionConfig, entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    let path = entry.path();
    let keep = match entry.file_type() {
        Some(ft) if ft.is_dir() => exclusions.allows_dir(path, &name),
        _ => exclusions.allows_file(path, &name),
    };

    if !keep {
        log::debug!("Excluded: {}", path.display());
    }
    keep
}

fn files_first(a: &Path, b: &Path) -> Ordering {
    is_real_dir(a)
        .cmp(&is_real_dir(b))
        .then_with(|| a.file_name().cmp(&b.file_name()))
}

/// Same classification as the walk itself: links to directories are not directories.
fn is_real_dir(path: &Path) -> bool {
    path.symlink_metadata().is_ok_and(|meta| meta.is_dir())
}

fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

/// Per-directory file counts for verbose output.
#[derive(Default)]
struct DirProgress {
    current: Option<PathBuf>,
    files: usize,
}

impl DirProgress {
    fn enter(&mut self, dir: &Path) {
        self.finish();
        log::info!("Processing directory: {}", dir.display());
        self.current = Some(dir.to_path_buf());
    }

    fn add_file(&mut self) {
        self.files += 1;
    }

    fn finish(&mut self) {
        if let Some(dir) = self.current.take() {
            if self.files > 0 {
                log::info!("  Added files from {}: {}", dir.display(), self.files);
            }
        }
        self.files = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for rel in files {
            write_file(dir.path(), rel, b"x\n");
        }
        dir
    }

    fn exclusions(dirs: &[&str], files: &[&str], exts: &[&str], dotfiles: bool) -> ExclusionConfig {
        ExclusionConfig::new(
            dirs.iter().copied(),
            files.iter().copied(),
            exts.iter().copied(),
            dotfiles,
        )
        .unwrap()
    }

    fn relative(root: &Path, collection: &Collection) -> Vec<String> {
        collection
            .files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn rendered(collection: &Collection) -> Vec<String> {
        collection.tree.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn walks_files_before_subdirectories_in_name_order() {
        let dir = project(&["b.txt", "a.txt", "sub/z.md", "sub/deeper/y.rs", "aaa/c.txt"]);
        let root = dir.path();

        let cfg = exclusions(&[], &[], &[], true);
        let collection = DirectoryCollector::default().collect(root, &cfg);

        assert_eq!(
            relative(root, &collection),
            vec!["a.txt", "b.txt", "aaa/c.txt", "sub/z.md", "sub/deeper/y.rs"]
        );

        let root_name = root.file_name().unwrap().to_string_lossy();
        assert_eq!(
            rendered(&collection),
            vec![
                format!("📂 {}/", root_name),
                "    📄 a.txt".to_string(),
                "    📄 b.txt".to_string(),
                "    📂 aaa/".to_string(),
                "        📄 c.txt".to_string(),
                "    📂 sub/".to_string(),
                "        📄 z.md".to_string(),
                "        📂 deeper/".to_string(),
                "            📄 y.rs".to_string(),
            ]
        );
    }

    #[test]
    fn pruning_is_transitive() {
        let dir = project(&["keep.py", "build/out.py", "build/nested/main.py", "src/build/x.py"]);
        let root = dir.path();

        let collection =
            DirectoryCollector::default().collect(root, &exclusions(&["build"], &[], &[], true));

        assert_eq!(relative(root, &collection), vec!["keep.py"]);
        assert!(!rendered(&collection).iter().any(|l| l.contains("build")));
        assert!(rendered(&collection).iter().any(|l| l.ends_with("📂 src/")));
    }

    #[test]
    fn file_rules_filter_names_and_extensions() {
        let dir = project(&[
            "a.py",
            "b.PYC",
            "requirements.txt",
            "notes.txt",
            "x.egg-info/PKG-INFO",
        ]);
        let root = dir.path();

        let cfg = exclusions(&["*.egg-info"], &["requirements.txt"], &["pyc"], true);
        let collection = DirectoryCollector::default().collect(root, &cfg);

        assert_eq!(relative(root, &collection), vec!["a.py", "notes.txt"]);
    }

    #[test]
    fn dotfile_toggle() {
        let dir = project(&[".env", "main.rs", ".github/ci.yml", "src/.hidden"]);
        let root = dir.path();

        let on = DirectoryCollector::default().collect(root, &exclusions(&[], &[], &[], true));
        assert_eq!(relative(root, &on), vec!["main.rs"]);
        assert!(on
            .tree
            .iter()
            .skip(1)
            .all(|line| !line.name.starts_with('.')));

        let off = DirectoryCollector::default().collect(root, &exclusions(&[], &[], &[], false));
        assert_eq!(
            relative(root, &off),
            vec![".env", "main.rs", ".github/ci.yml", "src/.hidden"]
        );
    }

    #[test]
    fn tree_files_match_included_files() {
        let dir = project(&["a/b/c.txt", "a/d.txt", "e.txt", "skip/f.txt"]);
        let root = dir.path();

        let collection =
            DirectoryCollector::default().collect(root, &exclusions(&["skip"], &[], &[], true));

        let tree_files: Vec<&str> = collection
            .tree
            .iter()
            .filter(|l| l.kind == EntryKind::File)
            .map(|l| l.name.as_str())
            .collect();
        let listed: Vec<String> = collection
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(tree_files, listed);
    }

    #[test]
    fn collecting_twice_is_identical() {
        let dir = project(&["z.rs", "m/n.rs", "m/a.rs", "b/c/d.rs"]);
        let cfg = exclusions(&[], &[], &[], true);
        let collector = DirectoryCollector::default();

        assert_eq!(collector.collect(dir.path(), &cfg), collector.collect(dir.path(), &cfg));
    }

    #[test]
    fn excluded_path_skips_output_document() {
        let dir = project(&["main.rs", "project_x_structure.md", "sub/project_x_structure.md"]);
        let root = dir.path();

        let cfg = exclusions(&[], &[], &[], true)
            .with_excluded_path(root.join("project_x_structure.md"));
        let collection = DirectoryCollector::default().collect(root, &cfg);

        assert_eq!(
            relative(root, &collection),
            vec!["main.rs", "sub/project_x_structure.md"]
        );
    }

    #[test]
    fn gitignore_is_opt_in() {
        let dir = project(&["kept.txt", "ignored.txt"]);
        let root = dir.path();
        write_file(root, ".gitignore", b"ignored.txt\n");
        let cfg = exclusions(&[], &[], &[], true);

        let plain = DirectoryCollector::new(false).collect(root, &cfg);
        assert_eq!(relative(root, &plain), vec!["ignored.txt", "kept.txt"]);

        let honoring = DirectoryCollector::new(true).collect(root, &cfg);
        assert_eq!(relative(root, &honoring), vec!["kept.txt"]);
    }

    #[test]
    fn python_example_project() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_file(root, "src/main.py", b"print('hi')\n");
        write_file(root, "src/__pycache__/cache.bin", &[0, 1, 2]);
        write_file(root, "README.md", b"# Readme\n");
        write_file(root, ".env", b"SECRET=1\n");

        let cfg = exclusions(&["__pycache__"], &["requirements.txt"], &[".pyc"], true);
        let collection = DirectoryCollector::default().collect(root, &cfg);

        assert_eq!(relative(root, &collection), vec!["README.md", "src/main.py"]);
    }

    #[test]
    fn bracketed_route_dirs_are_pruned_by_name() {
        let dir = project(&["pages/index.tsx", "pages/[id]/page.tsx"]);
        let root = dir.path();

        let collection =
            DirectoryCollector::default().collect(root, &exclusions(&["[id]"], &[], &[], true));

        assert_eq!(relative(root, &collection), vec!["pages/index.tsx"]);
    }

    #[test]
    fn invalid_pattern_still_prunes_its_literal_name() {
        let dir = project(&["keep.txt", "weird{name/inner.txt"]);
        let root = dir.path();

        let collection = DirectoryCollector::default()
            .collect(root, &exclusions(&["weird{name"], &[], &[], true));

        assert_eq!(relative(root, &collection), vec!["keep.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = project(&["a.txt", "locked/secret.txt", "z/b.txt"]);
        let root = dir.path();
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores mode bits
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let cfg = exclusions(&[], &[], &[], true);
        let collection = DirectoryCollector::default().collect(root, &cfg);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(relative(root, &collection), vec!["a.txt", "z/b.txt"]);
        let lines = rendered(&collection);
        let at = lines.iter().position(|l| l == "    📂 locked/").unwrap();
        assert_eq!(lines[at + 1], "    📂 z/");
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let dir = project(&["real/file.txt"]);
        let root = dir.path();
        std::os::unix::fs::symlink(root.join("real"), root.join("linked_dir")).unwrap();
        std::os::unix::fs::symlink(root.join("real/file.txt"), root.join("linked.txt")).unwrap();

        let cfg = exclusions(&[], &[], &[], true);
        let collection = DirectoryCollector::default().collect(root, &cfg);

        assert_eq!(relative(root, &collection), vec!["linked.txt", "real/file.txt"]);
        assert_eq!(
            files_first(&root.join("linked_dir"), &root.join("real")),
            Ordering::Less
        );
    }
}
