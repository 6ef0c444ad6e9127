//! Built-in exclusion sets.

/// Version control and IDE clutter, excluded on every run.
pub const GENERAL_DIRS: &[&str] = &[".git", ".svn", ".hg", ".idea", ".vscode"];
pub const GENERAL_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

pub const PYTHON_DIRS: &[&str] = &[
    "__pycache__",
    ".venv",
    "venv",
    "env",
    ".eggs",
    "*.egg-info",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    "htmlcov",
    "build",
    "dist",
    "pip-wheel-metadata",
];
pub const PYTHON_FILES: &[&str] = &["pip-freeze.txt", "requirements.txt"];
pub const PYTHON_EXTENSIONS: &[&str] = &[".pyc", ".pyo", ".so", ".lock"];

pub const FRONTEND_DIRS: &[&str] = &["node_modules", ".next", "out", "public", "static"];
pub const FRONTEND_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "next-env.d.ts",
];
pub const FRONTEND_EXTENSIONS: &[&str] = &[".log", ".tmp", ".lock"];
