use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "code2md",
    author,
    version,
    about = "Collect a project's structure and file contents into one Markdown file"
)]
pub struct Cli {
    /// Path to the project directory
    #[arg(default_value = ".")]
    pub project_path: PathBuf,

    /// Directory to save the output file in (default: the project directory)
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose progress output
    #[arg(short, long)]
    pub verbose: bool,

    /// Directories to exclude, comma-separated (e.g. "dir1,dir2" or "*.egg-info")
    #[arg(short = 'd', long, value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// Files to exclude, comma-separated (e.g. "file1.txt,file2.json")
    #[arg(short = 'f', long, value_delimiter = ',')]
    pub exclude_files: Vec<String>,

    /// File extensions to exclude, comma-separated (e.g. ".log,.tmp")
    #[arg(short = 'e', long, value_delimiter = ',')]
    pub exclude_extensions: Vec<String>,

    /// Include files and directories whose names start with a dot
    #[arg(long)]
    pub no_exclude_dotfiles: bool,

    /// Add the standard exclusions for Python projects
    #[arg(long)]
    pub add_python_defaults: bool,

    /// Add the standard exclusions for frontend projects
    #[arg(long)]
    pub add_frontend_defaults: bool,

    /// Also honor .gitignore files
    #[arg(long)]
    pub gitignore: bool,

    /// Use a named preset from ~/.config/code2md/presets.toml
    #[arg(long)]
    pub preset: Option<String>,
}
