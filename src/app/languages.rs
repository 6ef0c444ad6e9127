use std::path::Path;

/// Syntax label for a fenced block, or `""` when nothing matches.
/// Exact file names take precedence over extensions.
pub fn label_for(path: &Path) -> &'static str {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    if let Some(label) = label_for_name(&name) {
        return label;
    }

    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .and_then(|ext| label_for_extension(&ext))
        .unwrap_or("")
}

fn label_for_name(name: &str) -> Option<&'static str> {
    let label = match name {
        "Dockerfile" => "dockerfile",
        "Makefile" | "makefile" => "makefile",
        _ => return None,
    };
    Some(label)
}

/// `ext` is lowercase and has no leading dot.
fn label_for_extension(ext: &str) -> Option<&'static str> {
    let label = match ext {
        "py" | "pyi" | "pyx" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "jsx" => "jsx",
        "tsx" => "tsx",
        "vue" => "vue",

        "html" | "htm" | "xhtml" => "html",
        "css" => "css",
        "scss" => "scss",
        "sass" => "sass",
        "less" => "less",

        "xml" => "xml",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "md" | "markdown" => "markdown",
        "toml" => "toml",
        "ini" | "cfg" | "conf" => "ini",

        "sh" | "bash" | "zsh" | "fish" => "bash",
        "bat" | "cmd" => "batch",
        "ps1" => "powershell",

        "c" | "h" => "c",
        "cpp" | "hpp" | "cc" | "cxx" | "hh" => "cpp",
        "cs" | "csx" => "csharp",
        "java" => "java",
        "jsp" => "jsp",
        "go" => "go",
        "rs" => "rust",
        "php" | "phtml" | "php3" | "php4" | "php5" | "php7" | "php8" => "php",
        "rb" | "rake" => "ruby",
        "erb" => "erb",
        "sql" => "sql",
        "swift" => "swift",
        "kt" | "kts" => "kotlin",
        "scala" | "sc" => "scala",
        "r" => "r",
        "lua" => "lua",
        "pl" | "pm" | "t" => "perl",
        "dart" => "dart",
        // .m is shared with MATLAB; Objective-C is the more common case
        "m" | "mm" => "objectivec",

        "dockerfile" => "dockerfile",
        "mk" => "makefile",
        "diff" | "patch" => "diff",
        "graphql" | "gql" => "graphql",
        _ => return None,
    };
    Some(label)
}
