use crate::app::languages::label_for;
use crate::app::models::Collection;
use anyhow::{Context, Result};
use pathdiff::diff_paths;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Bytes sampled when deciding whether a file is binary.
const BINARY_SAMPLE_SIZE: usize = 1024;

const BINARY_PLACEHOLDER: &str = "[binary file - content omitted]";
const NON_UTF8_PLACEHOLDER: &str = "[file contains non-UTF-8 data - content omitted]";

/// Serializes a collection into an output document.
pub trait DocumentWriter {
    fn write(&self, output: &Path, collection: &Collection, root: &Path) -> Result<()>;
}

/// Writes the tree followed by one fenced block per file.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownWriter;

impl DocumentWriter for MarkdownWriter {
    fn write(&self, output: &Path, collection: &Collection, root: &Path) -> Result<()> {
        let file = File::create(output)
            .with_context(|| format!("Failed to create output file {}", output.display()))?;
        let mut out = BufWriter::new(file);

        self.render(&mut out, collection, root)
            .and_then(|_| out.flush())
            .with_context(|| format!("Failed to write output file {}", output.display()))
    }
}

impl MarkdownWriter {
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        collection: &Collection,
        root: &Path,
    ) -> io::Result<()> {
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        writeln!(out, "# 🌳 Project structure: {}\n", root_name)?;
        writeln!(out, "```")?;
        for line in &collection.tree {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "```\n")?;
        writeln!(out, "---\n")?;

        writeln!(out, "# 📜 File contents\n")?;

        for path in &collection.files {
            let relative = diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
            writeln!(
                out,
                "## 📄 File: `{}`",
                relative.to_string_lossy().replace('\\', "/")
            )?;

            if is_binary(path) {
                writeln!(out, "```\n{}\n```\n", BINARY_PLACEHOLDER)?;
                continue;
            }

            let label = label_for(path);
            writeln!(out, "```{}", label)?;
            match fs::read_to_string(path) {
                Ok(content) => out.write_all(content.trim_end().as_bytes())?,
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    log::debug!("Non-UTF-8 content in {}", path.display());
                    out.write_all(NON_UTF8_PLACEHOLDER.as_bytes())?;
                }
                Err(err) => {
                    log::info!("Failed to read {}: {}", path.display(), err);
                    write!(out, "Failed to read file: {}", err)?;
                }
            }
            writeln!(out, "\n```\n")?;
        }

        Ok(())
    }
}

/// A null byte or invalid UTF-8 in the first [`BINARY_SAMPLE_SIZE`] bytes marks
/// a file as binary. Files that cannot be opened count as text so the content
/// read reports the error.
pub fn is_binary(path: &Path) -> bool {
    let mut sample = Vec::with_capacity(BINARY_SAMPLE_SIZE);
    let read = File::open(path)
        .and_then(|file| file.take(BINARY_SAMPLE_SIZE as u64).read_to_end(&mut sample));
    if let Err(err) = read {
        log::debug!("Binary check failed for {}: {}", path.display(), err);
        return false;
    }

    is_binary_sample(&sample)
}

fn is_binary_sample(sample: &[u8]) -> bool {
    if sample.contains(&0) {
        return true;
    }

    match std::str::from_utf8(sample) {
        Ok(_) => false,
        // None means the sample ends inside a multi-byte character
        Err(err) => err.error_len().is_some(),
    }
}
