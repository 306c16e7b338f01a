use glob::Pattern;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

pub struct MergeOptions {
    /// Extension to match, without the leading dot.
    pub extension: String,
    /// Glob patterns matched against entry basenames; matches are skipped.
    pub ignore_patterns: Vec<String>,
}

/// Walks `root`, appending every matching file as a `//<name>` block to
/// `output_path`. Failures reading a file or a subdirectory are logged and
/// skipped; an unreadable root and failures writing the output abort.
pub fn merge_tree(root: &Path, output_path: &Path, options: &MergeOptions) -> io::Result<()> {
    let mut outfile = File::create(output_path)?;
    // Resolved after creation so the walk can recognize the output file and
    // skip it when it happens to carry the matched extension.
    let output_abs = output_path.canonicalize()?;

    let suffix = format!(".{}", options.extension.trim_start_matches('.'));
    let ignore = compile_patterns(&options.ignore_patterns);

    let entries = sorted_entries(root, &ignore)?;
    merge_entries(entries, &suffix, &ignore, &output_abs, &mut outfile)?;
    outfile.flush()?;

    Ok(())
}

fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|raw| match Pattern::new(raw) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                eprintln!("Warning: Skipping invalid ignore pattern {}: {}", raw, e);
                None
            }
        })
        .collect()
}

fn should_ignore(name: &str, ignore: &[Pattern]) -> bool {
    ignore.iter().any(|pattern| pattern.matches(name))
}

fn sorted_entries(dir: &Path, ignore: &[Pattern]) -> io::Result<Vec<fs::DirEntry>> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| !should_ignore(&entry.file_name().to_string_lossy(), ignore))
        .collect();

    // Sort entries by name
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(entries)
}

fn merge_entries(
    entries: Vec<fs::DirEntry>,
    suffix: &str,
    ignore: &[Pattern],
    output_abs: &Path,
    outfile: &mut File,
) -> io::Result<()> {
    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            // Only the directory read is skippable; write errors propagate.
            match sorted_entries(&path, ignore) {
                Ok(children) => merge_entries(children, suffix, ignore, output_abs, outfile)?,
                Err(e) => {
                    eprintln!(
                        "Warning: Skipping directory {} due to error: {}",
                        path.display(),
                        e
                    );
                }
            }
        } else if path.is_file() {
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if !name.ends_with(suffix) {
                continue;
            }

            if path.canonicalize().map(|p| p == output_abs).unwrap_or(false) {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(content) => write_block(outfile, &name, &content)?,
                Err(e) => {
                    eprintln!(
                        "Warning: Skipping file {} due to error: {}",
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    Ok(())
}

fn write_block(outfile: &mut File, name: &str, content: &str) -> io::Result<()> {
    write!(outfile, "//{}\n{}\n\n", name, content)
}
