use clap::{arg, command};
use std::io;
use std::path::PathBuf;

use crate::merge::{self, MergeOptions};

pub fn run() -> io::Result<()> {
    let matches = command!()
        .about("Recursively merge every file with a given extension into one annotated text file")
        .arg(arg!([ROOT] "Root directory to scan (defaults to the current directory)").required(false))
        .arg(
            arg!(-e --extension <EXT> "File extension to match (leading dot optional)")
                .required(false)
                .default_value("swift"),
        )
        .arg(
            arg!(-o --output <FILE> "Output file name (defaults to merged_<ext>_files.txt)")
                .required(false),
        )
        .arg(arg!(--ignore <PATTERN> ... "Glob patterns for file or directory names to skip").required(false))
        .get_matches();

    let root = matches
        .get_one::<String>("ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let extension = matches
        .get_one::<String>("extension")
        .map(|ext| ext.trim_start_matches('.').to_string())
        .unwrap_or_default();

    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("merged_{}_files.txt", extension)));

    let ignore_patterns: Vec<String> = matches
        .get_many::<String>("ignore")
        .unwrap_or_default()
        .cloned()
        .collect();

    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", root.display()),
        ));
    }

    let options = MergeOptions {
        extension,
        ignore_patterns,
    };

    merge::merge_tree(&root, &output, &options)?;

    Ok(())
}
