use glob::{MatchOptions, Pattern};
use std::io;
use std::path::Path;
use tracing::error;
use walkdir::WalkDir;

/// Case-insensitive file-name filter built from glob patterns such as `*.png`.
#[derive(Debug, Clone)]
pub struct ImageMatcher {
    patterns: Vec<Pattern>,
}

impl ImageMatcher {
    pub fn new(globs: &[String]) -> Self {
        let patterns = globs
            .iter()
            .filter_map(|glob| match Pattern::new(glob) {
                Ok(p) => Some(p),
                Err(e) => {
                    error!("Invalid image pattern '{}': {}", glob, e);
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(file_name, options))
    }
}

/// Immediate subdirectories of `dir`, sorted by name.
pub fn list_subdirectories(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| walk_error(dir, err))?;
        if entry.file_type().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// File names directly inside `dir` accepted by `matcher`, sorted by name.
pub fn list_images(dir: &Path, matcher: &ImageMatcher) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| walk_error(dir, err))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if matcher.matches(&name) {
            names.push(name.into_owned());
        }
    }
    Ok(names)
}

fn walk_error(dir: &Path, err: walkdir::Error) -> io::Error {
    let kind = err
        .io_error()
        .map(|e| e.kind())
        .unwrap_or(io::ErrorKind::Other);
    io::Error::new(
        kind,
        format!("Error reading directory {}: {}", dir.display(), err),
    )
}
