//! Filesystem helpers shared by commands

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use walkdir::WalkDir;

const BYTES_PER_KB: f64 = 1024.0;
const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Size in bytes of a file, or of every file below a directory.
///
/// Unreadable entries are skipped; a missing path is 0.
pub fn path_size(path: &Path) -> u64 {
    if path.is_file() {
        return fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    }
    if !path.is_dir() {
        return 0;
    }
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Human readable size with two decimals, e.g. `1.50 KB`
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in SIZE_UNITS {
        if size < BYTES_PER_KB {
            return format!("{:.2} {}", size, unit);
        }
        size /= BYTES_PER_KB;
    }
    format!("{:.2} YB", size * BYTES_PER_KB)
}

/// Recursively copy `src` into a new directory `dst`
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<()> {
    if dst.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' already exists", dst.display()),
        ));
    }
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Append `line` as its own line, creating the file and parents if needed
pub fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let needs_newline = match fs::read_to_string(path) {
        Ok(content) => !content.is_empty() && !content.ends_with('\n'),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            false
        }
        Err(e) => return Err(e),
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_newline {
        writeln!(file)?;
    }
    writeln!(file, "{}", line)
}

/// Remove every line matching `predicate`; returns how many were removed
pub fn remove_lines<F>(path: &Path, predicate: F) -> io::Result<usize>
where
    F: Fn(&str) -> bool,
{
    let content = fs::read_to_string(path)?;
    let mut removed = 0;
    let kept: Vec<&str> = content
        .split_inclusive('\n')
        .filter(|line| {
            if predicate(line.trim_end_matches(['\n', '\r'])) {
                removed += 1;
                false
            } else {
                true
            }
        })
        .collect();

    if removed > 0 {
        fs::write(path, kept.concat())?;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(512), "512.00 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024 * 3), "3.00 MB");
    }

    #[test]
    fn test_path_size_file_and_dir() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(temp_dir.path().join("a.txt"), "12345").unwrap();
        fs::write(sub.join("b.txt"), "123").unwrap();

        assert_eq!(path_size(&temp_dir.path().join("a.txt")), 5);
        assert_eq!(path_size(&sub), 3);
        assert_eq!(path_size(temp_dir.path()), 8);
        assert_eq!(path_size(&temp_dir.path().join("missing")), 0);
    }

    #[test]
    fn test_copy_dir() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested/file.txt"), "data").unwrap();

        let dst = temp_dir.path().join("dst");
        copy_dir(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(dst.join("nested/file.txt")).unwrap(), "data");

        // Refuses to merge into an existing directory
        assert!(copy_dir(&src, &dst).is_err());
    }

    #[test]
    fn test_append_line_adds_separator() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rc");
        fs::write(&path, "existing").unwrap();

        append_line(&path, "export A=1").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing\nexport A=1\n");
    }

    #[test]
    fn test_append_line_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".config/fish/config.fish");

        append_line(&path, "set x 1").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "set x 1\n");
    }

    #[test]
    fn test_remove_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rc");
        fs::write(&path, "keep\ndrop me\nkeep too\ndrop me\n").unwrap();

        let removed = remove_lines(&path, |line| line == "drop me").unwrap();
        assert_eq!(removed, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep\nkeep too\n");
    }
}
