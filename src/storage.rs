// ABOUTME: Document writer rooted at the configured output directory
// ABOUTME: Creates category folders, truncating writes, and frontmatter parsing

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header fields as written at the top of every note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub last_updated: String,
    #[serde(default)]
    pub summary: String,
}

pub struct DocumentWriter {
    root: PathBuf,
}

impl DocumentWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DocumentWriter { root: root.into() }
    }

    pub fn target(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Writes `header` then `body` to `relative` under the root, replacing any
    /// existing file. Returns the full path written.
    pub fn write(&self, relative: &Path, header: &str, body: &str) -> Result<PathBuf> {
        let target = self.target(relative);
        let write_err = |source| Error::Write {
            path: target.clone(),
            source,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut file = File::create(&target).map_err(write_err)?;
        file.write_all(header.as_bytes()).map_err(write_err)?;
        file.write_all(body.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        Ok(target)
    }
}

pub fn read_frontmatter(md_path: &Path) -> Result<Option<Frontmatter>> {
    if !md_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(md_path)?;

    let Some(rest) = content.strip_prefix("---\n") else {
        return Ok(None);
    };

    if let Some(end_pos) = rest.find("\n---\n") {
        let yaml = &rest[..end_pos];
        let fm: Frontmatter = serde_yaml::from_str(yaml).map_err(|e| {
            Error::Filesystem(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to parse frontmatter: {}", e),
            ))
        })?;
        Ok(Some(fm))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod write_tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let writer = DocumentWriter::new(temp.path());

        let written = writer
            .write(Path::new("notes/deep-dives/my_note.md"), "HEAD\n", "body\n")
            .unwrap();

        assert_eq!(written, temp.path().join("notes/deep-dives/my_note.md"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "HEAD\nbody\n");
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let temp = TempDir::new().unwrap();
        let writer = DocumentWriter::new(temp.path());
        let rel = Path::new("notes/misc/note.md");

        writer
            .write(rel, "first header\n", "a much longer first body\n")
            .unwrap();
        let written = writer.write(rel, "h\n", "b\n").unwrap();

        assert_eq!(fs::read_to_string(written).unwrap(), "h\nb\n");
    }

    #[test]
    fn test_write_into_existing_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("notes/misc")).unwrap();
        let writer = DocumentWriter::new(temp.path());

        assert!(writer.write(Path::new("notes/misc/a.md"), "", "").is_ok());
        assert!(writer.write(Path::new("notes/misc/b.md"), "", "").is_ok());
    }

    #[test]
    fn test_write_failure_is_write_error() {
        let temp = TempDir::new().unwrap();
        // A regular file where a directory is expected
        fs::write(temp.path().join("notes"), "not a dir").unwrap();
        let writer = DocumentWriter::new(temp.path());

        let result = writer.write(Path::new("notes/misc/a.md"), "h", "b");
        match result {
            Err(Error::Write { path, .. }) => {
                assert_eq!(path, temp.path().join("notes/misc/a.md"))
            }
            other => panic!("expected Write error, got {:?}", other),
        }
    }
}
