//! File entries, simplified type labels and the list that owns them.

use mime_guess::mime;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub file_type: String,
}

impl FileEntry {
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            file_type: simplified_type(path),
        })
    }

    /// `"photo.png (PNG Image, 12.00 KB)"`
    pub fn display_text(&self) -> String {
        format!(
            "{} ({}, {})",
            self.name,
            self.file_type,
            human_readable_size(self.size)
        )
    }
}

/// Coarse type label used to pick the output format menu.
pub fn simplified_type(path: &Path) -> String {
    if let Some(guess) = mime_guess::from_path(path).first() {
        if guess.type_() == mime::IMAGE {
            return format!("{} Image", guess.subtype().as_str().to_uppercase());
        }
        return match guess.essence_str() {
            "application/pdf" => "PDF Document".to_string(),
            "text/plain" => "Text Document".to_string(),
            other => other.to_string(),
        };
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{} File", ext.to_uppercase()),
        _ => "Unknown Type".to_string(),
    }
}

pub fn human_readable_size(size_in_bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    let size = size_in_bytes as f64;
    if size_in_bytes < KB {
        format!("{} B", size_in_bytes)
    } else if size_in_bytes < MB {
        format!("{:.2} KB", size / KB as f64)
    } else if size_in_bytes < GB {
        format!("{:.2} MB", size / MB as f64)
    } else {
        format!("{:.2} GB", size / GB as f64)
    }
}

/// Files queued for conversion, in the order they were added.
#[derive(Debug, Default)]
pub struct FileList {
    entries: Vec<FileEntry>,
}

impl FileList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every path that points at a readable file. Returns the paths that
    /// were skipped.
    pub fn add_paths<I, P>(&mut self, paths: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut skipped = Vec::new();
        for path in paths {
            let path = path.as_ref();
            match FileEntry::from_path(path) {
                Ok(entry) => {
                    log::info!("Added {}", entry.display_text());
                    self.entries.push(entry);
                }
                Err(e) => {
                    log::warn!("File not found - {}: {}", path.display(), e);
                    skipped.push(path.to_path_buf());
                }
            }
        }
        skipped
    }

    pub fn remove(&mut self, index: usize) -> Option<FileEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        log::info!("Cleared {} file(s) from the list", count);
    }

    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn image_mime_types_become_image_labels() {
        assert_eq!(simplified_type(Path::new("a.png")), "PNG Image");
        assert_eq!(simplified_type(Path::new("a.JPG")), "JPEG Image");
        assert_eq!(simplified_type(Path::new("dir/a.webp")), "WEBP Image");
        assert_eq!(simplified_type(Path::new("a.bmp")), "BMP Image");
    }

    #[test]
    fn documents_get_named_labels() {
        assert_eq!(simplified_type(Path::new("report.pdf")), "PDF Document");
        assert_eq!(simplified_type(Path::new("notes.txt")), "Text Document");
    }

    #[test]
    fn other_mime_types_fall_back_to_essence() {
        assert_eq!(simplified_type(Path::new("data.json")), "application/json");
    }

    #[test]
    fn unknown_extensions_use_extension_or_unknown() {
        assert_eq!(simplified_type(Path::new("blob.zzqx")), "ZZQX File");
        assert_eq!(simplified_type(Path::new("Makefile")), "Unknown Type");
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(human_readable_size(0), "0 B");
        assert_eq!(human_readable_size(1023), "1023 B");
        assert_eq!(human_readable_size(1024), "1.00 KB");
        assert_eq!(human_readable_size(1536), "1.50 KB");
        assert_eq!(human_readable_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(human_readable_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn entry_display_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let entry = FileEntry::from_path(&path).unwrap();
        assert_eq!(entry.name, "photo.png");
        assert_eq!(entry.size, 2048);
        assert_eq!(entry.display_text(), "photo.png (PNG Image, 2.00 KB)");
    }

    #[test]
    fn list_skips_missing_files_and_directories() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("doc.pdf");
        fs::write(&present, b"%PDF-1.5").unwrap();
        let missing = dir.path().join("gone.png");

        let mut list = FileList::new();
        let skipped = list.add_paths([present.clone(), missing.clone(), dir.path().to_path_buf()]);

        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().path, present);
        assert_eq!(skipped, vec![missing, dir.path().to_path_buf()]);
    }

    #[test]
    fn remove_and_clear() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        fs::write(&a, b"a").unwrap();
        fs::write(&b, b"b").unwrap();

        let mut list = FileList::new();
        list.add_paths([&a, &b]);
        assert_eq!(list.remove(0).unwrap().name, "a.png");
        assert!(list.remove(5).is_none());
        assert_eq!(list.len(), 1);

        list.clear();
        assert!(list.is_empty());
    }
}
