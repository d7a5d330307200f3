//! Selection state and pre-conversion validation for an interactive session.

use crate::file_handler::{FileEntry, FileList};
use crate::formats;
use crate::types::{ConversionJob, OutputFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please select a file to convert.")]
    NoFileSelected,

    #[error("Please select only a single file to convert.")]
    MultipleFilesSelected,

    #[error("The file {0} could not be found or is invalid.")]
    MissingInput(PathBuf),

    #[error("Please select a valid output format (got {0:?}).")]
    InvalidOutputFormat(String),
}

/// What the output format menu shows for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputOptions {
    SelectFile,
    SelectSingleFile,
    NoConversions,
    Formats(&'static [OutputFormat]),
}

impl OutputOptions {
    /// Placeholder text when there is nothing to choose.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            OutputOptions::SelectFile => Some("--Select a file--"),
            OutputOptions::SelectSingleFile => Some("--Select a single file for options--"),
            OutputOptions::NoConversions => Some("--No conversions available--"),
            OutputOptions::Formats(_) => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ConversionSession {
    files: FileList,
    selected: Vec<usize>,
}

impl ConversionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &FileList {
        &self.files
    }

    /// Adds files and returns the skipped paths. The selection is kept.
    pub fn add_files<I, P>(&mut self, paths: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.files.add_paths(paths)
    }

    pub fn remove_file(&mut self, index: usize) -> Option<FileEntry> {
        let removed = self.files.remove(index)?;
        self.selected.retain(|&i| i != index);
        for i in self.selected.iter_mut() {
            if *i > index {
                *i -= 1;
            }
        }
        self.log_options_status();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.selected.clear();
    }

    /// Replaces the selection. Out-of-range indices and duplicates are dropped.
    pub fn select(&mut self, indices: &[usize]) {
        let mut selected: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.files.len())
            .collect();
        selected.sort_unstable();
        selected.dedup();
        if selected != self.selected {
            self.selected = selected;
            self.log_options_status();
        }
    }

    pub fn selected_indices(&self) -> &[usize] {
        &self.selected
    }

    pub fn selection(&self) -> Vec<&FileEntry> {
        self.selected
            .iter()
            .filter_map(|&i| self.files.get(i))
            .collect()
    }

    pub fn output_options(&self) -> OutputOptions {
        match self.selection().as_slice() {
            [] => OutputOptions::SelectFile,
            [entry] => match formats::resolve(&entry.file_type) {
                Some(formats) => OutputOptions::Formats(formats),
                None => OutputOptions::NoConversions,
            },
            _ => OutputOptions::SelectSingleFile,
        }
    }

    /// Status line for the output menu after the selection changed.
    fn options_status(&self) -> Option<String> {
        let name = self.selection().first().map(|e| e.name.clone())?;
        match self.output_options() {
            OutputOptions::Formats(_) => Some(format!("Available output formats updated for {}.", name)),
            OutputOptions::NoConversions => Some(format!("No conversion options for {}.", name)),
            OutputOptions::SelectSingleFile => {
                Some("Select a single file to see conversion options.".to_string())
            }
            OutputOptions::SelectFile => None,
        }
    }

    fn log_options_status(&self) {
        if let Some(status) = self.options_status() {
            log::info!("{}", status);
        }
    }

    /// Validates the selection and chosen format, and works out the output
    /// path. Nothing is read or written.
    pub fn prepare(
        &self,
        format_token: Option<&str>,
        requested_output: Option<&Path>,
    ) -> Result<ConversionJob, SelectionError> {
        let entry = match self.selection().as_slice() {
            [] => return Err(SelectionError::NoFileSelected),
            [entry] => *entry,
            _ => return Err(SelectionError::MultipleFilesSelected),
        };
        prepare_entry(entry, format_token, requested_output)
    }
}

/// Validation shared by the interactive session and the `convert` command.
pub fn prepare_entry(
    entry: &FileEntry,
    format_token: Option<&str>,
    requested_output: Option<&Path>,
) -> Result<ConversionJob, SelectionError> {
    if !entry.path.is_file() {
        return Err(SelectionError::MissingInput(entry.path.clone()));
    }

    let token = format_token.unwrap_or_default();
    let format = token
        .parse::<OutputFormat>()
        .ok()
        .filter(|format| formats::is_offered(&entry.file_type, *format))
        .ok_or_else(|| SelectionError::InvalidOutputFormat(token.to_string()))?;

    Ok(ConversionJob {
        input: entry.path.clone(),
        output: output_path(&entry.path, format, requested_output),
        format,
    })
}

/// `<dir>/<stem>_converted.<ext>` by default. A requested path missing the
/// format's extension gets it appended.
pub fn output_path(input: &Path, format: OutputFormat, requested: Option<&Path>) -> PathBuf {
    let extension = format.extension();
    match requested {
        Some(path) => {
            let has_extension = path
                .to_string_lossy()
                .to_lowercase()
                .ends_with(&format!(".{}", extension));
            if has_extension {
                path.to_path_buf()
            } else {
                let mut forced = path.as_os_str().to_os_string();
                forced.push(format!(".{}", extension));
                PathBuf::from(forced)
            }
        }
        None => {
            let parent = input.parent().unwrap_or_else(|| Path::new("."));
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string());
            parent.join(suggested_file_name(&stem, format))
        }
    }
}

pub fn suggested_file_name(stem: &str, format: OutputFormat) -> String {
    format!("{}_converted.{}", stem, format.extension())
}
