use crate::image_processor::ImageProcessor;
use crate::pdf_processor::PdfProcessor;
use crate::types::*;
use image::ImageFormat;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    ReencodeImage,
    RewritePdf,
}

pub struct FileConverter {
    settings: ConversionSettings,
}

impl FileConverter {
    pub fn new() -> Self {
        Self {
            settings: ConversionSettings::default(),
        }
    }

    pub fn with_settings(settings: ConversionSettings) -> Self {
        Self { settings }
    }

    /// Run a conversion on a blocking worker so the caller's event loop
    /// (progress display) keeps running.
    pub async fn convert(&self, job: &ConversionJob) -> Result<ConversionReport, ConversionError> {
        let job = job.clone();
        let settings = self.settings.clone();
        tokio::task::spawn_blocking(move || convert_file(&job, &settings)).await?
    }
}

impl Default for FileConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one file synchronously. On failure no output file is left behind.
pub fn convert_file(
    job: &ConversionJob,
    settings: &ConversionSettings,
) -> Result<ConversionReport, ConversionError> {
    let (route, content) = read_routed(job).map_err(|e| {
        log::warn!("Cannot convert {}: {}", job.input.display(), e);
        e
    })?;
    let input_name = display_name(&job.input);
    log::info!("Starting conversion of {} to {}...", input_name, job.format);

    let original_size = content.len() as u64;

    let (converted, pages) = match route {
        Route::ReencodeImage => {
            let processor = ImageProcessor::with_settings(settings.clone());
            (processor.convert(&content, job.format)?, None)
        }
        Route::RewritePdf => {
            let rewritten = PdfProcessor::new().optimize_pdf(&content)?;
            (rewritten.bytes, Some(rewritten.pages))
        }
    };

    write_atomically(&job.output, &converted)?;

    let size_ratio = if original_size > 0 {
        Some(converted.len() as f64 / original_size as f64)
    } else {
        None
    };

    log::info!(
        "Successfully converted {} to {} ({} bytes, ratio: {:.2}%)",
        input_name,
        display_name(&job.output),
        converted.len(),
        size_ratio.unwrap_or(1.0) * 100.0
    );

    Ok(ConversionReport {
        input: job.input.clone(),
        output: job.output.clone(),
        format: job.format,
        input_size: original_size,
        output_size: converted.len() as u64,
        size_ratio,
        pages,
    })
}

/// Route by file name first, so a job without a converter is rejected before
/// the input is read. Image targets get a second chance from the file header
/// when the name alone is not recognised.
fn read_routed(job: &ConversionJob) -> Result<(Route, Vec<u8>), ConversionError> {
    match route_for(&job.input, job.format, None) {
        Ok(route) => Ok((route, fs::read(&job.input)?)),
        Err(_) if job.format.is_image() => {
            let content = fs::read(&job.input)?;
            let route = route_for(&job.input, job.format, Some(content.as_slice()))?;
            Ok((route, content))
        }
        Err(err) => Err(err),
    }
}

fn route_for(
    input: &Path,
    target: OutputFormat,
    content: Option<&[u8]>,
) -> Result<Route, ConversionError> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if target.is_image() && readable_image_format(input, content).is_some() {
        return Ok(Route::ReencodeImage);
    }
    if extension == "pdf" && target == OutputFormat::PdfOptimize {
        return Ok(Route::RewritePdf);
    }

    Err(ConversionError::UnsupportedConversion {
        from: if extension.is_empty() {
            "file without extension".to_string()
        } else {
            extension.to_uppercase()
        },
        to: target,
    })
}

/// An input format this build can decode, from the extension or else the
/// magic bytes.
fn readable_image_format(input: &Path, content: Option<&[u8]>) -> Option<ImageFormat> {
    ImageFormat::from_path(input)
        .ok()
        .filter(|format| format.reading_enabled())
        .or_else(|| {
            content
                .and_then(|bytes| image::guess_format(bytes).ok())
                .filter(|format| format.reading_enabled())
        })
}

/// Write through a temporary file in the destination directory, then rename
/// over `path`. An existing target keeps its permissions; a new file gets the
/// mode a plain `fs::write` would give it.
fn write_atomically(path: &Path, content: &[u8]) -> Result<(), ConversionError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".file-converter-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Filtered by the process umask at creation, like File::create.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut temp = builder.tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| ConversionError::Io(e.error))?;
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
