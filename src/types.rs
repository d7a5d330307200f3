use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Output format tokens offered by the format resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    Jpg,
    Bmp,
    WebP,
    PdfOptimize,
    Docx,
    Txt,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 7] = [
        OutputFormat::Png,
        OutputFormat::Jpg,
        OutputFormat::Bmp,
        OutputFormat::WebP,
        OutputFormat::PdfOptimize,
        OutputFormat::Docx,
        OutputFormat::Txt,
    ];

    /// Label shown in the output format menu.
    pub fn token(&self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpg => "JPG",
            OutputFormat::Bmp => "BMP",
            OutputFormat::WebP => "WebP",
            OutputFormat::PdfOptimize => "PDF (Optimize)",
            OutputFormat::Docx => "DOCX",
            OutputFormat::Txt => "TXT",
        }
    }

    /// Extension (without dot) forced onto output paths.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Bmp => "bmp",
            OutputFormat::WebP => "webp",
            OutputFormat::PdfOptimize => "pdf",
            OutputFormat::Docx => "docx",
            OutputFormat::Txt => "txt",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(
            self,
            OutputFormat::Png | OutputFormat::Jpg | OutputFormat::Bmp | OutputFormat::WebP
        )
    }

    /// Whether the encoder keeps an alpha channel. Targets that don't get
    /// transparency flattened onto white.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, OutputFormat::Jpg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl Serialize for OutputFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl FromStr for OutputFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let alias = match wanted.as_str() {
            "jpeg" => Some(OutputFormat::Jpg),
            "optimize" | "pdf-optimize" => Some(OutputFormat::PdfOptimize),
            _ => None,
        };
        alias
            .or_else(|| {
                OutputFormat::ALL.iter().copied().find(|format| {
                    format.token().to_lowercase() == wanted || format.extension() == wanted
                })
            })
            .ok_or_else(|| ConversionError::UnknownFormat {
                format: s.to_string(),
            })
    }
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF processing error: {0}")]
    Pdf(String),

    #[error("PDF is encrypted and cannot be rewritten")]
    EncryptedPdf,

    #[error("Unknown output format: {format}")]
    UnknownFormat { format: String },

    #[error("Unsupported conversion: {from} to {to}")]
    UnsupportedConversion { from: String, to: OutputFormat },

    #[error("PDF rewrite changed page count from {expected} to {actual}")]
    PageCountMismatch { expected: usize, actual: usize },

    #[error("Compression failed: {message}")]
    CompressionFailed { message: String },

    #[error("Conversion worker failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<lopdf::Error> for ConversionError {
    fn from(err: lopdf::Error) -> Self {
        ConversionError::Pdf(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ConversionSettings {
    pub quality: u8,           // 1-100 for JPEG
    pub max_size: Option<u64>, // byte budget for lossy output
    pub max_iterations: u32,   // quality reduction attempts
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            quality: 85,
            max_size: None,
            max_iterations: 5,
        }
    }
}

/// A validated request: one input, one output path, one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub input_size: u64,
    pub output_size: u64,
    pub size_ratio: Option<f64>,
    pub pages: Option<usize>,
}
