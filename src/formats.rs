//! Output formats offered for each simplified file type.

use crate::types::OutputFormat;

/// How a rule matches a simplified type label.
#[derive(Debug, Clone, Copy)]
pub enum LabelMatch {
    Contains(&'static str),
    Exact(&'static str),
}

impl LabelMatch {
    fn matches(&self, label: &str) -> bool {
        match self {
            LabelMatch::Contains(needle) => label.contains(needle),
            LabelMatch::Exact(expected) => label == *expected,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    pub label: LabelMatch,
    pub formats: &'static [OutputFormat],
}

// First match wins.
pub static FORMAT_RULES: &[FormatRule] = &[
    FormatRule {
        label: LabelMatch::Contains("Image"),
        formats: &[
            OutputFormat::Png,
            OutputFormat::Jpg,
            OutputFormat::Bmp,
            OutputFormat::WebP,
        ],
    },
    FormatRule {
        label: LabelMatch::Exact("PDF Document"),
        // DOCX and TXT are offered but no converter exists for them yet.
        formats: &[
            OutputFormat::PdfOptimize,
            OutputFormat::Docx,
            OutputFormat::Txt,
        ],
    },
];

/// Ordered output formats for a simplified type label, or `None` when no
/// conversion is available.
pub fn resolve(simplified_type: &str) -> Option<&'static [OutputFormat]> {
    FORMAT_RULES
        .iter()
        .find(|rule| rule.label.matches(simplified_type))
        .map(|rule| rule.formats)
        .filter(|formats| !formats.is_empty())
}

pub fn is_offered(simplified_type: &str, format: OutputFormat) -> bool {
    resolve(simplified_type).is_some_and(|formats| formats.contains(&format))
}
