use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::PilingError;

/// Which sub-extractor produced a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Landxml,
    Dxf,
    Lok,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Landxml => write!(f, "LandXML"),
            SourceFormat::Dxf => write!(f, "DXF"),
            SourceFormat::Lok => write!(f, "LOK"),
        }
    }
}

impl SourceFormat {
    pub const ACCEPTED_EXTENSIONS: &'static [&'static str] = &["xml", "dxf", "lok"];

    /// Accepted extensions for display, e.g. ".xml, .dxf, or .lok".
    pub fn accepted_list() -> String {
        let dotted: Vec<String> = Self::ACCEPTED_EXTENSIONS
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect();
        match dotted.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }

    /// Select the format from a bare extension (without the dot), case-insensitive.
    pub fn from_extension(ext: &str) -> Option<SourceFormat> {
        match ext.trim().trim_start_matches('.').to_lowercase().as_str() {
            "xml" => Some(SourceFormat::Landxml),
            "dxf" => Some(SourceFormat::Dxf),
            "lok" => Some(SourceFormat::Lok),
            _ => None,
        }
    }

    /// Select the format from an uploaded file name.
    pub fn from_file_name(file_name: &str) -> Result<SourceFormat, PilingError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        SourceFormat::from_extension(ext).ok_or_else(|| PilingError::UnsupportedFormat {
            extension: if ext.is_empty() {
                "(none)".into()
            } else {
                ext.to_string()
            },
            accepted: SourceFormat::accepted_list(),
        })
    }
}

/// A planned pile location in project grid units.
///
/// Values are immutable once produced; read them through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPoint {
    id: Option<String>,
    easting: f64,
    northing: f64,
    elevation: f64,
    source_format: SourceFormat,
}

impl DesignPoint {
    pub fn new(
        id: Option<String>,
        easting: f64,
        northing: f64,
        elevation: f64,
        source_format: SourceFormat,
    ) -> Self {
        DesignPoint {
            id: id.filter(|s| !s.trim().is_empty()),
            easting,
            northing,
            elevation,
            source_format,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    /// Label for display; falls back to an empty string like an unnamed CgPoint.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn is_finite(&self) -> bool {
        self.easting.is_finite() && self.northing.is_finite() && self.elevation.is_finite()
    }

    /// Same point produced by a different sub-extractor (LOK re-tags LandXML output).
    pub(crate) fn with_source(self, source_format: SourceFormat) -> Self {
        DesignPoint {
            source_format,
            ..self
        }
    }
}

/// An element dropped by the per-element skip policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedElement {
    /// Where in the file the element was found, e.g. "CgPoint #3".
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reason: String,
}

/// Raw output of one sub-extractor, before normalization.
#[derive(Debug, Clone, Default)]
pub struct ParsedPoints {
    pub points: Vec<DesignPoint>,
    pub skipped: Vec<SkippedElement>,
}

/// Final result of one upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub source_format: SourceFormat,
    pub points: Vec<DesignPoint>,
    #[serde(default)]
    pub skipped: Vec<SkippedElement>,
}

impl ExtractionResult {
    pub fn drop_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn scanned_count(&self) -> usize {
        self.points.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(
            SourceFormat::from_file_name("site.XML").unwrap(),
            SourceFormat::Landxml
        );
        assert_eq!(
            SourceFormat::from_file_name("piles.dxf").unwrap(),
            SourceFormat::Dxf
        );
        assert_eq!(
            SourceFormat::from_file_name("job.Lok").unwrap(),
            SourceFormat::Lok
        );
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = SourceFormat::from_file_name("asbuilt.csv").unwrap_err();
        assert!(matches!(err, PilingError::UnsupportedFormat { ref extension, .. } if extension == "csv"));
        assert!(SourceFormat::from_file_name("noext").is_err());
    }

    #[test]
    fn test_unsupported_message_lists_every_accepted_extension() {
        let err = SourceFormat::from_file_name("asbuilt.csv").unwrap_err();
        assert!(err.to_string().ends_with("Please upload .xml, .dxf, or .lok"));
        for ext in SourceFormat::ACCEPTED_EXTENSIONS {
            assert!(SourceFormat::from_extension(ext).is_some());
        }
    }

    #[test]
    fn test_blank_id_becomes_none() {
        let p = DesignPoint::new(Some("  ".into()), 1.0, 2.0, 3.0, SourceFormat::Dxf);
        assert_eq!(p.id(), None);
        assert_eq!(p.label(), "");
    }

    #[test]
    fn test_source_format_serializes_lowercase() {
        let json = serde_json::to_string(&SourceFormat::Landxml).unwrap();
        assert_eq!(json, "\"landxml\"");
    }
}
