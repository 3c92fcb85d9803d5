pub mod error;
pub mod extraction;
pub mod model;
pub mod normalize;
pub mod profile;
pub mod session;
pub mod view;

use tracing::debug;

use error::PilingError;
use model::{ExtractionResult, SourceFormat};
use normalize::normalize_points;
use profile::schema::ExtractionProfile;

/// Main API entry point: extract design points from an uploaded file.
///
/// The sub-extractor is chosen from the file name's extension
/// (`.xml`, `.dxf`, `.lok`).
pub fn load_design_file(
    file_name: &str,
    bytes: &[u8],
    profile: &ExtractionProfile,
) -> Result<ExtractionResult, PilingError> {
    let format = SourceFormat::from_file_name(file_name)?;
    extract_design_points(bytes, format, profile)
}

/// Extract and normalize design points from bytes of a known format.
///
/// Elements dropped by the sub-extractor and points rejected by the
/// normalizer are both reported in `skipped`, so
/// `points.len() + skipped.len()` equals the number of elements scanned.
pub fn extract_design_points(
    bytes: &[u8],
    format: SourceFormat,
    profile: &ExtractionProfile,
) -> Result<ExtractionResult, PilingError> {
    debug!(%format, size = bytes.len(), "extracting design points");
    let parsed = extraction::extract_raw(bytes, format, profile)?;

    let normalized = normalize_points(parsed.points, profile.dedupe);
    debug!(
        dropped = normalized.dropped_count(),
        "normalized design points"
    );
    let mut skipped = parsed.skipped;
    skipped.extend(normalized.dropped);

    Ok(ExtractionResult {
        source_format: format,
        points: normalized.points,
        skipped,
    })
}
