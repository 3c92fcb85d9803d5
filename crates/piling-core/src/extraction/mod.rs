pub mod dxf;
pub mod landxml;
pub mod lok;

use crate::error::PilingError;
use crate::model::{ParsedPoints, SourceFormat};
use crate::profile::schema::ExtractionProfile;

/// Run the sub-extractor for `format` over the raw uploaded bytes.
pub fn extract_raw(
    bytes: &[u8],
    format: SourceFormat,
    profile: &ExtractionProfile,
) -> Result<ParsedPoints, PilingError> {
    match format {
        SourceFormat::Landxml => landxml::parse_landxml(bytes, profile),
        SourceFormat::Dxf => dxf::parse_dxf(bytes),
        SourceFormat::Lok => lok::parse_lok(bytes, profile),
    }
}
