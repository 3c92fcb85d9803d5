use std::io::{Cursor, Read};

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::PilingError;
use crate::extraction::landxml::parse_landxml;
use crate::model::{ParsedPoints, SourceFormat};
use crate::profile::schema::ExtractionProfile;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Extract design points from a LOK project container.
///
/// The container is read as a ZIP archive. Entries are visited in archive
/// order and the first one holding LandXML point data is parsed; later
/// entries are ignored. Binary LOK payloads are not interpreted.
pub fn parse_lok(bytes: &[u8], profile: &ExtractionProfile) -> Result<ParsedPoints, PilingError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| PilingError::ParseError(format!("not a valid ZIP container: {e}")))?;

    debug!(entries = archive.len(), "opened LOK container");

    for index in 0..archive.len() {
        // Unreadable entries (encrypted, unknown compression, bad CRC) do not
        // make the container invalid; a later entry may still hold the design.
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(entry = index + 1, error = %e, "skipping unreadable LOK entry");
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        if entry.size() > profile.max_container_entry_bytes {
            warn!(
                entry = %name,
                size = entry.size(),
                limit = profile.max_container_entry_bytes,
                "skipping oversized LOK entry"
            );
            continue;
        }

        let mut payload = Vec::new();
        if let Err(e) = (&mut entry)
            .take(profile.max_container_entry_bytes)
            .read_to_end(&mut payload)
        {
            warn!(entry = %name, error = %e, "skipping unreadable LOK entry");
            continue;
        }

        if !looks_like_landxml(&payload, profile) {
            debug!(entry = %name, "LOK entry is not LandXML point data");
            continue;
        }

        match parse_landxml(&payload, profile) {
            Ok(parsed) => {
                debug!(entry = %name, points = parsed.points.len(), "using LOK entry");
                return Ok(ParsedPoints {
                    points: parsed
                        .points
                        .into_iter()
                        .map(|p| p.with_source(SourceFormat::Lok))
                        .collect(),
                    skipped: parsed.skipped,
                });
            }
            Err(e) => {
                warn!(entry = %name, error = %e, "LOK entry could not be parsed as LandXML");
            }
        }
    }

    Err(PilingError::UnsupportedContainerFormat(
        "no LandXML point data found in the container (binary LOK projects are not supported)"
            .into(),
    ))
}

/// Content sniff: XML text that mentions one of the point element names.
fn looks_like_landxml(payload: &[u8], profile: &ExtractionProfile) -> bool {
    let body = payload.strip_prefix(UTF8_BOM).unwrap_or(payload);
    let first = body.iter().position(|b| !b.is_ascii_whitespace());
    if first.map(|i| body[i]) != Some(b'<') {
        return false;
    }
    profile
        .point_elements
        .iter()
        .any(|marker| contains(body, marker.as_bytes()))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Flip the first byte of `marker` inside the archive so that entry
    /// fails its CRC check when read.
    fn corrupt(mut archive: Vec<u8>, marker: &[u8]) -> Vec<u8> {
        let pos = archive
            .windows(marker.len())
            .position(|w| w == marker)
            .unwrap();
        archive[pos] ^= 0xFF;
        archive
    }

    fn stored_container(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
            writer.start_file(*name, options).unwrap();
            writer.write_all(body).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn container(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const LANDXML: &[u8] =
        b"<LandXML><CgPoints><CgPoint name=\"P1\">200 100 5</CgPoint></CgPoints></LandXML>";

    #[test]
    fn test_looks_like_landxml() {
        let profile = ExtractionProfile::default();
        assert!(looks_like_landxml(LANDXML, &profile));
        assert!(looks_like_landxml(b"\xEF\xBB\xBF  \n<x>CgPoint</x>", &profile));
        assert!(!looks_like_landxml(b"<Project><Job/></Project>", &profile));
        assert!(!looks_like_landxml(b"\x00\x01CgPoint", &profile));
    }

    #[test]
    fn test_points_retagged_as_lok() {
        let bytes = container(&[("project/design.xml", LANDXML)]);
        let parsed = parse_lok(&bytes, &ExtractionProfile::default()).unwrap();
        assert_eq!(parsed.points.len(), 1);
        assert_eq!(parsed.points[0].source_format(), SourceFormat::Lok);
        assert_eq!(parsed.points[0].easting(), 100.0);
    }

    #[test]
    fn test_first_xml_entry_wins() {
        let second = b"<LandXML><CgPoint name=\"Q\">1 2 3</CgPoint></LandXML>";
        let bytes = container(&[
            ("settings.bin", b"\x00\x01\x02"),
            ("a.xml", LANDXML),
            ("b.xml", second),
        ]);
        let parsed = parse_lok(&bytes, &ExtractionProfile::default()).unwrap();
        assert_eq!(parsed.points.len(), 1);
        assert_eq!(parsed.points[0].id(), Some("P1"));
    }

    #[test]
    fn test_broken_xml_entry_falls_through() {
        let bytes = container(&[
            ("broken.xml", b"<LandXML><CgPoint>1 2 3</LandXML>"),
            ("good.xml", LANDXML),
        ]);
        let parsed = parse_lok(&bytes, &ExtractionProfile::default()).unwrap();
        assert_eq!(parsed.points[0].id(), Some("P1"));
    }

    #[test]
    fn test_unreadable_entry_skipped() {
        let bytes = stored_container(&[
            ("secret.dbx", b"binary-job-block-0123456789"),
            ("design.xml", LANDXML),
        ]);
        let bytes = corrupt(bytes, b"binary-job-block");
        let parsed = parse_lok(&bytes, &ExtractionProfile::default()).unwrap();
        assert_eq!(parsed.points.len(), 1);
        assert_eq!(parsed.points[0].id(), Some("P1"));
    }

    #[test]
    fn test_only_entry_unreadable_is_unsupported() {
        let bytes = stored_container(&[("design.xml", LANDXML)]);
        let bytes = corrupt(bytes, b"<CgPoints>");
        let err = parse_lok(&bytes, &ExtractionProfile::default()).unwrap_err();
        assert!(matches!(err, PilingError::UnsupportedContainerFormat(_)));
    }

    #[test]
    fn test_binary_only_container_unsupported() {
        let bytes = container(&[("job.dbx", b"\x00\x10binary"), ("meta.xml", b"<Job/>")]);
        let err = parse_lok(&bytes, &ExtractionProfile::default()).unwrap_err();
        assert!(matches!(err, PilingError::UnsupportedContainerFormat(_)));
    }

    #[test]
    fn test_oversized_entry_skipped() {
        let profile = ExtractionProfile {
            max_container_entry_bytes: 16,
            ..ExtractionProfile::default()
        };
        let bytes = container(&[("design.xml", LANDXML)]);
        let err = parse_lok(&bytes, &profile).unwrap_err();
        assert!(matches!(err, PilingError::UnsupportedContainerFormat(_)));
    }

    #[test]
    fn test_not_a_zip() {
        let err = parse_lok(b"definitely not a zip", &ExtractionProfile::default()).unwrap_err();
        assert!(err.is_malformed_input());
    }
}
