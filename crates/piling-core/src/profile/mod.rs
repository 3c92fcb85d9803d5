pub mod builtin;
pub mod schema;

use crate::error::PilingError;
use schema::ExtractionProfile;
use std::path::Path;

/// Load an extraction profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<ExtractionProfile, PilingError> {
    let content = std::fs::read_to_string(path).map_err(|e| PilingError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse an extraction profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<ExtractionProfile, PilingError> {
    let profile: ExtractionProfile =
        serde_json::from_str(json).map_err(|e| PilingError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse an extraction profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<ExtractionProfile, PilingError> {
    let profile: ExtractionProfile = serde_json::from_str(json).map_err(PilingError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &ExtractionProfile) -> Result<(), PilingError> {
    if profile.name.trim().is_empty() {
        return Err(PilingError::ProfileInvalid(
            "name must not be empty".into(),
        ));
    }

    if profile.max_container_entry_bytes == 0 {
        return Err(PilingError::ProfileInvalid(
            "max_container_entry_bytes must be greater than zero".into(),
        ));
    }

    if profile.point_elements.is_empty() {
        return Err(PilingError::ProfileInvalid(
            "point_elements must not be empty".into(),
        ));
    }

    for element in &profile.point_elements {
        if element.is_empty() || element.contains(|c: char| c.is_whitespace() || c == ':') {
            return Err(PilingError::ProfileInvalid(format!(
                "invalid point element name '{}' (expected a local name such as 'CgPoint')",
                element
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::AxisOrder;

    #[test]
    fn test_parse_minimal_profile_fills_defaults() {
        let profile = parse_profile_str(r#"{ "name": "Site A" }"#).unwrap();
        assert_eq!(profile.name, "Site A");
        assert_eq!(profile.axis_order, AxisOrder::Nez);
        assert!(!profile.dedupe);
        assert_eq!(profile.point_elements, vec!["CgPoint"]);
        assert_eq!(
            profile.max_container_entry_bytes,
            schema::DEFAULT_MAX_CONTAINER_ENTRY_BYTES
        );
    }

    #[test]
    fn test_parse_full_profile() {
        let json = r#"{
            "name": "Rig export",
            "axis_order": "enz",
            "dedupe": true,
            "max_container_entry_bytes": 1024,
            "point_elements": ["CgPoint", "RedHorizontalPoint"]
        }"#;
        let profile = parse_profile_str(json).unwrap();
        assert_eq!(profile.axis_order, AxisOrder::Enz);
        assert!(profile.dedupe);
        assert!(profile.is_point_element(b"RedHorizontalPoint"));
        assert!(!profile.is_point_element(b"Alignment"));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(parse_profile_str(r#"{ "name": "  " }"#).is_err());
    }

    #[test]
    fn test_zero_entry_cap_rejected() {
        let json = r#"{ "name": "x", "max_container_entry_bytes": 0 }"#;
        assert!(matches!(
            parse_profile_str(json),
            Err(PilingError::ProfileInvalid(_))
        ));
    }

    #[test]
    fn test_prefixed_point_element_rejected() {
        let json = r#"{ "name": "x", "point_elements": ["lx:CgPoint"] }"#;
        assert!(parse_profile_str(json).is_err());
    }

    #[test]
    fn test_unknown_axis_order_rejected() {
        let json = r#"{ "name": "x", "axis_order": "zen" }"#;
        assert!(matches!(parse_profile_str(json), Err(PilingError::Json(_))));
    }

    #[test]
    fn test_load_profile_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{ "name": "On disk", "axis_order": "enz" }"#).unwrap();
        let profile = load_profile(&path).unwrap();
        assert_eq!(profile.name, "On disk");
        assert_eq!(profile.axis_order, AxisOrder::Enz);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_profile(Path::new("/nonexistent/profile.json")).unwrap_err();
        assert!(matches!(err, PilingError::ProfileLoad { .. }));
        assert!(err.to_string().contains("/nonexistent/profile.json"));
    }

    #[test]
    fn test_axis_order_mapping() {
        assert_eq!(AxisOrder::Nez.to_enz([200.0, 100.0, 5.0]), (100.0, 200.0, 5.0));
        assert_eq!(AxisOrder::Enz.to_enz([100.0, 200.0, 5.0]), (100.0, 200.0, 5.0));
    }
}
