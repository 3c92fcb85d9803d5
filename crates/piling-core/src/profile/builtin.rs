use crate::error::PilingError;
use crate::profile::schema::ExtractionProfile;

const LANDXML_PROFILE_JSON: &str = include_str!("../../../../profiles/landxml.json");
const ENZ_PROFILE_JSON: &str = include_str!("../../../../profiles/enz.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["landxml", "enz"];

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<ExtractionProfile, PilingError> {
    let json = match name {
        "landxml" => LANDXML_PROFILE_JSON,
        "enz" => ENZ_PROFILE_JSON,
        _ => {
            return Err(PilingError::ProfileInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )));
        }
    };
    super::parse_profile_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::schema::AxisOrder;

    #[test]
    fn test_all_presets_load() {
        for name in PRESETS {
            assert!(load_preset(name).is_ok(), "preset {name} failed to load");
        }
    }

    #[test]
    fn test_landxml_preset_matches_default_axis() {
        let profile = load_preset("landxml").unwrap();
        assert_eq!(profile.axis_order, ExtractionProfile::default().axis_order);
    }

    #[test]
    fn test_enz_preset() {
        assert_eq!(load_preset("enz").unwrap().axis_order, AxisOrder::Enz);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
