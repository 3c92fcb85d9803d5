use serde::{Deserialize, Serialize};
use std::fmt;

/// Default cap on a single LOK container entry (64 MiB).
pub const DEFAULT_MAX_CONTAINER_ENTRY_BYTES: u64 = 64 * 1024 * 1024;

/// Order of the three tokens in LandXML coordinate text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrder {
    /// Northing Easting Elevation (LandXML convention).
    #[default]
    Nez,
    /// Easting Northing Elevation.
    Enz,
}

impl AxisOrder {
    /// Map three tokens in file order to (easting, northing, elevation).
    pub fn to_enz(self, coords: [f64; 3]) -> (f64, f64, f64) {
        match self {
            AxisOrder::Nez => (coords[1], coords[0], coords[2]),
            AxisOrder::Enz => (coords[0], coords[1], coords[2]),
        }
    }

    pub fn from_str_loose(s: &str) -> Option<AxisOrder> {
        match s.trim().to_lowercase().as_str() {
            "nez" | "northing-easting" | "ne" => Some(AxisOrder::Nez),
            "enz" | "easting-northing" | "en" => Some(AxisOrder::Enz),
            _ => None,
        }
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisOrder::Nez => write!(f, "Northing Easting Elevation"),
            AxisOrder::Enz => write!(f, "Easting Northing Elevation"),
        }
    }
}

/// Settings that control how uploaded design files are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub axis_order: AxisOrder,
    /// Drop points identical in id and coordinates to an earlier one.
    #[serde(default)]
    pub dedupe: bool,
    #[serde(default = "default_max_container_entry_bytes")]
    pub max_container_entry_bytes: u64,
    /// LandXML element local names treated as point markers.
    #[serde(default = "default_point_elements")]
    pub point_elements: Vec<String>,
}

fn default_max_container_entry_bytes() -> u64 {
    DEFAULT_MAX_CONTAINER_ENTRY_BYTES
}

fn default_point_elements() -> Vec<String> {
    vec!["CgPoint".to_string()]
}

impl Default for ExtractionProfile {
    fn default() -> Self {
        ExtractionProfile {
            name: "default".to_string(),
            description: None,
            axis_order: AxisOrder::default(),
            dedupe: false,
            max_container_entry_bytes: DEFAULT_MAX_CONTAINER_ENTRY_BYTES,
            point_elements: default_point_elements(),
        }
    }
}

impl ExtractionProfile {
    pub fn is_point_element(&self, local_name: &[u8]) -> bool {
        self.point_elements
            .iter()
            .any(|name| name.as_bytes() == local_name)
    }
}
