//! Renderer-neutral figure descriptions for the plan and orbit views.
//!
//! These carry the data and layout hints a plotting library needs; drawing
//! and interaction (zoom, rotate) belong to the renderer.

use serde::{Deserialize, Serialize};

use crate::model::DesignPoint;

pub const PLAN_VIEW_TITLE: &str = "Local 2D Plan View (Design Points)";
pub const ORBIT_VIEW_TITLE: &str = "3D Orbit View (Design Points)";
pub const TRACE_NAME: &str = "Design Points";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    fn of(values: &[f64]) -> Option<Range> {
        let mut iter = values.iter().copied();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Range { min, max })
    }
}

/// Easting (x) against Northing (y), equal axis scale like a CAD plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanView {
    pub title: String,
    pub trace_name: String,
    pub x_title: String,
    pub y_title: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_range: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_range: Option<Range>,
    pub equal_aspect: bool,
}

/// Easting, Northing and Elevation with data-proportional aspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitView {
    pub title: String,
    pub trace_name: String,
    pub x_title: String,
    pub y_title: String,
    pub z_title: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_range: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_range: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_range: Option<Range>,
    pub aspect_mode: String,
}

pub fn build_plan_view(points: &[DesignPoint]) -> PlanView {
    let x: Vec<f64> = points.iter().map(DesignPoint::easting).collect();
    let y: Vec<f64> = points.iter().map(DesignPoint::northing).collect();

    PlanView {
        title: PLAN_VIEW_TITLE.into(),
        trace_name: TRACE_NAME.into(),
        x_title: "Easting".into(),
        y_title: "Northing".into(),
        x_range: Range::of(&x),
        y_range: Range::of(&y),
        labels: labels(points),
        x,
        y,
        equal_aspect: true,
    }
}

pub fn build_orbit_view(points: &[DesignPoint]) -> OrbitView {
    let x: Vec<f64> = points.iter().map(DesignPoint::easting).collect();
    let y: Vec<f64> = points.iter().map(DesignPoint::northing).collect();
    let z: Vec<f64> = points.iter().map(DesignPoint::elevation).collect();

    OrbitView {
        title: ORBIT_VIEW_TITLE.into(),
        trace_name: TRACE_NAME.into(),
        x_title: "Easting".into(),
        y_title: "Northing".into(),
        z_title: "Elevation".into(),
        x_range: Range::of(&x),
        y_range: Range::of(&y),
        z_range: Range::of(&z),
        labels: labels(points),
        x,
        y,
        z,
        aspect_mode: "data".into(),
    }
}

fn labels(points: &[DesignPoint]) -> Vec<String> {
    points.iter().map(|p| p.label().to_string()).collect()
}
