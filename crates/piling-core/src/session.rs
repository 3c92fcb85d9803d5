use tracing::info;

use crate::error::PilingError;
use crate::model::{DesignPoint, ExtractionResult};
use crate::profile::schema::ExtractionProfile;
use crate::view::{build_orbit_view, build_plan_view, OrbitView, PlanView};

/// Per-user state for one dashboard session.
///
/// Holds the profile in force and the result of the latest upload. Every
/// upload replaces the previous result; a failed upload leaves the session
/// empty. Sessions share nothing, so each user gets their own value.
#[derive(Debug, Clone, Default)]
pub struct DesignSession {
    profile: ExtractionProfile,
    current: Option<Upload>,
}

#[derive(Debug, Clone)]
struct Upload {
    file_name: String,
    result: ExtractionResult,
}

impl DesignSession {
    pub fn new(profile: ExtractionProfile) -> Self {
        DesignSession {
            profile,
            current: None,
        }
    }

    /// Extract points from an uploaded file and make them the session's
    /// design data.
    pub fn upload(
        &mut self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<&ExtractionResult, PilingError> {
        self.current = None;
        let result = crate::load_design_file(file_name, bytes, &self.profile)?;
        info!(
            file = file_name,
            points = result.points.len(),
            dropped = result.drop_count(),
            "design data loaded"
        );
        let upload = self.current.insert(Upload {
            file_name: file_name.to_string(),
            result,
        });
        Ok(&upload.result)
    }

    pub fn result(&self) -> Option<&ExtractionResult> {
        self.current.as_ref().map(|u| &u.result)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.current.as_ref().map(|u| u.file_name.as_str())
    }

    pub fn points(&self) -> &[DesignPoint] {
        self.result().map(|r| r.points.as_slice()).unwrap_or(&[])
    }

    pub fn has_points(&self) -> bool {
        !self.points().is_empty()
    }

    pub fn plan_view(&self) -> PlanView {
        build_plan_view(self.points())
    }

    pub fn orbit_view(&self) -> OrbitView {
        build_orbit_view(self.points())
    }
}
