use piling_core::profile::schema::ExtractionProfile;
use piling_core::session::DesignSession;
use std::path::PathBuf;

use crate::ViewMode;

pub fn run(
    input_file: PathBuf,
    mode: ViewMode,
    profile: ExtractionProfile,
) -> Result<(), piling_core::error::PilingError> {
    let bytes = std::fs::read(&input_file)?;
    let mut session = DesignSession::new(profile);
    session.upload(&super::upload_name(&input_file), &bytes)?;

    if !session.has_points() {
        eprintln!(
            "warning: no design points found in {}",
            session.file_name().unwrap_or_default()
        );
    }

    let json = match mode {
        ViewMode::Plan => serde_json::to_string_pretty(&session.plan_view())?,
        ViewMode::Orbit => serde_json::to_string_pretty(&session.orbit_view())?,
    };
    println!("{json}");

    Ok(())
}
