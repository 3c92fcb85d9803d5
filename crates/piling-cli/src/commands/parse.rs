use piling_core::profile::schema::ExtractionProfile;
use piling_core::session::DesignSession;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    profile: ExtractionProfile,
) -> Result<(), piling_core::error::PilingError> {
    let bytes = std::fs::read(&input_file)?;
    let mut session = DesignSession::new(profile);
    let result = session.upload(&super::upload_name(&input_file), &bytes)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            output::json::write(result, &path)?;
            eprintln!(
                "Extracted {} design point(s) from {}, written to {}",
                result.points.len(),
                result.source_format,
                path.display()
            );
            if result.drop_count() > 0 {
                eprintln!(
                    "  {} of {} element(s) dropped during extraction",
                    result.drop_count(),
                    result.scanned_count()
                );
            }
        }
        None => match output_format {
            "json" => output::json::print(result)?,
            _ => output::table::print(result),
        },
    }

    Ok(())
}
