pub mod parse;
pub mod profile;
pub mod view;

use piling_core::error::PilingError;
use piling_core::profile::builtin;
use piling_core::profile::schema::{AxisOrder, ExtractionProfile};
use std::path::Path;

use crate::ProfileArgs;

/// Build the profile in force from --profile/--preset and the override flags.
pub fn resolve_profile(args: &ProfileArgs) -> Result<ExtractionProfile, PilingError> {
    let mut profile = match (&args.profile, &args.preset) {
        (Some(path), _) => piling_core::profile::load_profile(path)?,
        (None, Some(name)) => builtin::load_preset(name)?,
        (None, None) => ExtractionProfile::default(),
    };

    if let Some(ref order) = args.axis_order {
        profile.axis_order = AxisOrder::from_str_loose(order).ok_or_else(|| {
            PilingError::ProfileInvalid(format!(
                "unknown axis order '{}' (expected 'nez' or 'enz')",
                order
            ))
        })?;
    }
    if args.dedupe {
        profile.dedupe = true;
    }

    Ok(profile)
}

/// File name used for format selection, as the upload widget would report it.
pub fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
