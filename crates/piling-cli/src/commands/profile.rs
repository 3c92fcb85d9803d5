use piling_core::profile::builtin;
use piling_core::profile::schema::ExtractionProfile;
use std::path::Path;

pub fn list() -> Result<(), piling_core::error::PilingError> {
    println!("Available predefined profiles:\n");
    for name in builtin::PRESETS {
        let profile = builtin::load_preset(name)?;
        println!("  {:<8} {} [{}]", name, profile.name, profile.axis_order);
        if let Some(ref desc) = profile.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(file: Option<&Path>) -> Result<(), piling_core::error::PilingError> {
    let profile = match file {
        Some(path) => piling_core::profile::load_profile(path)?,
        None => ExtractionProfile::default(),
    };
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), piling_core::error::PilingError> {
    let profile = piling_core::profile::load_profile(file)?;

    println!("Profile '{}' is valid.", profile.name);
    println!("  Coordinate order: {}", profile.axis_order);
    println!("  Point elements: {}", profile.point_elements.join(", "));
    println!(
        "  Duplicate removal: {}",
        if profile.dedupe { "on" } else { "off" }
    );
    println!(
        "  LOK entry size limit: {} bytes",
        profile.max_container_entry_bytes
    );

    if profile
        .point_elements
        .iter()
        .all(|e| !e.eq_ignore_ascii_case("CgPoint"))
    {
        println!("\nWarnings:");
        println!("  - 'CgPoint' is not among point_elements; standard LandXML points will be ignored");
    }

    Ok(())
}
