use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::buoy_data::{BuoyData, FleetData};
use super::error::ExportError;

/// Write the accumulated fleet data to disk, one YAML file per buoy.
///
/// The YAML layout mirrors [`BuoyData`]: identity, counters, then the
/// decoded records grouped by tag label. Returns the paths written.
pub fn write_fleet(fleet: &FleetData, export_dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    if !export_dir.exists() {
        return Err(ExportError::BadExportPath(export_dir.to_path_buf()));
    }
    let mut written = Vec::new();
    for buoy in fleet.buoys() {
        written.push(write_buoy(buoy, export_dir)?);
    }
    Ok(written)
}

fn write_buoy(buoy: &BuoyData, export_dir: &Path) -> Result<PathBuf, ExportError> {
    let path = export_dir.join(format!("{}_decoded.yaml", file_stem(&buoy.buoy_name)));
    let yaml_str = serde_yaml::to_string(buoy)?;
    let mut file = File::create(&path)?;
    file.write_all(yaml_str.as_bytes())?;
    Ok(path)
}

/// Buoy names go straight into file names; keep them path-friendly.
fn file_stem(buoy_name: &str) -> String {
    buoy_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
