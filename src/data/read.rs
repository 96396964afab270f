use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};

use super::record::{CampusRecord, DistrictRecord};

/// Read the district-level document: a JSON array of flat district records.
pub fn read_districts(path: &Path) -> Result<Vec<DistrictRecord>> {
    let file = File::open(path)
        .with_context(|| format!("[read_districts] Failed to open {}", path.display()))?;
    let rows: Vec<DistrictRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[read_districts] {} is not a district record array", path.display()))?;
    Ok(rows)
}

/// Read the campus-level document: a JSON array of flat campus records.
pub fn read_campuses(path: &Path) -> Result<Vec<CampusRecord>> {
    let file = File::open(path)
        .with_context(|| format!("[read_campuses] Failed to open {}", path.display()))?;
    let rows: Vec<CampusRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[read_campuses] {} is not a campus record array", path.display()))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_a_district_array_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"DistrictID": "1", "DistrictName": "Alpha", "OverallScoreMean": 81.25}}]"#
        )
        .unwrap();
        let rows = read_districts(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].overall_score_mean, 81.25);
    }

    #[test]
    fn open_failure_names_the_path() {
        let err = read_districts(Path::new("/nonexistent/districts.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/districts.json"));
    }

    #[test]
    fn non_array_document_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"DistrictID": "1"}}"#).unwrap();
        assert!(read_campuses(file.path()).is_err());
    }
}
