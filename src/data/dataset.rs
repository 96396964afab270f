use std::hash::Hash;

use ahash::{AHashMap, AHashSet};
use tracing::debug;

use super::record::{CampusRecord, DistrictId, DistrictRecord};

/// The queryable in-memory model: district rows in source order plus a
/// read-only district-to-campuses group index. Built once per load; nothing
/// here mutates afterwards.
#[derive(Debug, Default)]
pub struct Dataset {
    districts: Vec<DistrictRecord>,
    district_index: AHashMap<DistrictId, usize>, // id -> slot in `districts`
    campuses_by_district: AHashMap<DistrictId, Vec<CampusRecord>>,
}

impl Dataset {
    /// Assemble the dataset from decoded rows. Campus rows are normalized
    /// and grouped by district id in one pass, preserving source order
    /// within each group.
    pub fn build(districts: Vec<DistrictRecord>, campuses: Vec<CampusRecord>) -> Self {
        let mut district_index = AHashMap::with_capacity(districts.len());
        for (slot, district) in districts.iter().enumerate() {
            district_index.entry(district.district_id.clone()).or_insert(slot);
        }

        let mut campuses_by_district: AHashMap<DistrictId, Vec<CampusRecord>> = AHashMap::new();
        for mut campus in campuses {
            campus.normalize();
            campuses_by_district
                .entry(campus.district_id.clone())
                .or_default()
                .push(campus);
        }

        debug!(
            districts = districts.len(),
            campus_groups = campuses_by_district.len(),
            "dataset built"
        );

        Self { districts, district_index, campuses_by_district }
    }

    /// District rows, in source order.
    #[inline]
    pub fn districts(&self) -> &[DistrictRecord] {
        &self.districts
    }

    /// Number of district rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.districts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Total number of campus rows across all districts.
    pub fn campus_count(&self) -> usize {
        self.campuses_by_district.values().map(Vec::len).sum()
    }

    /// Look up a district row by id.
    pub fn district(&self, id: &DistrictId) -> Option<&DistrictRecord> {
        self.district_index.get(id).map(|&slot| &self.districts[slot])
    }

    /// Campuses of a district, in source order. Districts with no campus
    /// rows yield an empty slice, never an error.
    pub fn campuses(&self, id: &DistrictId) -> &[CampusRecord] {
        self.campuses_by_district.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Distinct key values across `rows`, in first-seen order.
pub fn unique<T, K, F>(rows: &[T], mut key: F) -> Vec<K>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut seen = AHashSet::with_capacity(rows.len());
    let mut out = Vec::new();
    for row in rows {
        let k = key(row);
        if seen.insert(k.clone()) {
            out.push(k);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district(id: &str, name: &str) -> DistrictRecord {
        DistrictRecord {
            district_id: id.into(),
            district_name: name.to_string(),
            ..DistrictRecord::default()
        }
    }

    fn campus(district_id: &str, name: &str) -> CampusRecord {
        CampusRecord {
            district_id: district_id.into(),
            campus_name: name.to_string(),
            ..CampusRecord::default()
        }
    }

    #[test]
    fn groups_campuses_by_district_in_source_order() {
        let dataset = Dataset::build(
            vec![district("1", "Alpha"), district("2", "Beta")],
            vec![campus("2", "B1"), campus("1", "A1"), campus("2", "B2")],
        );
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.campus_count(), 3);

        let names: Vec<&str> = dataset
            .campuses(&"2".into())
            .iter()
            .map(|c| c.campus_name.as_str())
            .collect();
        assert_eq!(names, ["B1", "B2"]);
    }

    #[test]
    fn missing_district_yields_empty_campus_slice() {
        let dataset = Dataset::build(vec![district("1", "Alpha")], vec![]);
        assert!(dataset.campuses(&"1".into()).is_empty());
        assert!(dataset.campuses(&"999".into()).is_empty());
    }

    #[test]
    fn district_lookup_by_id() {
        let dataset = Dataset::build(vec![district("7", "Gamma")], vec![]);
        assert_eq!(dataset.district(&"7".into()).map(|d| d.district_name.as_str()), Some("Gamma"));
        assert!(dataset.district(&"8".into()).is_none());
    }

    #[test]
    fn unique_preserves_first_seen_order() {
        let rows = ["b", "a", "b", "c", "a"];
        let distinct = unique(&rows, |r| r.to_string());
        assert_eq!(distinct, ["b", "a", "c"]);

        let empty: [&str; 0] = [];
        assert!(unique(&empty, |r| r.to_string()).is_empty());
    }
}
