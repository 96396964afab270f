mod dataset;
mod read;
mod record;

pub use dataset::{Dataset, unique};
pub use read::{read_campuses, read_districts};
pub use record::{CampusRecord, DistrictId, DistrictRecord, MetricField, OverUnder, SchoolType};
