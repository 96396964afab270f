mod dashboard;
mod io;

pub use dashboard::{AxisSelection, Dashboard, Phase};
