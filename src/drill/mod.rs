mod io;
mod view;

pub use view::{CampusKey, DrillRow, DrilldownView};
