pub mod drilldown;
pub mod render;
