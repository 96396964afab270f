mod band;
mod color;
mod linear;

pub use band::BandScale;
pub use color::{CategoryColors, FillMode, PALETTE, Rgb, ramp_t, turbo};
pub use linear::{LinearScale, extent};
