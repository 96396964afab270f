mod fmt;
mod io;

pub(crate) use fmt::*;
pub(crate) use io::*;
