//! Small helpers shared by the road network crates: logging setup, reading input files, and
//! formatting numbers for log output.

pub mod logger;
mod io;
mod utils;

pub use crate::io::{read_json, slurp_file};
pub use crate::utils::{basename, prettyprint_usize};
