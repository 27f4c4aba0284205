mod log;
mod reading;
mod sheet;
mod signal;

pub mod sentinel;

pub use log::*;
pub use reading::*;
pub use sheet::*;
pub use signal::*;
