mod docs_handle;
mod history_handle;
mod sensor_handle;

pub use docs_handle::*;
pub use history_handle::*;
pub use sensor_handle::*;
