mod clock;
mod ingest_service;
mod query_service;
mod reading_store;
mod sheet_service;

pub use clock::*;
pub use ingest_service::*;
pub use query_service::*;
pub use reading_store::*;
pub use sheet_service::*;
