//! Patient directory - static reference data used to enrich calls

mod record;
mod store;

pub use record::PatientRecord;
pub use store::Directory;
