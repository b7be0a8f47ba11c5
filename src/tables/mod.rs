//! Table types and tabular I/O

pub mod csv;
pub mod frame;
pub mod process;

pub use csv::TableIoError;
pub use frame::Frame;
pub use process::{ProcessKey, ProcessTable};
