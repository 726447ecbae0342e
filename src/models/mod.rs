pub mod errors;
pub mod record;

pub use errors::ParseError;
pub use record::{parse_integer, parse_lab, Record, RecordRow, COLUMNS};
