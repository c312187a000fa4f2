mod parser;
mod record;

pub use parser::{TraceEntry, TraceReader, parse_line};
pub use record::{OperationKind, OperationRecord};
