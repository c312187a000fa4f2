use std::io::{BufRead, Lines};

use log::trace;

use super::record::{OperationKind, OperationRecord};
use crate::error::{TraceError, TraceErrorKind};

/// One parsed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    pub record: OperationRecord,
    /// Byte count from the trace. Block size comes from the cache config, so
    /// this only matters for echoing the line back.
    pub size: u32,
    /// 1-based line number.
    pub line: usize,
}

impl AsRef<OperationRecord> for TraceEntry {
    fn as_ref(&self) -> &OperationRecord {
        &self.record
    }
}

/// Parses `<op> <hex-address>,<size>`. Blank lines yield `Ok(None)`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<TraceEntry>, TraceError> {
    let err = |kind| TraceError::new(line, kind);

    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let (op, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let mut letters = op.chars();
    let kind = match (letters.next(), letters.next()) {
        (Some(c), None) => OperationKind::from_letter(c),
        _ => None,
    }
    .ok_or_else(|| err(TraceErrorKind::UnknownOperation(op.to_string())))?;

    let rest = rest.trim_start();
    let (addr, size) = match rest.split_once(',') {
        Some((addr, size)) => (addr.trim_end(), size.trim_start()),
        None if rest.is_empty() => return Err(err(TraceErrorKind::MissingAddress)),
        None => return Err(err(TraceErrorKind::MissingSize)),
    };

    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    if digits.is_empty() {
        return Err(err(TraceErrorKind::MissingAddress));
    }
    let address = u64::from_str_radix(digits, 16)
        .map_err(|_| err(TraceErrorKind::InvalidAddress(addr.to_string())))?;

    let (size, trailing) = size.split_once(char::is_whitespace).unwrap_or((size, ""));
    if size.is_empty() {
        return Err(err(TraceErrorKind::MissingSize));
    }
    let size: u32 = size
        .parse()
        .map_err(|_| err(TraceErrorKind::InvalidSize(size.to_string())))?;
    let trailing = trailing.trim();
    if !trailing.is_empty() {
        return Err(err(TraceErrorKind::TrailingInput(trailing.to_string())));
    }

    Ok(Some(TraceEntry {
        record: OperationRecord::new(kind, address),
        size,
        line,
    }))
}

/// Lazily parses a trace, one entry per non-blank line.
///
/// Stops after the first error.
pub struct TraceReader<R> {
    lines: Lines<R>,
    line: usize,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEntry, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.line += 1;
            let parsed = match self.lines.next()? {
                Ok(text) => parse_line(self.line, &text),
                Err(e) => Err(TraceError::new(self.line, TraceErrorKind::Io(e))),
            };
            match parsed {
                Ok(Some(entry)) => {
                    trace!("line {}: {:?}", entry.line, entry.record);
                    return Some(Ok(entry));
                }
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
