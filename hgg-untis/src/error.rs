use std::fmt;

/// Upstream pages no longer look like the Untis template this crate understands.
///
/// These are never turned into an absent result, a changed template has to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  MissingClassList,
  MalformedClassList {
    offset: usize,
    expected: &'static str,
  },
  MissingClassHeader,
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseError::MissingClassList => write!(f, "navigation page contains no class list"),
      ParseError::MalformedClassList { offset, expected } => {
        write!(f, "malformed class list at offset {offset}: expected {expected}")
      }
      ParseError::MissingClassHeader => write!(f, "plan page contains no class header"),
    }
  }
}

impl std::error::Error for ParseError {}
