//! In-memory resource model produced by the decoders.

use std::fmt;

pub mod file;
pub mod table;
pub mod value;
pub mod xml;

/// Points a decoded element back at the text it was compiled from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Source {
    pub path: String,
    pub line: Option<u32>,
}

impl Source {
    pub fn new(path: impl Into<String>) -> Self {
        Source {
            path: path.into(),
            line: None,
        }
    }

    pub fn with_line(path: impl Into<String>, line: u32) -> Self {
        Source {
            path: path.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        Ok(())
    }
}
