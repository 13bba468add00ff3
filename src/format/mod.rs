//! Readers and writers for word2vec model files.
//!
//! Two layouts are supported: the text format (`word v1 v2 ...` per line)
//! and the binary format (a `<vocab> <dim>` header followed by records of
//! little-endian floats, 32 or 64 bits wide).

pub mod binary;
pub mod text;

pub use binary::{read_binary, write_binary, ElementWidth};
pub use text::{read_text, write_text};

use crate::error::{Result, WordVecError};
use crate::storage::VectorStore;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// On-disk model layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Binary32,
    Binary64,
}

impl Format {
    /// Element width for binary formats, `None` for text
    pub fn element_width(&self) -> Option<ElementWidth> {
        match self {
            Format::Text => None,
            Format::Binary32 => Some(ElementWidth::F32),
            Format::Binary64 => Some(ElementWidth::F64),
        }
    }
}

impl FromStr for Format {
    type Err = WordVecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "0" => Ok(Format::Text),
            "bin32" | "32" => Ok(Format::Binary32),
            "bin64" | "64" => Ok(Format::Binary64),
            other => Err(WordVecError::format(format!("unknown model format: {}", other))),
        }
    }
}

/// Options controlling how a model file is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub format: Format,
    /// Reject binary models whose header vocab size differs from the
    /// number of records actually read.
    pub strict_vocab_size: bool,
}

impl LoadOptions {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn strict(mut self) -> Self {
        self.strict_vocab_size = true;
        self
    }
}

/// Read a whole model from `reader`.
///
/// Any error aborts the load; no partial store is returned.
pub fn load<R: Read>(reader: R, options: &LoadOptions) -> Result<VectorStore> {
    let reader = BufReader::new(reader);
    match options.format.element_width() {
        None => read_text(reader),
        Some(width) => read_binary(reader, width, options.strict_vocab_size),
    }
}

/// Open and read a model file
pub fn load_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<VectorStore> {
    let path = path.as_ref();
    info!(path = %path.display(), format = ?options.format, "loading model");

    let store = load(File::open(path)?, options)?;

    info!(
        path = %path.display(),
        words = store.len(),
        dimension = store.dimension().unwrap_or(0),
        "loaded model"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_format_from_str() {
        assert_eq!("text".parse::<Format>().unwrap(), Format::Text);
        assert_eq!("BIN32".parse::<Format>().unwrap(), Format::Binary32);
        assert_eq!("64".parse::<Format>().unwrap(), Format::Binary64);
        assert_eq!("0".parse::<Format>().unwrap(), Format::Text);
        assert!(matches!(
            "16".parse::<Format>(),
            Err(WordVecError::Format { .. })
        ));
        assert!("csv".parse::<Format>().is_err());
    }

    #[test]
    fn test_load_options() {
        let options = LoadOptions::default();
        assert_eq!(options.format, Format::Text);
        assert!(!options.strict_vocab_size);
        assert!(LoadOptions::new(Format::Binary32).strict().strict_vocab_size);
    }

    #[test]
    fn test_load_dispatches_on_format() {
        let text = "a 1.0 2.0\n";
        let store = load(Cursor::new(text), &LoadOptions::default()).unwrap();
        assert_eq!(store.find("a").unwrap().as_slice(), &[1.0, 2.0]);

        let mut bytes = b"1 2\na ".to_vec();
        bytes.extend_from_slice(&1.0f64.to_le_bytes());
        bytes.extend_from_slice(&2.0f64.to_le_bytes());
        bytes.push(b'\n');
        let store = load(Cursor::new(bytes), &LoadOptions::new(Format::Binary64)).unwrap();
        assert_eq!(store.find("a").unwrap().as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_load_path_missing_file() {
        let err = load_path("/nonexistent/model.bin", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, WordVecError::IoError(_)));
    }
}
