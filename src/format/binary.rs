//! Binary model format.
//!
//! ```text
//! <vocab_size> <dim>\n
//! <word>' '<dim little-endian floats>'\n'    (repeated)
//! ```
//!
//! Floats are 32 or 64 bits wide and are widened to `f64` on load.

use crate::error::{Result, WordVecError};
use crate::storage::VectorStore;
use crate::vector::Vector;
use std::io::{BufRead, Read, Write};
use tracing::{debug, warn};

const WORD_DELIMITER: u8 = b' ';
const RECORD_DELIMITER: u8 = b'\n';

/// Width of each stored float
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementWidth {
    F32,
    F64,
}

impl ElementWidth {
    pub fn bytes(&self) -> usize {
        match self {
            ElementWidth::F32 => 4,
            ElementWidth::F64 => 8,
        }
    }

    pub fn bits(&self) -> u32 {
        self.bytes() as u32 * 8
    }

    fn decode(&self, chunk: &[u8]) -> f64 {
        match self {
            ElementWidth::F32 => {
                let mut raw = [0u8; 4];
                raw.copy_from_slice(chunk);
                f32::from_le_bytes(raw) as f64
            }
            ElementWidth::F64 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(chunk);
                f64::from_le_bytes(raw)
            }
        }
    }

    fn encode<W: Write>(&self, value: f64, writer: &mut W) -> std::io::Result<()> {
        match self {
            ElementWidth::F32 => writer.write_all(&(value as f32).to_le_bytes()),
            ElementWidth::F64 => writer.write_all(&value.to_le_bytes()),
        }
    }
}

/// Parsed `<vocab_size> <dim>` header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    vocab_size: usize,
    dimension: usize,
}

fn read_header<R: BufRead>(reader: &mut R) -> Result<Header> {
    let mut line = Vec::new();
    if reader.read_until(RECORD_DELIMITER, &mut line)? == 0 {
        return Err(WordVecError::format("missing header line"));
    }
    let line = std::str::from_utf8(&line)
        .map_err(|_| WordVecError::format("header is not valid UTF-8"))?;

    let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
    if tokens.len() != 2 {
        return Err(WordVecError::format(format!(
            "header must be \"<vocab_size> <dimension>\", got {:?}",
            line.trim_end()
        )));
    }
    let parse = |token: &str, field: &str| {
        token.parse::<usize>().map_err(|_| {
            WordVecError::format(format!("invalid {} in header: {:?}", field, token))
        })
    };
    Ok(Header {
        vocab_size: parse(tokens[0], "vocab size")?,
        dimension: parse(tokens[1], "dimension")?,
    })
}

fn truncated(record: usize, what: &str) -> WordVecError {
    WordVecError::TruncatedInput {
        context: format!("record {} ends inside its {}", record, what),
    }
}

/// Read exactly `len` bytes into `buf`, growing it only as bytes arrive.
fn read_record_part<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    len: usize,
    record: usize,
    what: &str,
) -> Result<()> {
    buf.clear();
    reader.take(len as u64).read_to_end(buf)?;
    if buf.len() < len {
        return Err(truncated(record, what));
    }
    Ok(())
}

/// Parse a binary model whose floats are `width` wide.
///
/// End of input exactly between records ends the load. Input that stops
/// inside a record fails with [`WordVecError::TruncatedInput`], and a record
/// not followed by a newline fails with [`WordVecError::Format`]. With
/// `strict_vocab_size` the header's vocab size must match the records read.
pub fn read_binary<R: BufRead>(
    mut reader: R,
    width: ElementWidth,
    strict_vocab_size: bool,
) -> Result<VectorStore> {
    let header = read_header(&mut reader)?;
    debug!(
        vocab_size = header.vocab_size,
        dimension = header.dimension,
        bits = width.bits(),
        "read binary header"
    );

    let record_len = header
        .dimension
        .checked_mul(width.bytes())
        .filter(|&len| u64::try_from(len).is_ok())
        .ok_or_else(|| {
            WordVecError::format(format!("dimension {} is too large", header.dimension))
        })?;

    let mut store = VectorStore::new();
    let mut word = Vec::new();
    let mut floats = Vec::new();
    let mut delimiter = Vec::with_capacity(1);

    loop {
        let record = store.len() + 1;
        word.clear();
        if reader.read_until(WORD_DELIMITER, &mut word)? == 0 {
            break;
        }
        if word.pop() != Some(WORD_DELIMITER) {
            return Err(WordVecError::TruncatedInput {
                context: format!("record {} ends inside its word", record),
            });
        }
        // word2vec cuts long words at a byte limit, which can split a
        // multibyte character.
        let text = String::from_utf8_lossy(&word).into_owned();

        read_record_part(&mut reader, &mut floats, record_len, record, "values")?;
        let values = floats
            .chunks_exact(width.bytes())
            .map(|chunk| width.decode(chunk))
            .collect();

        read_record_part(&mut reader, &mut delimiter, 1, record, "delimiter")?;
        if delimiter[0] != RECORD_DELIMITER {
            return Err(WordVecError::format(format!(
                "record {} ({:?}): expected newline after values, found byte 0x{:02x}",
                record, text, delimiter[0]
            )));
        }

        store.push(Vector::new(text, values));
    }

    if store.len() != header.vocab_size {
        if strict_vocab_size {
            return Err(WordVecError::format(format!(
                "header declares {} words but {} records were read",
                header.vocab_size,
                store.len()
            )));
        }
        warn!(
            declared = header.vocab_size,
            read = store.len(),
            "binary header vocab size does not match record count"
        );
    }

    Ok(store)
}

/// Write `store` in the binary format with floats of `width`.
///
/// Every entry must share the first entry's dimension, and words must be
/// non-empty and free of spaces.
pub fn write_binary<W: Write>(
    store: &VectorStore,
    width: ElementWidth,
    mut writer: W,
) -> Result<()> {
    let dimension = store.dimension().unwrap_or(0);
    writeln!(writer, "{} {}", store.len(), dimension)?;

    for vector in store {
        if vector.dimension() != dimension {
            return Err(WordVecError::LengthMismatch {
                expected: dimension,
                actual: vector.dimension(),
            });
        }
        let word = vector.word();
        if word.is_empty() || word.bytes().any(|b| b == WORD_DELIMITER) {
            return Err(WordVecError::format(format!(
                "word {:?} cannot be stored in binary format",
                word
            )));
        }
        writer.write_all(word.as_bytes())?;
        writer.write_all(&[WORD_DELIMITER])?;
        for &x in vector.as_slice() {
            width.encode(x, &mut writer)?;
        }
        writer.write_all(&[RECORD_DELIMITER])?;
    }
    writer.flush()?;
    Ok(())
}
