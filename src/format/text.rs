//! Text model format: one `word v1 v2 ... vN` record per line

use crate::error::{Result, WordVecError};
use crate::storage::VectorStore;
use crate::vector::Vector;
use std::io::{BufRead, Write};
use tracing::debug;

/// Sentinel word2vec writes for the end-of-sentence token
pub const END_OF_SENTENCE: &str = "</s>";

/// Parse a text model.
///
/// Lines with fewer than three tokens (such as the `<vocab> <dim>` header)
/// and the `</s>` line are skipped. A token that is not a number fails the
/// whole load. Bytes that are not valid UTF-8 are replaced rather than
/// rejected.
pub fn read_text<R: BufRead>(mut reader: R) -> Result<VectorStore> {
    let mut store = VectorStore::new();
    let mut skipped = 0usize;
    let mut buf = Vec::new();
    let mut index = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        index += 1;
        let line = String::from_utf8_lossy(&buf);
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 || tokens[0] == END_OF_SENTENCE {
            skipped += 1;
            continue;
        }

        let values = tokens[1..]
            .iter()
            .map(|token| {
                token.parse::<f64>().map_err(|_| {
                    WordVecError::format(format!(
                        "line {}: invalid number {:?} for word {:?}",
                        index,
                        token,
                        tokens[0]
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        store.push(Vector::new(tokens[0], values));
    }

    debug!(words = store.len(), skipped, "read text model");
    Ok(store)
}

/// Write `store` in the text format, preceded by a `<vocab> <dim>` header line
pub fn write_text<W: Write>(store: &VectorStore, mut writer: W) -> Result<()> {
    writeln!(writer, "{} {}", store.len(), store.dimension().unwrap_or(0))?;
    for vector in store {
        write!(writer, "{}", vector.word())?;
        for x in vector.as_slice() {
            write!(writer, " {}", x)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
