use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};

use crate::record::Record;
use crate::schema::Schema;

/// A sorted chunk file open for merging.
///
/// Parses and keeps its own [Schema] from the chunk header, resolves the key
/// column, and buffers the head record so the merge loop can compare the
/// fronts of two chunks before consuming either.
#[derive(Debug)]
pub(crate) struct ChunkFile {
    path: PathBuf,
    reader: BufReader<File>,
    schema: Schema,
    key: usize,
    head: Option<Record>,
}

impl ChunkFile {
    pub(crate) fn open(path: PathBuf, key_column: &str) -> Result<ChunkFile, anyhow::Error> {
        let file = File::open(&path)
            .with_context(|| format!("path: {}", path.to_string_lossy()))?;
        let mut reader = BufReader::new(file);
        let mut line = String::new();
        let bytes = reader.read_line(&mut line)
            .with_context(|| format!("path: {}", path.to_string_lossy()))?;
        if bytes == 0 {
            return Err(anyhow!("missing header line in {}", path.to_string_lossy()));
        }
        let schema = Schema::from_header_line(line.trim_end_matches(['\r', '\n']))
            .with_context(|| format!("path: {}", path.to_string_lossy()))?;
        let key = schema.column_index(key_column)?;
        let head = Self::read_record(&mut reader, &schema, &path)?;
        Ok(
            ChunkFile {
                path,
                reader,
                schema,
                key,
                head,
            }
        )
    }

    fn read_record(reader: &mut BufReader<File>, schema: &Schema, path: &Path) -> Result<Option<Record>, anyhow::Error> {
        let mut line = String::new();
        let bytes = reader.read_line(&mut line)
            .with_context(|| format!("path: {}", path.to_string_lossy()))?;
        if bytes == 0 {
            Ok(None)
        } else {
            let record = schema
                .parse_record(line.trim_end_matches(['\r', '\n']))
                .with_context(|| format!("path: {}", path.to_string_lossy()))?;
            Ok(Some(record))
        }
    }

    /// The string value of the key column in the buffered head record, or
    /// None when the chunk is exhausted.
    pub(crate) fn head_key(&self) -> Option<&str> {
        self.head
            .as_ref()
            .map(|record| record.fields()[self.key].as_str())
    }

    /// Take the buffered head record and replace it with the next record
    /// from the chunk. Returns None once the chunk is exhausted.
    pub(crate) fn next_record(&mut self) -> Result<Option<Record>, anyhow::Error> {
        let next = Self::read_record(&mut self.reader, &self.schema, &self.path)?;
        Ok(std::mem::replace(&mut self.head, next))
    }

    pub(crate) fn schema(&self) -> &Schema {
        &self.schema
    }
}
