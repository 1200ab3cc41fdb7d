use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};

use crate::chunk_file::ChunkFile;
use crate::config::Config;
use crate::error::SortError;
use crate::record::KeyedRecord;
use crate::schema::Schema;

const DEFAULT_CHUNK_CAPACITY: usize = 50;
const SPLIT_PREFIX: &str = "temp_split_";
const MERGE_PREFIX: &str = "temp_merge_";
const TMP_SUFFIX: &str = ".csv";

/// Sort a CSV file by a named column using bounded memory.
///
/// The input is split into sorted chunk files of at most `chunk_capacity`
/// records each, the chunks are pairwise merged until one sorted file
/// remains, and that file is renamed to the output path. Temporary files are
/// created as siblings of the input and removed when the sort finishes.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use csv_file_sort::sort::Sort;
///
/// fn sort_by_score(input: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
///     let mut csv_sort = Sort::new(input, output, "score");
///
///     // set the number of records held in memory during the split phase.
///     // The default is 50.
///     csv_sort.with_chunk_capacity(10_000);
///
///     csv_sort.sort()
/// }
/// ```
pub struct Sort {
    input: PathBuf,
    output: PathBuf,
    key_column: String,
    chunk_capacity: usize,
}

impl Sort {
    /// Create a default Sort definition.
    ///
    /// * `input` - path of the CSV file to sort. The first line must be a
    ///   valid header containing `key_column`.
    /// * `output` - path for the sorted result. The parent directory must be
    ///   writable.
    /// * `key_column` - the column whose string value determines sort order.
    ///   Comparison is lexicographic, not numeric or locale aware.
    pub fn new(input: PathBuf, output: PathBuf, key_column: &str) -> Sort {
        Sort {
            input,
            output,
            key_column: key_column.to_string(),
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
        }
    }

    /// Set the maximum number of records buffered in memory during the split
    /// phase. The default is 50. The sorted result is identical for any
    /// capacity; larger values produce fewer, larger chunk files.
    pub fn with_chunk_capacity(&mut self, chunk_capacity: usize) {
        assert!(chunk_capacity > 0, "chunk capacity must be positive");
        self.chunk_capacity = chunk_capacity;
    }

    /// Sort the input file into the output file.
    ///
    /// Any failure aborts the whole sort; the output file is created only
    /// when the complete merge sequence succeeds. Temporary artifacts are
    /// removed on both success and failure, including leftovers from a
    /// crashed prior run in the same directory.
    pub fn sort(&self) -> Result<(), anyhow::Error> {
        let config = self.create_config();
        log::info!(
            "Start external sort of {} by column '{}'",
            self.input.to_string_lossy(),
            config.key_column()
        );
        let result = self
            .split(&config)
            .and_then(|chunks| self.merge_list(chunks, &config));
        self.cleanup(&config);
        result?;
        log::info!("Finish external sort into {}", self.output.to_string_lossy());
        Ok(())
    }

    /// Verify that the input file is sorted by the key column.
    pub fn check(&self) -> Result<bool, anyhow::Error> {
        let mut chunk = ChunkFile::open(self.input.clone(), &self.key_column)?;
        let mut previous: Option<String> = None;
        while let Some(key) = chunk.head_key() {
            let key = key.to_string();
            if let Some(previous) = &previous {
                if previous > &key {
                    return Ok(false);
                }
            }
            previous = Some(key);
            chunk.next_record()?;
        }
        Ok(true)
    }

    fn create_config(&self) -> Config {
        Config::new(
            SPLIT_PREFIX.to_string(),
            MERGE_PREFIX.to_string(),
            TMP_SUFFIX.to_string(),
            self.chunk_capacity,
            self.key_column.clone(),
        )
    }

    fn tmp_path(&self, prefix: &str, sequence: usize, suffix: &str) -> PathBuf {
        self.input.with_file_name(format!("{}{:05}{}", prefix, sequence, suffix))
    }

    fn split(&self, config: &Config) -> Result<Vec<PathBuf>, anyhow::Error> {
        let file = File::open(&self.input)
            .with_context(|| format!("path: {}", self.input.to_string_lossy()))?;
        let mut reader = BufReader::new(file);
        let mut line = String::new();
        let bytes = reader.read_line(&mut line)
            .with_context(|| format!("path: {}", self.input.to_string_lossy()))?;
        if bytes == 0 {
            return Err(anyhow!("missing header line in {}", self.input.to_string_lossy()));
        }
        let schema = Schema::from_header_line(line.trim_end_matches(['\r', '\n']))
            .with_context(|| format!("path: {}", self.input.to_string_lossy()))?;
        let key = schema.column_index(config.key_column())?;

        let mut buffer: BinaryHeap<Reverse<KeyedRecord>> =
            BinaryHeap::with_capacity(config.chunk_capacity());
        let mut chunks: Vec<PathBuf> = Vec::new();
        let mut row = 0usize;
        loop {
            line.clear();
            if reader.read_line(&mut line)
                .with_context(|| format!("path: {}", self.input.to_string_lossy()))? == 0
            {
                break;
            }
            row += 1;
            let record = schema
                .parse_record(line.trim_end_matches(['\r', '\n']))
                .with_context(|| format!(
                    "file: {}, row: {}",
                    self.input.to_string_lossy(),
                    row
                ))?;
            buffer.push(Reverse(KeyedRecord::new(record, key)));
            if buffer.len() == config.chunk_capacity() {
                let path = self.tmp_path(config.split_prefix(), chunks.len(), config.tmp_suffix());
                Self::write_chunk(&mut buffer, &schema, &path)?;
                chunks.push(path);
            }
        }
        if !buffer.is_empty() {
            let path = self.tmp_path(config.split_prefix(), chunks.len(), config.tmp_suffix());
            Self::write_chunk(&mut buffer, &schema, &path)?;
            chunks.push(path);
        }
        log::info!(
            "Split {} rows into {} sorted chunks",
            row,
            chunks.len()
        );
        Ok(chunks)
    }

    fn write_chunk(
        buffer: &mut BinaryHeap<Reverse<KeyedRecord>>,
        schema: &Schema,
        path: &Path,
    ) -> Result<(), anyhow::Error> {
        let file = File::create(path)
            .with_context(|| format!("path: {}", path.to_string_lossy()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", schema.header_line())?;
        while let Some(Reverse(keyed_record)) = buffer.pop() {
            writeln!(writer, "{}", schema.record_line(&keyed_record.into_record())?)?;
        }
        writer.flush()
            .with_context(|| format!("path: {}", path.to_string_lossy()))?;
        Ok(())
    }

    fn merge_pair(
        left_path: PathBuf,
        right_path: PathBuf,
        to_path: &Path,
        key_column: &str,
    ) -> Result<(), anyhow::Error> {
        let mut left = ChunkFile::open(left_path, key_column)?;
        let mut right = ChunkFile::open(right_path, key_column)?;
        let file = File::create(to_path)
            .with_context(|| format!("path: {}", to_path.to_string_lossy()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", left.schema().header_line())?;
        loop {
            // emit left on ties to keep the merge left biased
            let take_left = match (left.head_key(), right.head_key()) {
                (Some(l), Some(r)) => l <= r,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let side = if take_left { &mut left } else { &mut right };
            if let Some(record) = side.next_record()? {
                writeln!(writer, "{}", side.schema().record_line(&record)?)?;
            }
        }
        writer.flush()
            .with_context(|| format!("path: {}", to_path.to_string_lossy()))?;
        Ok(())
    }

    fn merge_list(&self, chunks: Vec<PathBuf>, config: &Config) -> Result<(), anyhow::Error> {
        if chunks.is_empty() {
            return Err(SortError::EmptyInputSet.into());
        }
        let mut queue: VecDeque<PathBuf> = chunks.into();
        let mut merges = 0usize;
        while queue.len() > 1 {
            if let (Some(left), Some(right)) = (queue.pop_front(), queue.pop_front()) {
                let merged = self.tmp_path(config.merge_prefix(), merges, config.tmp_suffix());
                merges += 1;
                log::info!(
                    "Merging {} and {} into {}",
                    left.to_string_lossy(),
                    right.to_string_lossy(),
                    merged.to_string_lossy()
                );
                Self::merge_pair(left, right, &merged, config.key_column())?;
                queue.push_back(merged);
            }
        }
        let sorted = queue
            .pop_front()
            .ok_or_else(|| anyhow!("merge queue drained unexpectedly"))?;
        fs::rename(&sorted, &self.output)
            .with_context(|| anyhow!(
                "Rename {} to {}",
                sorted.to_string_lossy(),
                self.output.to_string_lossy()
            ))?;
        Ok(())
    }

    /// Remove every reserved prefix file from the input's directory. Runs
    /// strictly after the output has been finalized; individual failures are
    /// logged and skipped so a file already deleted cannot fail the sort.
    fn cleanup(&self, config: &Config) {
        let directory = match self.input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let entries = match fs::read_dir(&directory) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "Failed to scan {} for temporary files: {}",
                    directory.to_string_lossy(),
                    e
                );
                return;
            }
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(config.split_prefix()) || name.starts_with(config.merge_prefix()) {
                if let Err(e) = fs::remove_file(entry.path()) {
                    log::warn!(
                        "Failed to remove temporary file {}: {}",
                        entry.path().to_string_lossy(),
                        e
                    );
                }
            }
        }
    }
}
