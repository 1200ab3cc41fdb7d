use std::collections::HashMap;

use regex::Regex;

use crate::error::SortError;
use crate::record::Record;

const DELIMITER: char = ',';
const HEADING_PATTERN: &str = r"\A[-A-Za-z0-9_ ]+\z";
const VALUE_PATTERN: &str = r"\A[^,\x0B\x0C\n\r\x{0085}\x{2028}\x{2029}]*\z";

/// The ordered, validated set of column names for a CSV file.
///
/// A [Schema] is built once per file handle, either from the header line or
/// from an explicit list of column names, and is immutable afterwards. It
/// provides the record codec - parsing a data line into a [Record],
/// serializing a [Record] back to a line - and the column name to ordinal
/// lookup used for key comparisons.
///
/// The format is deliberately narrow: the delimiter is a bare comma with no
/// quoting or escaping, so no field may contain a comma or a line break. That
/// constraint is enforced at write time.
///
/// # Examples
/// ```
/// use csv_file_sort::schema::Schema;
///
/// fn parse(line: &str) -> Result<(), anyhow::Error> {
///     let schema = Schema::from_header_line("id,name,score")?;
///     let record = schema.parse_record(line)?;
///     assert_eq!(record.fields().len(), 3);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Schema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    value_pattern: Regex,
}

impl Schema {
    /// Validate an explicit list of column names and build a [Schema]
    /// preserving their order.
    ///
    /// Fails with [SortError::InvalidHeader] when a name is empty, duplicated
    /// or contains a character outside `[-A-Za-z0-9_ ]`.
    pub fn from_columns(names: Vec<String>) -> Result<Schema, SortError> {
        let heading_pattern = Regex::new(HEADING_PATTERN)
            .map_err(|e| SortError::InvalidHeader(e.to_string()))?;
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(SortError::InvalidHeader(
                    format!("column heading {} is empty", i)
                ));
            }
            if !heading_pattern.is_match(name) {
                return Err(SortError::InvalidHeader(
                    format!("column heading {} contains invalid characters: '{}'", i, name)
                ));
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(SortError::InvalidHeader(
                    format!("duplicate column heading: '{}'", name)
                ));
            }
        }
        let value_pattern = Regex::new(VALUE_PATTERN)
            .map_err(|e| SortError::InvalidHeader(e.to_string()))?;
        Ok(
            Schema {
                columns: names,
                index,
                value_pattern,
            }
        )
    }

    /// Split a header line on the delimiter, preserving trailing empty
    /// fields, and validate the resulting column names.
    pub fn from_header_line(line: &str) -> Result<Schema, SortError> {
        let names = line.split(DELIMITER).map(|name| name.to_string()).collect();
        Self::from_columns(names)
    }

    /// Parse a data line into a [Record].
    ///
    /// The line is split on the delimiter with trailing empty fields
    /// preserved. Fails with [SortError::FieldCountMismatch] unless the field
    /// count equals the column count. Field content is not inspected here -
    /// structurally malformed values already present in a file are tolerated
    /// on read and rejected on write.
    pub fn parse_record(&self, line: &str) -> Result<Record, SortError> {
        let fields: Vec<String> = line.split(DELIMITER).map(|field| field.to_string()).collect();
        if fields.len() != self.columns.len() {
            Err(
                SortError::FieldCountMismatch {
                    expected: self.columns.len(),
                    actual: fields.len(),
                }
            )
        } else {
            Ok(Record::new(fields))
        }
    }

    /// Serialize the column names as a header line, in schema order.
    pub fn header_line(&self) -> String {
        self.columns.join(",")
    }

    /// Serialize a [Record] as a data line.
    ///
    /// Fails with [SortError::FieldCountMismatch] when the record arity
    /// disagrees with the schema, and with [SortError::InvalidFieldCharacters]
    /// when a field contains the delimiter or vertical whitespace.
    pub fn record_line(&self, record: &Record) -> Result<String, SortError> {
        if record.fields().len() != self.columns.len() {
            return Err(
                SortError::FieldCountMismatch {
                    expected: self.columns.len(),
                    actual: record.fields().len(),
                }
            );
        }
        for (i, field) in record.fields().iter().enumerate() {
            if !self.value_pattern.is_match(field) {
                return Err(SortError::InvalidFieldCharacters { index: i });
            }
        }
        Ok(record.fields().join(","))
    }

    /// Resolve a column name to its zero based ordinal.
    pub fn column_index(&self, name: &str) -> Result<usize, SortError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| SortError::UnknownColumn(name.to_string()))
    }

    /// Column names in schema order.
    pub fn columns(&self) -> &Vec<String> {
        &self.columns
    }

    /// The number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the schema has no columns. Cannot occur for a schema built
    /// through validation, which rejects empty headings.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
