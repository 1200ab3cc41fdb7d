use std::cmp::Ordering;

/// An ordered, fixed arity sequence of string fields, one per schema column.
///
/// Records are transient - read from a source stream, optionally buffered,
/// written to a destination stream, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Record {
        Record {
            fields,
        }
    }

    /// The record fields in column order.
    pub fn fields(&self) -> &Vec<String> {
        &self.fields
    }
}

/// A [Record] bound to a resolved key column ordinal.
///
/// Ordering compares the string value at the key ordinal lexicographically.
/// Only the key field takes part in the comparison, so the relative order of
/// equal key records is unspecified.
#[derive(Debug)]
pub(crate) struct KeyedRecord {
    record: Record,
    key: usize,
}

impl KeyedRecord {
    pub(crate) fn new(record: Record, key: usize) -> KeyedRecord {
        KeyedRecord {
            record,
            key,
        }
    }

    fn key_value(&self) -> &str {
        self.record.fields()[self.key].as_str()
    }

    pub(crate) fn into_record(self) -> Record {
        self.record
    }
}

impl Eq for KeyedRecord {}

impl PartialEq<Self> for KeyedRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key_value().eq(other.key_value())
    }
}

impl PartialOrd<Self> for KeyedRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyedRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_value().cmp(other.key_value())
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{KeyedRecord, Record};

    fn keyed(fields: Vec<&str>, key: usize) -> KeyedRecord {
        let fields = fields.into_iter().map(|f| f.to_string()).collect();
        KeyedRecord::new(Record::new(fields), key)
    }

    #[test]
    fn test_compares_by_key_field_only() {
        let smaller = keyed(vec!["z", "10"], 1);
        let greater = keyed(vec!["a", "20"], 1);
        assert!(smaller < greater);
    }

    #[test]
    fn test_lexicographic_not_numeric() {
        let nine = keyed(vec!["9"], 0);
        let ten = keyed(vec!["10"], 0);
        // string comparison puts "10" before "9"
        assert!(ten < nine);
    }

    #[test]
    fn test_equal_keys() {
        let first = keyed(vec!["x", "5"], 1);
        let second = keyed(vec!["y", "5"], 1);
        assert_eq!(first, second);
    }
}
