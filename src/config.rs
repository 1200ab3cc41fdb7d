#[derive(Clone)]
pub(crate) struct Config {
    split_prefix: String,
    merge_prefix: String,
    tmp_suffix: String,
    chunk_capacity: usize,
    key_column: String,
}

impl Config {
    pub(crate) fn new(
        split_prefix: String,
        merge_prefix: String,
        tmp_suffix: String,
        chunk_capacity: usize,
        key_column: String,
    ) -> Config {
        Config {
            split_prefix,
            merge_prefix,
            tmp_suffix,
            chunk_capacity,
            key_column,
        }
    }

    pub(crate) fn split_prefix(&self) -> &String {
        &self.split_prefix
    }

    pub(crate) fn merge_prefix(&self) -> &String {
        &self.merge_prefix
    }

    pub(crate) fn tmp_suffix(&self) -> &String {
        &self.tmp_suffix
    }

    pub(crate) fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    pub(crate) fn key_column(&self) -> &str {
        &self.key_column
    }
}
