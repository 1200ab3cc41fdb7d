use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use data_encoding::HEXLOWER;
use simple_logger::SimpleLogger;

pub fn setup() {
    let _ = SimpleLogger::new().init();
}

#[allow(dead_code)]
pub fn write_lines(path: &Path, lines: &[&str]) -> Result<(), anyhow::Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

#[allow(dead_code)]
pub fn read_lines(path: &Path) -> Result<Vec<String>, anyhow::Error> {
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
    Ok(lines)
}

#[allow(dead_code)]
pub fn temp_file_name(dir: &Path) -> PathBuf {
    let name = HEXLOWER.encode(&rand::random::<[u8; 16]>());
    dir.join(format!("{name}.csv"))
}

/// Names of leftover temporary artifacts in `dir`.
#[allow(dead_code)]
pub fn temp_artifacts(dir: &Path) -> Result<Vec<String>, anyhow::Error> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().to_string();
        if name.starts_with("temp_split_") || name.starts_with("temp_merge_") {
            names.push(name);
        }
    }
    Ok(names)
}
