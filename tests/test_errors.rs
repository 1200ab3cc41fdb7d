use csv_file_sort::error::SortError;
use csv_file_sort::sort::Sort;

mod common;

#[test]
fn test_duplicate_column_heading() -> Result<(), anyhow::Error> {
    common::setup();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("dup.csv");
    let output = common::temp_file_name(dir.path());
    common::write_lines(&input, &["a,a", "1,2"])?;

    let err = Sort::new(input, output, "a").sort().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SortError>(),
        Some(SortError::InvalidHeader(_))
    ));
    Ok(())
}

#[test]
fn test_illegal_column_heading_character() -> Result<(), anyhow::Error> {
    common::setup();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("illegal.csv");
    let output = common::temp_file_name(dir.path());
    common::write_lines(&input, &["a,b!", "1,2"])?;

    let err = Sort::new(input, output, "a").sort().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SortError>(),
        Some(SortError::InvalidHeader(_))
    ));
    Ok(())
}

#[test]
fn test_unknown_sort_column() -> Result<(), anyhow::Error> {
    common::setup();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("unknown.csv");
    let output = common::temp_file_name(dir.path());
    common::write_lines(&input, &["a,b", "1,2"])?;

    let err = Sort::new(input, output, "c").sort().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SortError>(),
        Some(SortError::UnknownColumn(name)) if name == "c"
    ));
    Ok(())
}

#[test]
fn test_field_count_mismatch() -> Result<(), anyhow::Error> {
    common::setup();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("short-row.csv");
    let output = common::temp_file_name(dir.path());
    common::write_lines(&input, &["a,b,c", "1,2,3", "1,2"])?;

    let err = Sort::new(input, output.clone(), "a").sort().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SortError>(),
        Some(SortError::FieldCountMismatch { expected: 3, actual: 2 })
    ));
    // a single malformed row fails the whole job without partial output
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_header_only_input() -> Result<(), anyhow::Error> {
    common::setup();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("header-only.csv");
    let output = common::temp_file_name(dir.path());
    common::write_lines(&input, &["a,b,c"])?;

    let err = Sort::new(input, output.clone(), "a").sort().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SortError>(),
        Some(SortError::EmptyInputSet)
    ));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_missing_input_file() -> Result<(), anyhow::Error> {
    common::setup();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("no-such-file.csv");
    let output = common::temp_file_name(dir.path());

    let result = Sort::new(input, output, "a").sort();
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_completely_empty_input() -> Result<(), anyhow::Error> {
    common::setup();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("empty.csv");
    let output = common::temp_file_name(dir.path());
    common::write_lines(&input, &[])?;

    let result = Sort::new(input, output, "a").sort();
    assert!(result.is_err());
    Ok(())
}
