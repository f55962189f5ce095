use std::fs;
use std::path::Path;

use airline_satisfaction::reader::{ReadOptions, read_csv};
use airline_satisfaction::schema::SURVEY_COLUMNS;
use airline_satisfaction::{PredictorConfig, ReferenceTable, SurveyError};
use parquet::arrow::ArrowWriter;

use crate::utils::{encoded_columns, write_reference_csv};

fn options() -> ReadOptions {
    ReadOptions::from(&PredictorConfig::default())
}

fn write_parquet(csv_path: &Path, parquet_path: &Path) {
    let batches = read_csv(csv_path, options()).unwrap();
    let file = fs::File::create(parquet_path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batches[0].schema(), None).unwrap();
    for batch in &batches {
        writer.write(batch).unwrap();
    }
    writer.close().unwrap();
}

#[test]
fn test_csv_and_parquet_load_the_same_table() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = write_reference_csv(dir.path(), 240);
    let parquet_path = dir.path().join("airline_train_raw.parquet");
    write_parquet(&csv_path, &parquet_path);

    let from_csv = ReferenceTable::load(&csv_path, options(), &encoded_columns()).unwrap();
    let from_parquet = ReferenceTable::load(&parquet_path, options(), &encoded_columns()).unwrap();

    assert_eq!(from_csv.num_rows(), 240);
    assert_eq!(from_csv.num_rows(), from_parquet.num_rows());
    assert_eq!(from_csv.column_names(), from_parquet.column_names());
    for name in from_csv.column_names() {
        assert_eq!(from_csv.column(name), from_parquet.column(name), "column {name}");
    }
}

#[test]
fn test_small_batches_are_concatenated() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = write_reference_csv(dir.path(), 25);
    let options = ReadOptions {
        csv_infer_rows: None,
        batch_size: 4,
    };

    let table = ReferenceTable::load(&csv_path, options, &encoded_columns()).unwrap();
    assert_eq!(table.num_rows(), 25);
    assert_eq!(table.categories("class").unwrap(), vec!["Business", "Eco", "Eco Plus"]);
}

#[test]
fn test_missing_reference_column() {
    let dir = tempfile::tempdir().unwrap();
    let header: Vec<&str> = SURVEY_COLUMNS
        .iter()
        .map(|c| c.name)
        .filter(|name| *name != "cleanliness")
        .collect();
    let row = vec!["1"; header.len()].join(",");
    let path = dir.path().join("partial.csv");
    fs::write(&path, format!("{}\n{row}\n", header.join(","))).unwrap();

    match ReferenceTable::load(&path, options(), &encoded_columns()) {
        Err(SurveyError::SchemaMismatch { missing, .. }) => {
            assert_eq!(missing, vec!["cleanliness".to_string()]);
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn test_empty_reference_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_reference_csv(dir.path(), 0);
    assert!(ReferenceTable::load(&path, options(), &encoded_columns()).is_err());
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.xlsx");
    fs::write(&path, "not a spreadsheet").unwrap();
    assert!(matches!(
        ReferenceTable::load(&path, options(), &encoded_columns()),
        Err(SurveyError::ReferenceData(_))
    ));
}
