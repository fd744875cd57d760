// src/storage/csv.rs

//! CSV sink: one file per table under an output directory.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::Result;
use crate::models::ProductRecord;
use crate::storage::{RecordSink, TableNames, TableSummary};

/// Fixed output column order.
const COLUMNS: [&str; 9] = [
    "mpn",
    "lcsc_code",
    "manufacturer",
    "description",
    "category",
    "subcategory",
    "childcategory",
    "specs_json",
    "page",
];

/// Writes each table as `{dir}/{table}.csv`.
pub struct CsvDirSink {
    dir: PathBuf,
    names: TableNames,
}

impl CsvDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            names: TableNames::new(),
        }
    }
}

impl RecordSink for CsvDirSink {
    fn write_table(
        &mut self,
        base_name: &str,
        fallback: &str,
        records: &[ProductRecord],
    ) -> Result<TableSummary> {
        let name = self.names.assign(base_name, fallback);

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{name}.csv"));
        let mut writer = BufWriter::new(File::create(&path)?);

        let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
        write_row(&mut writer, &header)?;

        for record in records {
            let row = [
                record.mpn.clone(),
                record.lcsc_code.clone(),
                record.manufacturer.clone(),
                record.description.clone(),
                record.category.clone(),
                record.subcategory.clone(),
                record.child_category.clone(),
                record.specs_json(),
                record.page.to_string(),
            ];
            write_row(&mut writer, &row)?;
        }

        writer.flush()?;

        Ok(TableSummary {
            name,
            records: records.len(),
            location: path.display().to_string(),
        })
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one CSV row with minimal quoting.
fn write_row<W: Write>(writer: &mut W, cells: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in cells {
        if !first {
            write!(writer, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(writer, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(writer, "{cell}")?;
        }
    }
    writeln!(writer)
}
