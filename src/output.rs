use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

/// Where generated report files land. Created on demand.
pub struct ReportDir {
    dir: PathBuf,
}

impl ReportDir {
    pub fn new(dir: &str) -> Result<Self, Box<dyn Error>> {
        std::fs::create_dir_all(dir)?;
        Ok(ReportDir {
            dir: PathBuf::from(dir),
        })
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    pub fn write_csv<T: Serialize>(&self, file_name: &str, rows: &[T]) -> Result<PathBuf, Box<dyn Error>> {
        let path = self.path(file_name);
        let mut wtr = csv::Writer::from_path(&path)?;
        for r in rows {
            wtr.serialize(r)?;
        }
        wtr.flush()?;
        Ok(path)
    }

    pub fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> Result<PathBuf, Box<dyn Error>> {
        let path = self.path(file_name);
        let s = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, s)?;
        Ok(path)
    }
}

/// Print a titled markdown preview of the first `max_rows` rows, with a note
/// pointing at the exported file for the rest.
pub fn preview_table<T>(title: &str, rows: &[T], max_rows: usize, exported_to: &Path)
where
    T: Tabled + Clone,
{
    println!("{}", title);
    if rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    let table = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}", table);
    if rows.len() > max_rows {
        println!(
            "(showing {} of {} rows, full table in {})",
            max_rows,
            rows.len(),
            exported_to.display()
        );
    } else {
        println!("(full table in {})", exported_to.display());
    }
    println!();
}
