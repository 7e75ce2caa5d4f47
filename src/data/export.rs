use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::YEAR_COLUMN;
use super::pivot::PivotTable;

/// Write a pivot table as CSV: `year,<genre>,...` then one line per year.
pub fn write_pivot_csv<W: Write>(table: &PivotTable, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = Vec::with_capacity(table.genres().len() + 1);
    header.push(YEAR_COLUMN.to_string());
    header.extend(table.genres().iter().cloned());
    writer.write_record(&header).context("writing CSV header")?;

    for (year, values) in table.rows() {
        let mut record = Vec::with_capacity(values.len() + 1);
        record.push(year.to_string());
        record.extend(values.iter().map(|v| v.to_string()));
        writer
            .write_record(&record)
            .with_context(|| format!("writing row for {year}"))?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Export the table to `path`, overwriting it.
pub fn export_pivot(table: &PivotTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_pivot_csv(table, file)?;
    log::info!(
        "Exported {} years x {} genres to {}",
        table.years().len(),
        table.genres().len(),
        path.display()
    );
    Ok(())
}
