//! UTF-8 CSV with a byte-order mark so spreadsheet tools pick the right
//! encoding for Chinese headers.

use std::io::Write;

use crate::error::OutputError;
use crate::models::row::TableRow;

const BOM: &[u8] = "\u{feff}".as_bytes();

pub(super) fn write<W: Write, R: TableRow>(mut out: W, rows: &[R]) -> Result<(), OutputError> {
    out.write_all(BOM).map_err(csv::Error::from)?;

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(R::COLUMNS)?;
    for row in rows {
        wtr.write_record(row.cells().iter().map(|c| c.render()))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
