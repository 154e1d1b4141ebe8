//! XML Spreadsheet 2003 workbook with a single worksheet.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::SHEET_NAME;
use crate::error::OutputError;
use crate::models::row::{Cell, TableRow};

const NAMESPACE: &str = "urn:schemas-microsoft-com:office:spreadsheet";

pub(super) fn write<W: Write, R: TableRow>(out: W, rows: &[R]) -> Result<(), OutputError> {
    let mut w = Writer::new_with_indent(out, b' ', 1);

    emit(&mut w, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut workbook = BytesStart::new("Workbook");
    workbook.push_attribute(("xmlns", NAMESPACE));
    workbook.push_attribute(("xmlns:ss", NAMESPACE));
    emit(&mut w, Event::Start(workbook))?;

    let mut sheet = BytesStart::new("Worksheet");
    sheet.push_attribute(("ss:Name", SHEET_NAME));
    emit(&mut w, Event::Start(sheet))?;
    emit(&mut w, Event::Start(BytesStart::new("Table")))?;

    let header: Vec<Cell> = R::COLUMNS.iter().map(|c| Cell::text(*c)).collect();
    write_row(&mut w, &header)?;
    for row in rows {
        write_row(&mut w, &row.cells())?;
    }

    emit(&mut w, Event::End(BytesEnd::new("Table")))?;
    emit(&mut w, Event::End(BytesEnd::new("Worksheet")))?;
    emit(&mut w, Event::End(BytesEnd::new("Workbook")))?;
    w.into_inner()
        .flush()
        .map_err(|e| OutputError::Xml(e.to_string()))
}

fn write_row<W: Write>(w: &mut Writer<W>, cells: &[Cell]) -> Result<(), OutputError> {
    emit(w, Event::Start(BytesStart::new("Row")))?;
    for cell in cells {
        let kind = match cell {
            Cell::Empty => {
                emit(w, Event::Empty(BytesStart::new("Cell")))?;
                continue;
            }
            Cell::Text(_) => "String",
            Cell::Number(_) | Cell::Integer(_) => "Number",
        };
        let text = cell.render();
        emit(w, Event::Start(BytesStart::new("Cell")))?;
        let mut data = BytesStart::new("Data");
        data.push_attribute(("ss:Type", kind));
        emit(w, Event::Start(data))?;
        emit(w, Event::Text(BytesText::new(&text)))?;
        emit(w, Event::End(BytesEnd::new("Data")))?;
        emit(w, Event::End(BytesEnd::new("Cell")))?;
    }
    emit(w, Event::End(BytesEnd::new("Row")))
}

fn emit<W: Write>(w: &mut Writer<W>, event: Event<'_>) -> Result<(), OutputError> {
    w.write_event(event)
        .map_err(|e| OutputError::Xml(e.to_string()))
}
