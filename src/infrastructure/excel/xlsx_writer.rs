//! Minimal single-sheet XLSX writer.
//! Text is written as inline strings so no shared string table is needed.

use std::fmt::Write as _;
use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Table};

const SHEET_NAME: &str = "Sheet1";

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs></styleSheet>"#;

/// Serialize `table` as a one-sheet workbook: header row, no index column
pub fn write_workbook(table: &Table) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let workbook = format!(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        SHEET_NAME
    );

    let parts: [(&str, String); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/styles.xml", STYLES.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(table)?),
    ];

    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(XML_HEADER.as_bytes())?;
        zip.write_all(body.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

fn sheet_xml(table: &Table) -> Result<String> {
    let mut xml = String::from(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    if table.column_count() > 0 {
        write_row(&mut xml, 1, table.columns().iter().map(|c| CellValue::Text(c.name().to_string())))?;

        for row in 0..table.row_count() {
            let cells = table.columns().iter().map(|c| c.cells()[row].clone());
            write_row(&mut xml, row + 2, cells)?;
        }
    }

    xml.push_str("</sheetData></worksheet>");
    Ok(xml)
}

fn write_row(xml: &mut String, row: usize, cells: impl Iterator<Item = CellValue>) -> Result<()> {
    write!(xml, r#"<row r="{}">"#, row).map_err(fmt_error)?;

    for (col, cell) in cells.enumerate() {
        let reference = format!("{}{}", column_letters(col), row);
        match cell {
            CellValue::Missing => {}
            CellValue::Number(value) if value.is_finite() => {
                write!(xml, r#"<c r="{}"><v>{}</v></c>"#, reference, value).map_err(fmt_error)?;
            }
            // inf has no numeric representation in a sheet
            CellValue::Number(value) => {
                write_inline_string(xml, &reference, &CellValue::Number(value).to_string())?;
            }
            CellValue::Text(text) => write_inline_string(xml, &reference, &text)?,
        }
    }

    xml.push_str("</row>");
    Ok(())
}

fn write_inline_string(xml: &mut String, reference: &str, text: &str) -> Result<()> {
    let space = if text.trim() != text { r#" xml:space="preserve""# } else { "" };
    write!(
        xml,
        r#"<c r="{}" t="inlineStr"><is><t{}>{}</t></is></c>"#,
        reference,
        space,
        escape(text)
    )
    .map_err(fmt_error)
}

fn fmt_error(err: std::fmt::Error) -> AppError {
    AppError::ExportError(format!("Failed to build sheet XML: {}", err))
}

/// Zero-based column index to spreadsheet letters (0 → A, 26 → AA)
fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::CsvParser;
    use crate::infrastructure::excel::read_first_sheet;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn test_sheet_xml_escapes_text_and_skips_missing() {
        let table = CsvParser::new().parse_content("k,v\n<a&b>,1\n,2.5\n").unwrap();
        let xml = sheet_xml(&table).unwrap();
        assert!(xml.contains("&lt;a&amp;b&gt;"));
        assert!(xml.contains(r#"<c r="B3"><v>2.5</v></c>"#));
        assert!(!xml.contains(r#"r="A3""#));
    }

    #[test]
    fn test_workbook_round_trip() {
        let table = CsvParser::new()
            .parse_content("region,units,price\nnorth,10,2.5\nsouth,,3\nR&D,4,\n")
            .unwrap();
        let bytes = write_workbook(&table).unwrap();
        let reread = read_first_sheet(&bytes).unwrap();
        assert_eq!(reread, table);
    }
}
