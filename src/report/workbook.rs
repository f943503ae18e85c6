//! Quality report spreadsheet writer
//!
//! Writes the accumulated check results as an OOXML workbook through the
//! zip container: one sheet per populated check, each sheet a label
//! column plus a single data column under a fixed header. Strings are
//! stored inline so no shared-string table is needed.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::pipeline::quality::{DuplicateCheck, QualityReport};

const DUPLICATION_SHEET: &str = "duplication";
const DUPLICATION_HEADER: &str = "duplicate key";
const MISSING_SHEET: &str = "missing value";
const MISSING_HEADER: &str = "missing value proportion (%)";
const OUTLIERS_SHEET: &str = "outliers";
const OUTLIERS_HEADER: &str = "outliers proportion (%)";

/// One worksheet: a fixed header over a single data column, each row a
/// label plus one cell
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub header: String,
    pub rows: Vec<(String, SheetCell)>,
}

#[derive(Debug, Clone)]
pub enum SheetCell {
    Number(f64),
    Text(String),
}

/// Write `<dir>/quality check report <YYYYMMDD_HHMMSS>.xlsx` with one
/// sheet per populated check and return the written path.
///
/// A clean duplicate scan writes no sheet (its marker suppresses the
/// entry entirely); an empty-but-checked missing or outlier profile
/// still writes its header-only sheet.
pub fn write_quality_report(report: &QualityReport, dir: &Path) -> Result<PathBuf> {
    let mut sheets: Vec<Sheet> = Vec::new();

    if let Some(duplicates) = &report.duplicates {
        if let DuplicateCheck::Found { .. } = duplicates {
            let rows = duplicates
                .joined_keys()
                .into_iter()
                .enumerate()
                .map(|(i, key)| (i.to_string(), SheetCell::Text(key)))
                .collect();
            sheets.push(Sheet {
                name: DUPLICATION_SHEET.to_string(),
                header: DUPLICATION_HEADER.to_string(),
                rows,
            });
        }
    }
    if let Some(missing) = &report.missing_values {
        sheets.push(profile_sheet(MISSING_SHEET, MISSING_HEADER, missing));
    }
    if let Some(outliers) = &report.outliers {
        sheets.push(profile_sheet(OUTLIERS_SHEET, OUTLIERS_HEADER, outliers));
    }

    if sheets.is_empty() {
        anyhow::bail!("No quality check has produced results to report");
    }

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("quality check report {}.xlsx", stamp));
    write_workbook(&path, &sheets)?;

    Ok(path)
}

fn profile_sheet(name: &str, header: &str, profile: &[(String, f64)]) -> Sheet {
    Sheet {
        name: name.to_string(),
        header: header.to_string(),
        rows: profile
            .iter()
            .map(|(column, pct)| (column.clone(), SheetCell::Number(*pct)))
            .collect(),
    }
}

/// Write the workbook container with all fixed OOXML parts
pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create workbook: {}", path.display()))?;

    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut add_part = |name: &str, content: String| -> Result<()> {
        zip.start_file(name, options)
            .with_context(|| format!("Failed to add {} to workbook", name))?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    };

    add_part("[Content_Types].xml", content_types(sheets.len()))?;
    add_part("_rels/.rels", root_rels())?;
    add_part("xl/workbook.xml", workbook_xml(sheets))?;
    add_part("xl/_rels/workbook.xml.rels", workbook_rels(sheets.len()))?;
    add_part("xl/styles.xml", styles_xml())?;
    for (i, sheet) in sheets.iter().enumerate() {
        add_part(&format!("xl/worksheets/sheet{}.xml", i + 1), sheet_xml(sheet))?;
    }

    zip.finish().context("Failed to finalize workbook")?;
    Ok(())
}

fn content_types(sheet_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
"#,
    );
    for i in 1..=sheet_count {
        xml.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\n",
            i
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn root_rels() -> String {
    String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
    )
}

fn workbook_xml(sheets: &[Sheet]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
"#,
    );
    for (i, sheet) in sheets.iter().enumerate() {
        xml.push_str(&format!(
            "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>\n",
            xml_escape(&sheet.name),
            i + 1,
            i + 1
        ));
    }
    xml.push_str("</sheets>\n</workbook>");
    xml
}

fn workbook_rels(sheet_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for i in 1..=sheet_count {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{}.xml\"/>\n",
            i, i
        ));
    }
    xml.push_str(&format!(
        "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>\n",
        sheet_count + 1
    ));
    xml.push_str("</Relationships>");
    xml
}

fn styles_xml() -> String {
    String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
<borders count="1"><border/></borders>
<cellStyleXfs count="1"><xf/></cellStyleXfs>
<cellXfs count="1"><xf xfId="0"/></cellXfs>
</styleSheet>"#,
    )
}

fn sheet_xml(sheet: &Sheet) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
"#,
    );
    xml.push_str(&format!(
        "<row r=\"1\"><c r=\"B1\" t=\"inlineStr\"><is><t>{}</t></is></c></row>\n",
        xml_escape(&sheet.header)
    ));
    for (i, (label, cell)) in sheet.rows.iter().enumerate() {
        let row = i + 2;
        let value = match cell {
            SheetCell::Number(v) => format!("<c r=\"B{}\"><v>{}</v></c>", row, v),
            SheetCell::Text(s) => format!(
                "<c r=\"B{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                row,
                xml_escape(s)
            ),
        };
        xml.push_str(&format!(
            "<row r=\"{}\"><c r=\"A{}\" t=\"inlineStr\"><is><t>{}</t></is></c>{}</row>\n",
            row,
            row,
            xml_escape(label),
            value
        ));
    }
    xml.push_str("</sheetData>\n</worksheet>");
    xml
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
