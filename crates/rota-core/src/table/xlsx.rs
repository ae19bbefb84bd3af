use super::ReportTable;
use crate::types::Result;
use rust_xlsxwriter::{Format, Workbook};

impl ReportTable {
    /// Renders the report as a single-sheet XLSX workbook.
    /// Whole-number cells are written as numbers, everything else as text.
    pub fn to_xlsx(&self, sheet_name: &str) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet_name)?;

            for (col, header) in self.headers.iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
            }

            for (row_idx, row) in self.rows.iter().enumerate() {
                let row_num = row_idx as u32 + 1;
                for (col, cell) in row.iter().enumerate() {
                    if cell.is_empty() {
                        continue;
                    }
                    match as_count(cell) {
                        Some(value) => worksheet.write_number(row_num, col as u16, value)?,
                        None => worksheet.write_string(row_num, col as u16, cell)?,
                    };
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

/// Whole numbers that survive a round trip unchanged, so identifiers such as
/// "007" stay text.
fn as_count(cell: &str) -> Option<f64> {
    let value: u64 = cell.parse().ok()?;
    (value.to_string() == cell).then_some(value as f64)
}
