use super::TableLayout;
use crate::types::*;
use calamine::{Reader, Xlsx};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::collections::HashSet;
use std::io;
use std::path::Path;
use tracing::debug;

/// Reads a roster table into an assignment request with the default config.
///
/// The identity columns and the first cycle's day columns are required; the
/// next cycle's day columns are optional and read as empty when absent. Total
/// columns from a previously exported report are ignored. Every other column
/// is carried through in `extra_columns`.
pub fn read_request<R: io::Read>(reader: R, layout: &TableLayout) -> Result<AssignmentRequest> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let rows = reader.records().map(|record| -> Result<Vec<String>> {
        Ok(record?.iter().map(String::from).collect())
    });
    request_from_rows(&headers, rows, layout)
}

/// Reads the first sheet of an XLSX workbook, mapping columns exactly as
/// [`read_request`] does. Numeric cells are read back as their plain text.
pub fn read_request_xlsx<R: io::Read + io::Seek>(
    reader: R,
    layout: &TableLayout,
) -> Result<AssignmentRequest> {
    let mut workbook: Xlsx<R> = Xlsx::new(reader)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PlannerError::InvalidInput("Workbook has no sheets".to_string()))??;

    let mut rows = range.rows().map(|row| {
        row.iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect::<Vec<String>>()
    });
    let headers = rows.next().unwrap_or_default();
    request_from_rows(&headers, rows.map(Ok), layout)
}

pub fn read_request_xlsx_from_path<P: AsRef<Path>>(
    path: P,
    layout: &TableLayout,
) -> Result<AssignmentRequest> {
    let file = io::BufReader::new(std::fs::File::open(path)?);
    read_request_xlsx(file, layout)
}

fn request_from_rows<I>(headers: &[String], rows: I, layout: &TableLayout) -> Result<AssignmentRequest>
where
    I: IntoIterator<Item = Result<Vec<String>>>,
{
    let find = |name: &str| headers.iter().position(|header| header == name);
    let require =
        |name: &str| find(name).ok_or_else(|| PlannerError::MissingColumn(name.to_string()));

    let department_col = require(&layout.department)?;
    let employee_col = require(&layout.employee)?;
    let location_a_col = require(&layout.location_a)?;
    let location_b_col = require(&layout.location_b)?;

    let mut day_cols = [None; DAY_COUNT];
    for day in Day::ALL {
        let name = &layout.days[day.index()];
        day_cols[day.index()] = if day.is_next_cycle() {
            find(name)
        } else {
            Some(require(name)?)
        };
    }

    let mut known: HashSet<usize> = [department_col, employee_col, location_a_col, location_b_col]
        .into_iter()
        .chain(day_cols.iter().flatten().copied())
        .collect();
    known.extend(layout.total_columns().into_iter().filter_map(find));

    let extra_cols: Vec<usize> = (0..headers.len()).filter(|i| !known.contains(i)).collect();
    let extra_columns = extra_cols.iter().map(|&i| headers[i].clone()).collect();

    let mut employees = Vec::new();
    for (row_idx, row) in rows.into_iter().enumerate() {
        let row = row?;
        let field = |idx: usize| row.get(idx).map_or("", String::as_str);

        let department = field(department_col);
        if department.is_empty() {
            debug!(row = row_idx + 2, "skipping row without a department");
            continue;
        }

        let weight_cells = [field(location_a_col), field(location_b_col)];
        let (location_a_weight, location_b_weight) =
            parse_weights(weight_cells[0], weight_cells[1]);

        let mut days = [DayCell::Unassigned; DAY_COUNT];
        for (cell, col) in days.iter_mut().zip(day_cols) {
            if let Some(col) = col {
                *cell = layout.parse_cell(field(col));
            }
        }

        employees.push(Employee {
            department: department.to_string(),
            employee: field(employee_col).to_string(),
            location_a_weight,
            location_b_weight,
            weight_text: Some(weight_cells.map(String::from)),
            days,
            extra: extra_cols.iter().map(|&i| field(i).to_string()).collect(),
        });
    }

    Ok(AssignmentRequest {
        employees,
        extra_columns,
        config: PlannerConfig::default(),
    })
}

pub fn read_request_from_path<P: AsRef<Path>>(
    path: P,
    layout: &TableLayout,
) -> Result<AssignmentRequest> {
    let file = std::fs::File::open(path)?;
    read_request(file, layout)
}

/// Writes the header row of an empty roster table.
pub fn write_template<W: io::Write>(writer: W, layout: &TableLayout) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    let header: StringRecord = layout
        .identity_columns()
        .into_iter()
        .chain(layout.days.iter().map(String::as_str))
        .collect();
    writer.write_record(&header)?;
    writer.flush()?;
    Ok(())
}

/// Parses both preference weights. If either is not a non-negative whole
/// number, both are treated as zero.
pub(crate) fn parse_weights(location_a: &str, location_b: &str) -> (u32, u32) {
    match (parse_weight(location_a), parse_weight(location_b)) {
        (Some(a), Some(b)) => (a, b),
        _ => (0, 0),
    }
}

fn parse_weight(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u32>() {
        return Some(value);
    }
    // Spreadsheet exports often render whole numbers as "2.0".
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}
