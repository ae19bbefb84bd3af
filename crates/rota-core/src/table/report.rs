use super::TableLayout;
use crate::planner::format_percent;
use crate::types::*;
use csv::WriterBuilder;
use std::io;

/// Number of summary rows appended under the employee rows.
pub const SUMMARY_ROWS: usize = 9;

const FIRST_DAY_COLUMN: usize = 4;

/// Final report: identity, day and total columns, pass-through columns, then
/// the per-day summary block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn build(result: &AssignmentResult, layout: &TableLayout) -> Self {
        let headers: Vec<String> = layout
            .identity_columns()
            .into_iter()
            .chain(layout.days.iter().map(String::as_str))
            .chain(layout.total_columns())
            .map(String::from)
            .chain(result.extra_columns.iter().cloned())
            .collect();
        let width = headers.len();

        let mut rows: Vec<Vec<String>> = result
            .employees
            .iter()
            .map(|assigned| employee_row(assigned, layout, width))
            .collect();

        let labels = &layout.summary;
        let daily = &result.daily;
        rows.push(summary_row(width, &labels.location_a, daily, |d| {
            d.location_a.to_string()
        }));
        rows.push(summary_row(width, &labels.location_b, daily, |d| {
            d.location_b.to_string()
        }));
        rows.push(summary_row(width, &labels.remote, daily, |d| {
            d.remote.to_string()
        }));
        rows.push(summary_row(width, &labels.total, daily, |d| {
            d.total.to_string()
        }));
        rows.push(vec![String::new(); width]);
        rows.push(summary_row(width, &labels.location_a_ratio, daily, |d| {
            format_percent(d.location_a, d.total)
        }));
        rows.push(summary_row(width, &labels.location_b_ratio, daily, |d| {
            format_percent(d.location_b, d.total)
        }));
        rows.push(summary_row(width, &labels.remote_ratio, daily, |d| {
            format_percent(d.remote, d.total)
        }));
        rows.push(summary_row(width, &labels.total_ratio, daily, |d| {
            format_percent(d.location_a + d.location_b + d.remote, d.total)
        }));

        Self { headers, rows }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Employee rows, without the summary block.
    pub fn employee_rows(&self) -> &[Vec<String>] {
        &self.rows[..self.rows.len().saturating_sub(SUMMARY_ROWS)]
    }

    /// The summary block under the employee rows.
    pub fn summary_rows(&self) -> &[Vec<String>] {
        &self.rows[self.rows.len().saturating_sub(SUMMARY_ROWS)..]
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|err| PlannerError::InvalidInput(err.to_string()))
    }
}

fn employee_row(assigned: &AssignedEmployee, layout: &TableLayout, width: usize) -> Vec<String> {
    let employee = &assigned.employee;
    let totals = &assigned.totals;

    let mut row = Vec::with_capacity(width);
    row.push(employee.department.clone());
    row.push(employee.employee.clone());
    match &employee.weight_text {
        Some([location_a, location_b]) => {
            row.push(location_a.clone());
            row.push(location_b.clone());
        }
        None => {
            row.push(employee.location_a_weight.to_string());
            row.push(employee.location_b_weight.to_string());
        }
    }
    row.extend(
        employee
            .days
            .iter()
            .map(|&cell| layout.format_cell(cell).to_string()),
    );
    row.extend(
        [totals.location_a, totals.location_b, totals.remote, totals.total]
            .iter()
            .map(u32::to_string),
    );
    row.extend(employee.extra.iter().cloned());
    row.resize(width, String::new());
    row
}

fn summary_row<F>(width: usize, label: &str, daily: &[DayTotals], value: F) -> Vec<String>
where
    F: Fn(&DayTotals) -> String,
{
    let mut row = vec![String::new(); width];
    row[1] = label.to_string();
    for totals in daily {
        row[FIRST_DAY_COLUMN + totals.day.index()] = value(totals);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_totals(day: Day, location_a: u32, location_b: u32, remote: u32) -> DayTotals {
        DayTotals {
            day,
            location_a,
            location_b,
            remote,
            total: location_a + location_b + remote,
        }
    }

    fn sample_result() -> AssignmentResult {
        let mut employee = Employee::new("Sales", "alice").with_weights(1, 2);
        employee.days[Day::Mon.index()] = DayCell::Remote;
        employee.days[Day::Tue.index()] = DayCell::LocationA;
        employee.days[Day::Wed.index()] = DayCell::LocationB;
        employee.extra = vec!["north".to_string()];

        let daily = Day::ALL
            .into_iter()
            .map(|day| match day {
                Day::Mon => day_totals(day, 0, 0, 1),
                Day::Tue => day_totals(day, 1, 0, 0),
                Day::Wed => day_totals(day, 1, 2, 0),
                _ => day_totals(day, 0, 0, 0),
            })
            .collect();

        AssignmentResult {
            employees: vec![AssignedEmployee {
                employee,
                totals: EmployeeTotals {
                    location_a: 1,
                    location_b: 1,
                    remote: 1,
                    total: 3,
                },
            }],
            extra_columns: vec!["team".to_string()],
            departments: Vec::new(),
            daily,
            unseated_days: 0,
            seed: None,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_column_order() {
        let report = ReportTable::build(&sample_result(), &TableLayout::english());

        assert_eq!(report.headers.len(), 4 + DAY_COUNT + 4 + 1);
        assert_eq!(&report.headers[..4], ["department", "employee", "location_a", "location_b"]);
        assert_eq!(report.headers[4], "mon");
        assert_eq!(report.headers[13], "next_fri");
        assert_eq!(report.headers[14], "location_a_days");
        assert_eq!(report.headers[17], "total_days");
        assert_eq!(report.headers[18], "team");
    }

    #[test]
    fn test_employee_row_cells() {
        let report = ReportTable::build(&sample_result(), &TableLayout::english());
        let row = &report.employee_rows()[0];

        assert_eq!(row[0], "Sales");
        assert_eq!(row[2], "1");
        assert_eq!(row[3], "2");
        assert_eq!(row[4], "remote");
        assert_eq!(row[5], "location_a");
        assert_eq!(row[6], "location_b");
        assert_eq!(row[7], "");
        assert_eq!(&row[14..18], ["1", "1", "1", "3"]);
        assert_eq!(row[18], "north");
    }

    #[test]
    fn test_summary_block() {
        let report = ReportTable::build(&sample_result(), &TableLayout::korean());
        let summary = report.summary_rows();

        assert_eq!(report.rows.len(), 1 + SUMMARY_ROWS);
        let labels: Vec<&str> = summary.iter().map(|row| row[1].as_str()).collect();
        assert_eq!(
            labels,
            ["문정근무일", "잠실근무일", "재택근무일", "총합", "", "문정비율", "잠실비율", "재택비율", "총비율"]
        );
        assert!(summary[4].iter().all(String::is_empty));

        let wed = 4 + Day::Wed.index();
        assert_eq!(summary[0][wed], "1");
        assert_eq!(summary[1][wed], "2");
        assert_eq!(summary[3][wed], "3");
        assert_eq!(summary[5][wed], "33.3%");
        assert_eq!(summary[6][wed], "66.7%");
        assert_eq!(summary[7][wed], "0.0%");
        assert_eq!(summary[8][wed], "100.0%");

        let thu = 4 + Day::Thu.index();
        for row in &summary[5..] {
            assert_eq!(row[thu], "0%");
        }
        // Totals and pass-through columns stay blank on summary rows.
        assert!(summary[0][14..].iter().all(String::is_empty));
    }

    #[test]
    fn test_csv_output() {
        let report = ReportTable::build(&sample_result(), &TableLayout::english());
        let csv = report.to_csv_string().unwrap();
        let mut lines = csv.lines();

        assert!(lines.next().unwrap().starts_with("department,employee,"));
        assert!(lines.next().unwrap().starts_with("Sales,alice,1,2,remote,location_a,"));
        assert_eq!(csv.lines().count(), 1 + 1 + SUMMARY_ROWS);
    }
}
