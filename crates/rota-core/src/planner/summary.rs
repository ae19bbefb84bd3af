use crate::types::*;

/// Counts seated, remote and total days on one row.
pub(super) fn employee_totals(days: &[DayCell; DAY_COUNT]) -> EmployeeTotals {
    let mut totals = EmployeeTotals::default();
    for cell in days {
        match cell {
            DayCell::LocationA => totals.location_a += 1,
            DayCell::LocationB => totals.location_b += 1,
            DayCell::Remote => totals.remote += 1,
            DayCell::Unassigned => {}
        }
    }
    totals.total = totals.location_a + totals.location_b + totals.remote;
    totals
}

/// Aggregates every planned row into per-day counts, in day order.
pub(super) fn daily_totals(employees: &[AssignedEmployee]) -> Vec<DayTotals> {
    Day::ALL
        .into_iter()
        .map(|day| {
            let mut totals = DayTotals {
                day,
                location_a: 0,
                location_b: 0,
                remote: 0,
                total: 0,
            };
            for assigned in employees {
                match assigned.employee.cell(day) {
                    DayCell::LocationA => totals.location_a += 1,
                    DayCell::LocationB => totals.location_b += 1,
                    DayCell::Remote => totals.remote += 1,
                    DayCell::Unassigned => {}
                }
            }
            totals.total = totals.location_a + totals.location_b + totals.remote;
            totals
        })
        .collect()
}

/// Share of `count` in `total` as a percentage with one decimal, e.g. `"33.3%"`.
/// An empty day reads `"0%"`.
pub fn format_percent(count: u32, total: u32) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", f64::from(count) / f64::from(total) * 100.0)
}
