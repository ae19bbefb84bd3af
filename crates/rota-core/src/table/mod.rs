//! Roster tables: column layouts, CSV import, report building and export.

use crate::types::{DayCell, DAY_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod reader;
mod report;
mod xlsx;

pub use reader::{
    read_request, read_request_from_path, read_request_xlsx, read_request_xlsx_from_path,
    write_template,
};
pub use report::ReportTable;

/// Names of the per-employee total columns appended after the day columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsColumns {
    pub location_a: String,
    pub location_b: String,
    pub remote: String,
    pub total: String,
}

/// Labels of the summary rows appended under the employee rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLabels {
    pub location_a: String,
    pub location_b: String,
    pub remote: String,
    pub total: String,
    pub location_a_ratio: String,
    pub location_b_ratio: String,
    pub remote_ratio: String,
    pub total_ratio: String,
}

/// Column names and cell markers of a roster table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    pub department: String,
    pub employee: String,
    /// Weight column for location A; also the location A cell marker
    pub location_a: String,
    /// Weight column for location B; also the location B cell marker
    pub location_b: String,
    /// Day columns in `Day::ALL` order
    pub days: [String; DAY_COUNT],
    pub remote_marker: String,
    pub totals: TotalsColumns,
    pub summary: SummaryLabels,
    pub sheet_name: String,
}

impl TableLayout {
    pub fn english() -> Self {
        Self {
            department: "department".into(),
            employee: "employee".into(),
            location_a: "location_a".into(),
            location_b: "location_b".into(),
            days: [
                "mon", "tue", "wed", "thu", "fri", "next_mon", "next_tue", "next_wed", "next_thu",
                "next_fri",
            ]
            .map(String::from),
            remote_marker: "remote".into(),
            totals: TotalsColumns {
                location_a: "location_a_days".into(),
                location_b: "location_b_days".into(),
                remote: "remote_days".into(),
                total: "total_days".into(),
            },
            summary: SummaryLabels {
                location_a: "location_a_days".into(),
                location_b: "location_b_days".into(),
                remote: "remote_days".into(),
                total: "total".into(),
                location_a_ratio: "location_a_ratio".into(),
                location_b_ratio: "location_b_ratio".into(),
                remote_ratio: "remote_ratio".into(),
                total_ratio: "total_ratio".into(),
            },
            sheet_name: "assignments".into(),
        }
    }

    /// Layout of the Korean roster workbook (문정/잠실 sites).
    pub fn korean() -> Self {
        Self {
            department: "부서".into(),
            employee: "직원".into(),
            location_a: "문정".into(),
            location_b: "잠실".into(),
            days: [
                "월", "화", "수", "목", "금", "Next_월", "Next_화", "Next_수", "Next_목", "Next_금",
            ]
            .map(String::from),
            remote_marker: "재택".into(),
            totals: TotalsColumns {
                location_a: "문정근무일".into(),
                location_b: "잠실근무일".into(),
                remote: "재택일".into(),
                total: "총합".into(),
            },
            summary: SummaryLabels {
                location_a: "문정근무일".into(),
                location_b: "잠실근무일".into(),
                remote: "재택근무일".into(),
                total: "총합".into(),
                location_a_ratio: "문정비율".into(),
                location_b_ratio: "잠실비율".into(),
                remote_ratio: "재택비율".into(),
                total_ratio: "총비율".into(),
            },
            sheet_name: "자동배정결과".into(),
        }
    }

    /// Identity columns in output order.
    pub fn identity_columns(&self) -> [&str; 4] {
        [
            self.department.as_str(),
            self.employee.as_str(),
            self.location_a.as_str(),
            self.location_b.as_str(),
        ]
    }

    pub fn total_columns(&self) -> [&str; 4] {
        [
            self.totals.location_a.as_str(),
            self.totals.location_b.as_str(),
            self.totals.remote.as_str(),
            self.totals.total.as_str(),
        ]
    }

    /// Reads a day cell. Anything that is not a known marker counts as an
    /// on-site day without a seat.
    pub fn parse_cell(&self, raw: &str) -> DayCell {
        let raw = raw.trim();
        if raw == self.remote_marker {
            DayCell::Remote
        } else if raw == self.location_a {
            DayCell::LocationA
        } else if raw == self.location_b {
            DayCell::LocationB
        } else {
            DayCell::Unassigned
        }
    }

    pub fn format_cell(&self, cell: DayCell) -> &str {
        match cell {
            DayCell::Remote => &self.remote_marker,
            DayCell::LocationA => &self.location_a,
            DayCell::LocationB => &self.location_b,
            DayCell::Unassigned => "",
        }
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::english()
    }
}

/// Built-in table layouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPreset {
    #[default]
    English,
    Korean,
}

impl LayoutPreset {
    pub fn layout(self) -> TableLayout {
        match self {
            LayoutPreset::English => TableLayout::english(),
            LayoutPreset::Korean => TableLayout::korean(),
        }
    }
}

impl FromStr for LayoutPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(LayoutPreset::English),
            "korean" | "ko" => Ok(LayoutPreset::Korean),
            other => Err(format!(
                "unknown layout '{}', expected 'english' or 'korean'",
                other
            )),
        }
    }
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutPreset::English => f.write_str("english"),
            LayoutPreset::Korean => f.write_str("korean"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_markers_follow_layout() {
        let layout = TableLayout::korean();
        assert_eq!(layout.parse_cell(" 재택 "), DayCell::Remote);
        assert_eq!(layout.parse_cell("잠실"), DayCell::LocationB);
        assert_eq!(layout.parse_cell("x"), DayCell::Unassigned);
        assert_eq!(layout.parse_cell("remote"), DayCell::Unassigned);
        assert_eq!(layout.format_cell(DayCell::LocationA), "문정");
        assert_eq!(layout.format_cell(DayCell::Unassigned), "");
    }

    #[test]
    fn test_layout_preset_parsing() {
        assert_eq!("Korean".parse::<LayoutPreset>(), Ok(LayoutPreset::Korean));
        assert_eq!("en".parse::<LayoutPreset>(), Ok(LayoutPreset::English));
        assert!("klingon".parse::<LayoutPreset>().is_err());
        assert_eq!(LayoutPreset::Korean.layout().sheet_name, "자동배정결과");
    }
}
