use serde::{Deserialize, Serialize};

/// Number of planned day slots (two cycles of five weekdays).
pub const DAY_COUNT: usize = 10;

/// Fewest remote days an employee is planned for.
pub const MIN_REMOTE_DAYS: u32 = 3;

/// Most remote days an employee is planned for.
pub const MAX_REMOTE_DAYS: u32 = 4;

/// A planned weekday in the first or the next cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    NextMon,
    NextTue,
    NextWed,
    NextThu,
    NextFri,
}

impl Day {
    /// Every slot in planning order: cycle one Mon..Fri, then cycle two Mon..Fri.
    pub const ALL: [Day; DAY_COUNT] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::NextMon,
        Day::NextTue,
        Day::NextWed,
        Day::NextThu,
        Day::NextFri,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_next_cycle(self) -> bool {
        self.index() >= DAY_COUNT / 2
    }
}

/// One of the two office sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    LocationA,
    LocationB,
}

impl Location {
    pub fn other(self) -> Self {
        match self {
            Location::LocationA => Location::LocationB,
            Location::LocationB => Location::LocationA,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Location::LocationA => 0,
            Location::LocationB => 1,
        }
    }
}

/// State of a single day cell on an employee row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCell {
    /// On-site, but no seat assigned (yet, or because both sites were full)
    #[default]
    Unassigned,
    Remote,
    LocationA,
    LocationB,
}

impl DayCell {
    pub fn is_remote(self) -> bool {
        self == DayCell::Remote
    }

    /// The site this cell is seated at, if any.
    pub fn location(self) -> Option<Location> {
        match self {
            DayCell::LocationA => Some(Location::LocationA),
            DayCell::LocationB => Some(Location::LocationB),
            DayCell::Unassigned | DayCell::Remote => None,
        }
    }
}

impl From<Location> for DayCell {
    fn from(location: Location) -> Self {
        match location {
            Location::LocationA => DayCell::LocationA,
            Location::LocationB => DayCell::LocationB,
        }
    }
}

/// One employee row of the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub department: String,
    pub employee: String,
    /// Relative preference for location A
    #[serde(default)]
    pub location_a_weight: u32,
    /// Relative preference for location B
    #[serde(default)]
    pub location_b_weight: u32,
    /// Weight cells as they appeared in the input table, echoed back unchanged on output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_text: Option<[String; 2]>,
    #[serde(default)]
    pub days: [DayCell; DAY_COUNT],
    /// Values of any further input columns, aligned with `extra_columns`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl Employee {
    pub fn new(department: impl Into<String>, employee: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            employee: employee.into(),
            location_a_weight: 0,
            location_b_weight: 0,
            weight_text: None,
            days: [DayCell::Unassigned; DAY_COUNT],
            extra: Vec::new(),
        }
    }

    pub fn with_weights(mut self, location_a: u32, location_b: u32) -> Self {
        self.location_a_weight = location_a;
        self.location_b_weight = location_b;
        self
    }

    pub fn cell(&self, day: Day) -> DayCell {
        self.days[day.index()]
    }
}

/// Daily seat ceilings per location, shared by all departments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityConfig {
    #[serde(default = "default_location_a_capacity")]
    pub location_a: u32,
    #[serde(default = "default_location_b_capacity")]
    pub location_b: u32,
}

fn default_location_a_capacity() -> u32 {
    14
}

fn default_location_b_capacity() -> u32 {
    30
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            location_a: default_location_a_capacity(),
            location_b: default_location_b_capacity(),
        }
    }
}

/// Accepted share of a department working remotely on any day, in whole percent.
/// A headcount `n` of `P` fits when `min_percent <= n/P*100 < max_percent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioBand {
    #[serde(default = "default_min_percent")]
    pub min_percent: u32,
    #[serde(default = "default_max_percent")]
    pub max_percent: u32,
    /// Percentage aimed for when no headcount fits the band
    #[serde(default = "default_target_percent")]
    pub target_percent: u32,
}

fn default_min_percent() -> u32 {
    32
}

fn default_max_percent() -> u32 {
    40
}

fn default_target_percent() -> u32 {
    36
}

impl Default for RatioBand {
    fn default() -> Self {
        Self {
            min_percent: default_min_percent(),
            max_percent: default_max_percent(),
            target_percent: default_target_percent(),
        }
    }
}

/// Tunables for a planning run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub capacity: CapacityConfig,
    #[serde(default)]
    pub remote_ratio: RatioBand,
    /// Fixes the random source; a fresh seed is drawn when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Input: the roster to plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub employees: Vec<Employee>,
    /// Names of the pass-through columns carried in `Employee::extra`
    #[serde(default)]
    pub extra_columns: Vec<String>,
    #[serde(default)]
    pub config: PlannerConfig,
}

/// Per-employee day counts over the whole window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotals {
    pub location_a: u32,
    pub location_b: u32,
    pub remote: u32,
    pub total: u32,
}

/// Employee row after planning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedEmployee {
    #[serde(flatten)]
    pub employee: Employee,
    pub totals: EmployeeTotals,
}

/// Quota decided for one department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentPlan {
    pub department: String,
    pub headcount: usize,
    pub remote_per_day: usize,
    pub remote_percent: f64,
    /// Remote-day goal per member, in roster order
    pub remote_goals: Vec<u32>,
    /// True when no headcount fitted the ratio band and the closest one was used
    pub fallback: bool,
}

/// Population-wide counts for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotals {
    pub day: Day,
    pub location_a: u32,
    pub location_b: u32,
    pub remote: u32,
    pub total: u32,
}

/// Output: what the planner returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResult {
    /// Planned rows, grouped by department
    pub employees: Vec<AssignedEmployee>,
    #[serde(default)]
    pub extra_columns: Vec<String>,
    pub departments: Vec<DepartmentPlan>,
    pub daily: Vec<DayTotals>,
    /// On-site employee-days left without a seat because both sites were full
    pub unseated_days: u32,
    /// Seed the run was drawn from, when it was seeded by the planner
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
}

/// Error type for planning and table handling
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::XlsxError),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
