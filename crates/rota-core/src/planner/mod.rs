use crate::types::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

mod ledger;
mod office;
mod quota;
mod remote;
mod summary;

pub use ledger::CapacityLedger;
pub use quota::QuotaPlan;
pub use remote::RemoteAllocation;
pub use summary::format_percent;

/// Plans remote days and office seats for a roster, one department at a time.
pub struct Planner {
    request: AssignmentRequest,
}

impl Planner {
    /// Validates the request and builds a new planner instance.
    pub fn new(request: AssignmentRequest) -> Result<Self> {
        if request.employees.is_empty() {
            return Err(PlannerError::InvalidInput(
                "At least one employee must be provided".to_string(),
            ));
        }

        let band = &request.config.remote_ratio;
        if band.min_percent == 0 || band.min_percent >= band.max_percent {
            return Err(PlannerError::InvalidInput(format!(
                "Remote ratio band {}-{}% is empty",
                band.min_percent, band.max_percent
            )));
        }
        if band.max_percent > 100 || band.target_percent > 100 {
            return Err(PlannerError::InvalidInput(
                "Remote ratio percentages cannot exceed 100".to_string(),
            ));
        }

        let extra_width = request.extra_columns.len();
        for employee in &request.employees {
            if employee.extra.len() > extra_width {
                return Err(PlannerError::InvalidInput(format!(
                    "Employee '{}' carries {} extra values but only {} extra columns are declared",
                    employee.employee,
                    employee.extra.len(),
                    extra_width
                )));
            }
        }

        Ok(Self { request })
    }

    /// Runs the full planning flow from the configured seed, or a fresh one.
    pub fn plan(&self) -> Result<AssignmentResult> {
        let seed = self
            .request
            .config
            .seed
            .unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut result = self.plan_with_rng(&mut rng)?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Runs the full planning flow drawing every random choice from `rng`.
    pub fn plan_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<AssignmentResult> {
        let config = &self.request.config;
        let mut ledger = CapacityLedger::new(&config.capacity);
        let mut employees = Vec::with_capacity(self.request.employees.len());
        let mut departments = Vec::new();
        let mut warnings = Vec::new();
        let mut unseated_days = 0;

        for (department, members) in self.group_by_department() {
            let headcount = members.len();
            let quota = quota::plan_quota(headcount, &config.remote_ratio, rng);
            let remote_percent = quota.remote_percent(headcount);

            if quota.fallback {
                warn!(
                    department,
                    headcount,
                    remote_per_day = quota.remote_per_day,
                    "no whole headcount fits the remote ratio band, using closest"
                );
                warnings.push(fallback_warning(
                    department,
                    headcount,
                    quota.remote_per_day,
                    &config.remote_ratio,
                ));
            }

            let allocation =
                remote::allocate_remote_days(&quota.remote_goals, quota.remote_per_day, rng);

            for (row, member) in members.into_iter().enumerate() {
                let mut employee = member.clone();
                employee.extra.resize(self.request.extra_columns.len(), String::new());

                if employee.days.iter().any(|cell| cell.is_remote()) {
                    debug!(
                        department,
                        employee = %employee.employee,
                        "discarding remote markers present in the input"
                    );
                }
                for day in Day::ALL {
                    employee.days[day.index()] = if allocation.is_remote(row, day) {
                        DayCell::Remote
                    } else {
                        DayCell::Unassigned
                    };
                }

                unseated_days += office::assign_office_days(&mut employee, &mut ledger, rng);

                let totals = summary::employee_totals(&employee.days);
                employees.push(AssignedEmployee { employee, totals });
            }

            departments.push(DepartmentPlan {
                department: department.to_string(),
                headcount,
                remote_per_day: quota.remote_per_day,
                remote_percent,
                remote_goals: quota.remote_goals,
                fallback: quota.fallback,
            });
        }

        let daily = summary::daily_totals(&employees);

        info!(
            employees = employees.len(),
            departments = departments.len(),
            unseated_days,
            warnings = warnings.len(),
            "planning complete"
        );

        Ok(AssignmentResult {
            employees,
            extra_columns: self.request.extra_columns.clone(),
            departments,
            daily,
            unseated_days,
            seed: None,
            warnings,
        })
    }

    /// Groups employees by department in ascending department order,
    /// keeping roster order within a department. Rows without a department are skipped.
    fn group_by_department(&self) -> BTreeMap<&str, Vec<&Employee>> {
        let mut groups: BTreeMap<&str, Vec<&Employee>> = BTreeMap::new();
        for employee in &self.request.employees {
            let department = employee.department.trim();
            if department.is_empty() {
                debug!(employee = %employee.employee, "skipping row without a department");
                continue;
            }
            groups.entry(department).or_default().push(employee);
        }
        groups
    }
}

fn fallback_warning(
    department: &str,
    headcount: usize,
    remote_per_day: usize,
    band: &RatioBand,
) -> String {
    format!(
        "Department [{}] has {} employees, so no whole headcount fits the {}-{}% remote band. Assigned {} ({:.1}%).",
        department,
        headcount,
        band.min_percent,
        band.max_percent,
        remote_per_day,
        quota::percent_of(remote_per_day, headcount)
    )
}
