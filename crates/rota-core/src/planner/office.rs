use super::CapacityLedger;
use crate::types::{Day, DayCell, Employee, Location};
use rand::seq::SliceRandom;
use rand::Rng;
use std::iter;
use tracing::debug;

/// Splits `total_work` on-site days between the two locations in proportion to
/// the weights. With no preference at all every day goes to location A.
pub(super) fn split_work_days(total_work: usize, weight_a: u32, weight_b: u32) -> (usize, usize) {
    let weight_total = u64::from(weight_a) + u64::from(weight_b);
    if weight_total == 0 {
        return (total_work, 0);
    }

    let days_a = (total_work as u64 * u64::from(weight_a) / weight_total) as usize;
    (days_a, total_work - days_a)
}

/// Seats every non-remote day of `employee`, drawing on the shared ledger in day order.
/// Returns the number of days left unassigned because both locations were full.
pub(super) fn assign_office_days<R: Rng + ?Sized>(
    employee: &mut Employee,
    ledger: &mut CapacityLedger,
    rng: &mut R,
) -> u32 {
    let work_days: Vec<Day> = Day::ALL
        .into_iter()
        .filter(|&day| !employee.cell(day).is_remote())
        .collect();
    let total_work = work_days.len();
    if total_work == 0 {
        return 0;
    }

    let (days_a, days_b) = split_work_days(
        total_work,
        employee.location_a_weight,
        employee.location_b_weight,
    );

    let mut day_types: Vec<Location> = iter::repeat(Location::LocationA)
        .take(days_a)
        .chain(iter::repeat(Location::LocationB).take(days_b))
        .collect();
    while day_types.len() < total_work {
        day_types.push(if rng.random_bool(0.5) {
            Location::LocationA
        } else {
            Location::LocationB
        });
    }
    day_types.shuffle(rng);

    let mut unseated = 0;
    for (day, preferred) in work_days.into_iter().zip(day_types) {
        employee.days[day.index()] = match ledger.reserve(preferred, day) {
            Some(location) => DayCell::from(location),
            None => {
                debug!(
                    department = %employee.department,
                    employee = %employee.employee,
                    ?day,
                    "both locations are full, leaving day unassigned"
                );
                unseated += 1;
                DayCell::Unassigned
            }
        };
    }
    unseated
}
