use crate::types::{RatioBand, DAY_COUNT, MAX_REMOTE_DAYS, MIN_REMOTE_DAYS};
use rand::seq::SliceRandom;
use rand::Rng;

/// Daily remote quota and per-member remote-day goals for one department
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaPlan {
    pub remote_per_day: usize,
    /// Remote days each member should receive, in roster order
    pub remote_goals: Vec<u32>,
    /// The ratio band could not be met and the closest headcount was used
    pub fallback: bool,
}

impl QuotaPlan {
    pub fn remote_percent(&self, headcount: usize) -> f64 {
        percent_of(self.remote_per_day, headcount)
    }
}

pub(super) fn percent_of(count: usize, headcount: usize) -> f64 {
    if headcount == 0 {
        return 0.0;
    }
    count as f64 / headcount as f64 * 100.0
}

/// Plans the daily remote headcount and the per-member goals for a department.
pub(super) fn plan_quota<R: Rng + ?Sized>(
    headcount: usize,
    band: &RatioBand,
    rng: &mut R,
) -> QuotaPlan {
    let (remote_per_day, fallback) = remote_headcount(headcount, band);
    QuotaPlan {
        remote_per_day,
        remote_goals: remote_goals(headcount, remote_per_day, rng),
        fallback,
    }
}

/// Smallest headcount whose share of the department lies in the band.
/// Falls back to the headcount closest to the target share (first wins on ties).
pub(super) fn remote_headcount(headcount: usize, band: &RatioBand) -> (usize, bool) {
    if headcount == 0 {
        return (0, false);
    }

    // Compare n/P*100 against whole percentages by cross-multiplying.
    let people = headcount as u64;
    let min = u64::from(band.min_percent);
    let max = u64::from(band.max_percent);
    let target = u64::from(band.target_percent);

    let min_remote = (people * min).div_ceil(100);
    let in_band = |n: &u64| n * 100 >= min * people && n * 100 < max * people;

    if let Some(n) = (min_remote..=people).find(in_band) {
        return (n as usize, false);
    }

    let closest = (1..=people)
        .min_by_key(|n| (n * 100).abs_diff(target * people))
        .unwrap_or(1);
    (closest as usize, true)
}

/// Spreads `remote_per_day * DAY_COUNT` remote days over the members, clamped to
/// between `MIN_REMOTE_DAYS` and `MAX_REMOTE_DAYS` per member.
pub(super) fn remote_goals<R: Rng + ?Sized>(
    headcount: usize,
    remote_per_day: usize,
    rng: &mut R,
) -> Vec<u32> {
    if headcount == 0 {
        return Vec::new();
    }

    let total_remote = remote_per_day * DAY_COUNT;
    let (base, extra) = split_goals(total_remote / headcount, total_remote % headcount, headcount);

    let mut indices: Vec<usize> = (0..headcount).collect();
    indices.shuffle(rng);

    let mut goals = vec![base; headcount];
    for &idx in indices.iter().take(extra) {
        goals[idx] += 1;
    }
    goals
}

/// Clamps the even split into the allowed goal range. When the split lands above
/// the upper bound with a remainder, the minority/majority sides are swapped, which
/// does not keep the goal total equal to the quota total.
fn split_goals(base: usize, extra: usize, headcount: usize) -> (u32, usize) {
    let min = MIN_REMOTE_DAYS as usize;
    let max = MAX_REMOTE_DAYS as usize;

    if base < min {
        (MIN_REMOTE_DAYS, 0)
    } else if base > max {
        (MAX_REMOTE_DAYS, 0)
    } else if base == max && extra > 0 {
        (MIN_REMOTE_DAYS, headcount - extra)
    } else {
        (base as u32, extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_goals_branches() {
        assert_eq!(split_goals(2, 5, 10), (3, 0));
        assert_eq!(split_goals(3, 7, 10), (3, 7));
        assert_eq!(split_goals(4, 0, 10), (4, 0));
        assert_eq!(split_goals(4, 4, 10), (3, 6));
        assert_eq!(split_goals(5, 1, 10), (4, 0));
    }

    #[test]
    fn test_percent_of_empty_department() {
        assert_eq!(percent_of(3, 0), 0.0);
        assert_eq!(percent_of(4, 10), 40.0);
    }
}
