use crate::types::{Day, DAY_COUNT};
use rand::seq::{index, SliceRandom};
use rand::Rng;

/// Remote days chosen for a department, one row per member in roster order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAllocation {
    days: Vec<[bool; DAY_COUNT]>,
    /// Quota still open per day after selection; zero whenever the department
    /// had at least `remote_per_day` members
    pub quota_left: [usize; DAY_COUNT],
}

impl RemoteAllocation {
    pub fn is_remote(&self, member: usize, day: Day) -> bool {
        self.days
            .get(member)
            .is_some_and(|row| row[day.index()])
    }

    pub fn remote_days(&self, member: usize) -> usize {
        self.days
            .get(member)
            .map_or(0, |row| row.iter().filter(|&&remote| remote).count())
    }

    pub fn remote_on(&self, day: Day) -> usize {
        self.days.iter().filter(|row| row[day.index()]).count()
    }

    pub fn members(&self) -> usize {
        self.days.len()
    }
}

/// Walks the days in order and picks `remote_per_day` members for each, preferring
/// members furthest from their goal. When too few members still have days left,
/// members whose goal is already met are drawn at random to fill the quota.
pub(super) fn allocate_remote_days<R: Rng + ?Sized>(
    goals: &[u32],
    remote_per_day: usize,
    rng: &mut R,
) -> RemoteAllocation {
    let headcount = goals.len();
    let mut person_left = goals.to_vec();
    let mut quota_left = [remote_per_day; DAY_COUNT];
    let mut days = vec![[false; DAY_COUNT]; headcount];

    for day in 0..DAY_COUNT {
        let mut candidates: Vec<usize> = (0..headcount).filter(|&i| person_left[i] > 0).collect();

        if candidates.len() < remote_per_day {
            let satisfied: Vec<usize> = (0..headcount).filter(|&i| person_left[i] == 0).collect();
            let needed = (remote_per_day - candidates.len()).min(satisfied.len());
            candidates.extend(
                index::sample(rng, satisfied.len(), needed)
                    .into_iter()
                    .map(|i| satisfied[i]),
            );
        }

        // Shuffle first so the stable sort breaks ties at random.
        candidates.shuffle(rng);
        candidates.sort_by(|a, b| person_left[*b].cmp(&person_left[*a]));

        for &idx in candidates.iter().take(remote_per_day) {
            days[idx][day] = true;
            if person_left[idx] > 0 {
                person_left[idx] -= 1;
            }
            quota_left[day] -= 1;
        }
    }

    RemoteAllocation { days, quota_left }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_goals_met_exactly_when_they_sum_to_quota() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let goals = [3, 3, 4];
        let allocation = allocate_remote_days(&goals, 1, &mut rng);

        assert_eq!(allocation.members(), 3);
        assert_eq!(allocation.quota_left, [0; DAY_COUNT]);
        for day in Day::ALL {
            assert_eq!(allocation.remote_on(day), 1);
        }
        for (member, &goal) in goals.iter().enumerate() {
            assert_eq!(allocation.remote_days(member), goal as usize);
        }
    }

    #[test]
    fn test_padding_overshoots_satisfied_members() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let allocation = allocate_remote_days(&[4], 1, &mut rng);

        assert_eq!(allocation.remote_days(0), DAY_COUNT);
        assert_eq!(allocation.quota_left, [0; DAY_COUNT]);
    }

    #[test]
    fn test_quota_larger_than_department() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let allocation = allocate_remote_days(&[3], 2, &mut rng);

        assert_eq!(allocation.remote_days(0), DAY_COUNT);
        assert_eq!(allocation.quota_left, [1; DAY_COUNT]);
        assert!(!allocation.is_remote(1, Day::Mon));
    }

    #[test]
    fn test_members_furthest_from_goal_go_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let allocation = allocate_remote_days(&[0, 4, 0], 1, &mut rng);

        for day in &Day::ALL[..4] {
            assert!(allocation.is_remote(1, *day));
        }
    }
}
