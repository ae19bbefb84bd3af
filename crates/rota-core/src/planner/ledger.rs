use crate::types::{CapacityConfig, Day, Location, DAY_COUNT};
use serde::{Deserialize, Serialize};

/// Seats handed out per location and day, across every department of a run.
/// A count never passes its location's ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityLedger {
    limits: [u32; 2],
    counts: [[u32; DAY_COUNT]; 2],
}

impl CapacityLedger {
    pub fn new(capacity: &CapacityConfig) -> Self {
        Self {
            limits: [capacity.location_a, capacity.location_b],
            counts: [[0; DAY_COUNT]; 2],
        }
    }

    pub fn limit(&self, location: Location) -> u32 {
        self.limits[location.index()]
    }

    pub fn count(&self, location: Location, day: Day) -> u32 {
        self.counts[location.index()][day.index()]
    }

    pub fn has_room(&self, location: Location, day: Day) -> bool {
        self.count(location, day) < self.limit(location)
    }

    /// Takes a seat at `preferred`, or at the other location when `preferred` is full.
    /// Returns the location that was booked, or `None` when both are full.
    pub fn reserve(&mut self, preferred: Location, day: Day) -> Option<Location> {
        let location = [preferred, preferred.other()]
            .into_iter()
            .find(|&location| self.has_room(location, day))?;
        self.counts[location.index()][day.index()] += 1;
        Some(location)
    }
}
