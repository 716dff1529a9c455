//! Consecutive-slot discovery for two-slot sessions.

use std::collections::BTreeMap;

use crate::catalog::{SlotId, TimeSlot, Weekday};

/// Hours a two-slot session may not straddle.
///
/// A pair `(a, b)` is rejected when `a` starts at or before `start_hour`
/// and `b` ends at or after `end_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LunchWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Default for LunchWindow {
    fn default() -> Self {
        Self {
            start_hour: 13,
            end_hour: 14,
        }
    }
}

impl LunchWindow {
    pub fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Returns `true` if a session running from `first` through `second`
    /// would straddle the window.
    pub fn straddles(&self, first: &TimeSlot, second: &TimeSlot) -> bool {
        first.start.hour() <= self.start_hour && second.end.hour() >= self.end_hour
    }
}

/// Finds every back-to-back pair of non-break slots on the same day.
///
/// Slots are grouped by day and sorted by start time; each adjacent pair
/// where the first ends exactly when the second starts is kept unless it
/// straddles `lunch`. Output is ordered by day, then start time.
pub fn find_consecutive_slots(slots: &[TimeSlot], lunch: LunchWindow) -> Vec<(SlotId, SlotId)> {
    let mut by_day: BTreeMap<Weekday, Vec<&TimeSlot>> = BTreeMap::new();
    for slot in slots.iter().filter(|s| !s.is_break) {
        by_day.entry(slot.day).or_default().push(slot);
    }

    let mut pairs = Vec::new();
    for day_slots in by_day.values_mut() {
        day_slots.sort_by_key(|s| s.start);
        for pair in day_slots.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.end == b.start && !lunch.straddles(a, b) {
                pairs.push((a.id, b.id));
            }
        }
    }
    pairs
}
