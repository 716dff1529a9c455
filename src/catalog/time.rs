//! Days, clock times and time slots.

use std::fmt;

use crate::error::CatalogError;

use super::types::SlotId;

/// Teaching day of the week.
///
/// Declaration order is calendar order, which is also the order used when
/// sorting slots "by day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday through Saturday, the days covered by [`TimeSlot::default_week`].
    pub const TEACHING_DAYS: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];
}

/// Wall-clock time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockTime(u16);

impl ClockTime {
    /// Creates a time from hour and minute. Values wrap into a single day.
    pub const fn hm(hour: u8, minute: u8) -> Self {
        Self(((hour as u16 % 24) * 60 + minute as u16 % 60) % (24 * 60))
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub const fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A bookable period on one day.
///
/// Invariant: `start < end`, enforced by [`TimeSlot::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSlot {
    pub id: SlotId,
    pub day: Weekday,
    pub start: ClockTime,
    pub end: ClockTime,
    /// Break slots (lunch) are never offered to the optimizer.
    pub is_break: bool,
}

impl TimeSlot {
    /// Creates a slot, rejecting empty or inverted intervals.
    pub fn new(
        id: SlotId,
        day: Weekday,
        start: ClockTime,
        end: ClockTime,
    ) -> Result<Self, CatalogError> {
        let slot = Self {
            id,
            day,
            start,
            end,
            is_break: false,
        };
        slot.check()?;
        Ok(slot)
    }

    /// Marks the slot as a break.
    pub fn as_break(mut self) -> Self {
        self.is_break = true;
        self
    }

    pub(crate) fn check(&self) -> Result<(), CatalogError> {
        if self.start >= self.end {
            return Err(CatalogError::InvertedTimeSlot {
                slot: self.id.0,
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }

    /// Hourly slots from 09:00 to 17:00, Monday to Saturday.
    ///
    /// The 13:00-14:00 slot of each day is flagged as a break. Ids are
    /// assigned sequentially from 1 in (day, start) order.
    pub fn default_week() -> Vec<TimeSlot> {
        let mut slots = Vec::with_capacity(Weekday::TEACHING_DAYS.len() * 8);
        let mut next_id = 1;
        for day in Weekday::TEACHING_DAYS {
            for hour in 9..17u8 {
                let slot = TimeSlot {
                    id: SlotId(next_id),
                    day,
                    start: ClockTime::hm(hour, 0),
                    end: ClockTime::hm(hour + 1, 0),
                    is_break: hour == 13,
                };
                slots.push(slot);
                next_id += 1;
            }
        }
        slots
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}-{}", self.day, self.start, self.end)
    }
}
