//! crates/biblio_core/src/stats.rs
//!
//! Attendance statistics shown on the home and statistics screens.

/// Monthly attendance above this value is highlighted as a busy month.
pub const BUSY_MONTH_THRESHOLD: u32 = 600;

/// One point of an attendance series (an hour slot or a month).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficPoint {
    pub label: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFigures {
    pub annual_entries: u32,
    pub new_titles_per_year: u32,
    pub peak_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceStats {
    /// Average attendance per time slot over a day.
    pub hourly: Vec<TrafficPoint>,
    pub monthly: Vec<TrafficPoint>,
    pub key_figures: KeyFigures,
}

impl AttendanceStats {
    /// The busiest time slot of the day. The earliest slot wins a tie.
    pub fn peak_slot(&self) -> Option<&TrafficPoint> {
        self.hourly
            .iter()
            .fold(None, |best: Option<&TrafficPoint>, point| match best {
                Some(current) if current.value >= point.value => Some(current),
                _ => Some(point),
            })
    }

    /// Months whose attendance is strictly above `threshold`, in calendar order.
    pub fn busy_months(&self, threshold: u32) -> Vec<&TrafficPoint> {
        self.monthly
            .iter()
            .filter(|point| point.value > threshold)
            .collect()
    }
}
