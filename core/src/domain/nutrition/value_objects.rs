use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    pub fn day_count(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }

    /// Every day from start to end inclusive, in calendar order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.start;
        (0..self.day_count()).filter_map(move |offset| start.checked_add_days(Days::new(offset)))
    }
}

/// Statistics over a date range; averages cover days-with-data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeStatistics {
    pub days_with_data: u64,
    pub avg_calories: f64,
    pub avg_protein: f64,
    pub avg_fat: f64,
    pub avg_carbs: f64,
    /// Fraction of days-with-data whose calorie total landed within the
    /// tolerance band around the day's target.
    pub goal_achievement_rate: f64,
}

impl IntakeStatistics {
    pub fn zero() -> Self {
        Self {
            days_with_data: 0,
            avg_calories: 0.0,
            avg_protein: 0.0,
            avg_fat: 0.0,
            avg_carbs: 0.0,
            goal_achievement_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Calendar-ordered (date, total) series per nutrient, for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientTrends {
    pub calories: Vec<TrendPoint>,
    pub protein: Vec<TrendPoint>,
    pub fat: Vec<TrendPoint>,
    pub carbs: Vec<TrendPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        );

        let days: Vec<_> = range.days().collect();
        assert_eq!(range.day_count(), 5);
        assert_eq!(days.len(), 5);
        // Leap day included, order preserved.
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn single_day_range_has_one_day() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let range = DateRange::new(day, day);

        assert_eq!(range.day_count(), 1);
        assert_eq!(range.days().collect::<Vec<_>>(), vec![day]);
    }

    #[test]
    fn reversed_bounds_are_normalized() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );

        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(range.day_count(), 5);
    }
}
