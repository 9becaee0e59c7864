//! Collapses 3-hour forecast samples into calendar-day summaries.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::model::{DaySummary, ForecastSample};

/// Maximum number of days kept in a forecast.
pub const MAX_DAYS: usize = 5;

/// Group samples by the calendar date of their (offset-local) timestamp.
///
/// Icon and description come from the first sample seen for a day; min/max
/// span every sample of that day. Days come back in ascending order and only
/// the earliest [`MAX_DAYS`] are kept, so a partial first day counts.
pub fn aggregate(samples: &[ForecastSample]) -> Vec<DaySummary> {
    let mut days: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();

    for sample in samples {
        let date = sample.time.date_naive();
        days.entry(date)
            .and_modify(|day| {
                day.min_temp = day.min_temp.min(sample.temperature);
                day.max_temp = day.max_temp.max(sample.temperature);
            })
            .or_insert_with(|| DaySummary {
                date,
                min_temp: sample.temperature,
                max_temp: sample.temperature,
                icon: sample.icon.clone(),
                description: sample.description.clone(),
            });
    }

    days.into_values().take(MAX_DAYS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(offset_secs: i32, y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_secs)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    fn sample(time: DateTime<FixedOffset>, temperature: f64, icon: &str) -> ForecastSample {
        ForecastSample {
            time,
            temperature,
            icon: icon.to_string(),
            description: format!("desc {icon}"),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_input_gives_no_days() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn groups_two_days_with_min_and_max() {
        let samples = vec![
            sample(at(0, 2026, 10, 16, 9), 10.0, "01d"),
            sample(at(0, 2026, 10, 16, 15), 20.0, "02d"),
            sample(at(0, 2026, 10, 17, 9), 5.0, "10d"),
        ];

        let days = aggregate(&samples);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(2026, 10, 16));
        assert_eq!((days[0].min_temp, days[0].max_temp), (10.0, 20.0));
        assert_eq!(days[1].date, date(2026, 10, 17));
        assert_eq!((days[1].min_temp, days[1].max_temp), (5.0, 5.0));
    }

    #[test]
    fn icon_comes_from_first_sample_in_input_order() {
        let samples = vec![
            sample(at(0, 2026, 10, 16, 21), 12.0, "10n"),
            sample(at(0, 2026, 10, 16, 12), 18.0, "01d"),
        ];

        let days = aggregate(&samples);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].icon, "10n");
        assert_eq!(days[0].description, "desc 10n");
    }

    #[test]
    fn unordered_input_comes_back_sorted() {
        let samples = vec![
            sample(at(0, 2026, 10, 18, 0), 1.0, "01d"),
            sample(at(0, 2026, 10, 16, 0), 2.0, "01d"),
            sample(at(0, 2026, 10, 17, 0), 3.0, "01d"),
        ];

        let dates: Vec<_> = aggregate(&samples).into_iter().map(|d| d.date).collect();

        assert_eq!(dates, vec![date(2026, 10, 16), date(2026, 10, 17), date(2026, 10, 18)]);
    }

    #[test]
    fn keeps_only_the_earliest_five_days() {
        // 40 samples, 3 hours apart, starting mid-afternoon: six distinct days.
        let start = at(0, 2026, 10, 16, 15);
        let samples: Vec<_> = (0..40)
            .map(|i| sample(start + chrono::Duration::hours(3 * i), i as f64, "03d"))
            .collect();

        let days = aggregate(&samples);

        assert_eq!(days.len(), MAX_DAYS);
        assert_eq!(days[0].date, date(2026, 10, 16));
        assert_eq!(days[4].date, date(2026, 10, 20));
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn every_sample_is_bounded_by_its_day() {
        let start = at(3600, 2026, 10, 16, 0);
        let temps = [3.5, -1.0, 7.25, 12.0, 0.0, 9.5, 4.0, 11.0, -3.0, 6.0];
        let samples: Vec<_> = temps
            .iter()
            .enumerate()
            .map(|(i, t)| sample(start + chrono::Duration::hours(5 * i as i64), *t, "04d"))
            .collect();

        let days = aggregate(&samples);

        for s in &samples {
            let day = days
                .iter()
                .find(|d| d.date == s.time.date_naive())
                .expect("day for sample");
            assert!(day.min_temp <= s.temperature && s.temperature <= day.max_temp);
        }
    }

    #[test]
    fn calendar_day_follows_the_sample_offset() {
        // 23:00 UTC is already the next day at UTC+2.
        let plus_two = 7200;
        let samples = vec![
            sample(at(plus_two, 2026, 10, 17, 1), 8.0, "01n"),
            sample(at(plus_two, 2026, 10, 16, 22), 9.0, "01n"),
        ];

        let days = aggregate(&samples);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(2026, 10, 16));
        assert_eq!(days[1].date, date(2026, 10, 17));
    }
}
