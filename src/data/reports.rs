//! Append-only log of user-captured reading snapshots.
//!
//! Reports are grouped for display into calendar buckets (today, this week,
//! this month, older) relative to the caller's local clock.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::reading::Reading;

/// A snapshot of a reading with an optional note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    pub snapshot: Reading,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Append-only collection of reports in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    reports: Vec<Report>,
    next_seq: u64,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and append a report of `snapshot` captured at `now_ms`.
    ///
    /// Blank notes are stored as absent.
    pub fn record(&mut self, snapshot: Reading, note: Option<String>, now_ms: i64) -> Report {
        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let report = Report {
            id: format!("report-{}-{}", now_ms, self.next_seq),
            timestamp_ms: now_ms,
            snapshot,
            note,
        };
        self.next_seq += 1;

        info!(id = %report.id, has_note = report.note.is_some(), "report recorded");
        self.reports.push(report.clone());
        report
    }

    /// All reports in insertion order.
    pub fn list(&self) -> &[Report] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Calendar bucket a report falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportBucket {
    Today,
    ThisWeek,
    ThisMonth,
    Older,
}

impl ReportBucket {
    /// All buckets in display order.
    pub const ALL: [ReportBucket; 4] = [
        ReportBucket::Today,
        ReportBucket::ThisWeek,
        ReportBucket::ThisMonth,
        ReportBucket::Older,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportBucket::Today => "Today",
            ReportBucket::ThisWeek => "This week",
            ReportBucket::ThisMonth => "This month",
            ReportBucket::Older => "Older",
        }
    }
}

/// Start instants of the report buckets, in ms epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketBoundaries {
    /// Local midnight of the current day.
    pub start_of_today: i64,
    /// Local midnight of the Monday starting the current week.
    pub start_of_week: i64,
    /// Local midnight of the first day of the current month.
    pub start_of_month: i64,
}

impl BucketBoundaries {
    /// Compute the boundaries for `now` in its own time zone.
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
        let first = today.with_day(1).unwrap_or(today);

        Self {
            start_of_today: local_midnight(&tz, today),
            start_of_week: local_midnight(&tz, monday),
            start_of_month: local_midnight(&tz, first),
        }
    }

    /// Bucket for a timestamp; checked today, week, month, then older.
    pub fn bucket_of(&self, timestamp_ms: i64) -> ReportBucket {
        if timestamp_ms >= self.start_of_today {
            ReportBucket::Today
        } else if timestamp_ms >= self.start_of_week {
            ReportBucket::ThisWeek
        } else if timestamp_ms >= self.start_of_month {
            ReportBucket::ThisMonth
        } else {
            ReportBucket::Older
        }
    }
}

/// First instant of `date` in `tz`.
///
/// When a DST jump skips midnight, the first valid instant of the day after
/// the gap is used instead.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + TimeDelta::hours(1))).earliest())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight).timestamp_millis())
}

/// Group reports into every bucket, most recent first within each.
///
/// Buckets are always returned in display order, including empty ones.
pub fn group<'a, Tz: TimeZone>(
    reports: &'a [Report],
    now: &DateTime<Tz>,
) -> Vec<(ReportBucket, Vec<&'a Report>)> {
    let boundaries = BucketBoundaries::at(now);

    // Reverse first so that equal timestamps list the later insert first
    let mut sorted: Vec<&Report> = reports.iter().rev().collect();
    sorted.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));

    let mut groups: Vec<(ReportBucket, Vec<&Report>)> =
        ReportBucket::ALL.iter().map(|&b| (b, Vec::new())).collect();
    for report in sorted {
        let bucket = boundaries.bucket_of(report.timestamp_ms);
        groups[bucket as usize].1.push(report);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDateTime};

    /// Zone at UTC-3 that springs forward to UTC-2 at midnight on
    /// 4 November 2018, so 00:00-00:59 local does not exist that day.
    #[derive(Debug, Clone, Copy)]
    struct MidnightGap;

    impl MidnightGap {
        fn day() -> NaiveDate {
            NaiveDate::from_ymd_opt(2018, 11, 4).unwrap()
        }

        fn before() -> FixedOffset {
            FixedOffset::west_opt(3 * 3600).unwrap()
        }

        fn after() -> FixedOffset {
            FixedOffset::west_opt(2 * 3600).unwrap()
        }
    }

    impl TimeZone for MidnightGap {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            MidnightGap
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = Self::day().and_time(NaiveTime::MIN);
            if *local < gap_start {
                LocalResult::Single(Self::before())
            } else if *local < gap_start + TimeDelta::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::after())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::day().and_hms_opt(3, 0, 0).unwrap() {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        tz().with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn ms(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
        at(y, mo, d, h, mi).timestamp_millis()
    }

    #[test]
    fn record_without_note_stores_none() {
        let mut log = ReportLog::new();
        let report = log.record(Reading::baseline(1), None, 100);
        assert!(report.note.is_none());
        assert_eq!(report.timestamp_ms, 100);
        assert_eq!(log.list(), &[report]);
    }

    #[test]
    fn record_blank_note_stores_none() {
        let mut log = ReportLog::new();
        assert!(log.record(Reading::baseline(1), Some("   ".into()), 100).note.is_none());
        assert_eq!(
            log.record(Reading::baseline(1), Some(" water change ".into()), 100).note.as_deref(),
            Some("water change")
        );
    }

    #[test]
    fn record_ids_are_unique_within_a_millisecond() {
        let mut log = ReportLog::new();
        let a = log.record(Reading::baseline(1), None, 100);
        let b = log.record(Reading::baseline(1), None, 100);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let mut log = ReportLog::new();
        log.record(Reading::baseline(1), Some("first".into()), 300);
        log.record(Reading::baseline(1), Some("second".into()), 100);
        let notes: Vec<_> = log.list().iter().map(|r| r.note.clone().unwrap()).collect();
        assert_eq!(notes, vec!["first", "second"]);
    }

    #[test]
    fn boundaries_midweek() {
        // Wednesday
        let b = BucketBoundaries::at(&at(2026, 10, 14, 15, 0));
        assert_eq!(b.start_of_today, ms(2026, 10, 14, 0, 0));
        assert_eq!(b.start_of_week, ms(2026, 10, 12, 0, 0));
        assert_eq!(b.start_of_month, ms(2026, 10, 1, 0, 0));

        assert_eq!(b.bucket_of(ms(2026, 10, 14, 9, 0)), ReportBucket::Today);
        assert_eq!(b.bucket_of(ms(2026, 10, 13, 23, 59)), ReportBucket::ThisWeek);
        assert_eq!(b.bucket_of(ms(2026, 10, 12, 0, 0)), ReportBucket::ThisWeek);
        assert_eq!(b.bucket_of(ms(2026, 10, 11, 23, 0)), ReportBucket::ThisMonth);
        assert_eq!(b.bucket_of(ms(2026, 10, 1, 0, 0)), ReportBucket::ThisMonth);
        assert_eq!(b.bucket_of(ms(2026, 9, 30, 23, 59)), ReportBucket::Older);
    }

    #[test]
    fn sunday_belongs_to_week_starting_monday() {
        let b = BucketBoundaries::at(&at(2026, 10, 18, 8, 0));
        assert_eq!(b.start_of_week, ms(2026, 10, 12, 0, 0));
    }

    #[test]
    fn week_spanning_year_boundary() {
        // Friday 1 January; the week began on Monday 28 December
        let now = at(2027, 1, 1, 10, 0);
        let b = BucketBoundaries::at(&now);
        assert_eq!(b.start_of_week, ms(2026, 12, 28, 0, 0));
        assert_eq!(b.start_of_month, ms(2027, 1, 1, 0, 0));

        assert_eq!(b.bucket_of(ms(2026, 12, 30, 12, 0)), ReportBucket::ThisWeek);
        assert_eq!(b.bucket_of(ms(2026, 12, 27, 12, 0)), ReportBucket::Older);
    }

    #[test]
    fn skipped_midnight_starts_the_day_after_the_gap() {
        let day = MidnightGap::day();
        let transition = day.and_hms_opt(3, 0, 0).unwrap().and_utc().timestamp_millis();
        assert_eq!(local_midnight(&MidnightGap, day), transition);

        // 15:00 UTC is 13:00 local on the transition day, a Sunday
        let now = MidnightGap.from_utc_datetime(&day.and_hms_opt(15, 0, 0).unwrap());
        let b = BucketBoundaries::at(&now);
        assert_eq!(b.start_of_today, transition);

        // Monday 29 October was still on UTC-3
        let monday = NaiveDate::from_ymd_opt(2018, 10, 29).unwrap();
        assert_eq!(
            b.start_of_week,
            monday.and_hms_opt(3, 0, 0).unwrap().and_utc().timestamp_millis()
        );

        assert_eq!(b.bucket_of(transition), ReportBucket::Today);
        assert_eq!(b.bucket_of(transition - 1), ReportBucket::ThisWeek);
    }

    #[test]
    fn boundaries_do_not_depend_on_prior_calls() {
        let now = at(2026, 3, 4, 12, 0);
        let first = BucketBoundaries::at(&now);
        let second = BucketBoundaries::at(&now);
        assert_eq!(first, second);
        assert_eq!(first.start_of_month, ms(2026, 3, 1, 0, 0));
        assert_eq!(first.start_of_week, ms(2026, 3, 2, 0, 0));
    }

    #[test]
    fn group_partitions_every_report_exactly_once() {
        let now = at(2026, 10, 14, 15, 0);
        let mut log = ReportLog::new();
        let stamps = [
            ms(2026, 10, 14, 9, 0),
            ms(2026, 10, 14, 12, 0),
            ms(2026, 10, 13, 8, 0),
            ms(2026, 10, 5, 8, 0),
            ms(2026, 8, 1, 8, 0),
            ms(2025, 12, 31, 8, 0),
        ];
        for ts in stamps {
            log.record(Reading::baseline(ts), None, ts);
        }

        let groups = group(log.list(), &now);
        let buckets: Vec<ReportBucket> = groups.iter().map(|(b, _)| *b).collect();
        assert_eq!(buckets, ReportBucket::ALL.to_vec());

        let total: usize = groups.iter().map(|(_, r)| r.len()).sum();
        assert_eq!(total, stamps.len());

        let today: Vec<i64> = groups[0].1.iter().map(|r| r.timestamp_ms).collect();
        assert_eq!(today, vec![stamps[1], stamps[0]]);
        assert_eq!(groups[1].1.len(), 1);
        assert_eq!(groups[2].1.len(), 1);
        let older: Vec<i64> = groups[3].1.iter().map(|r| r.timestamp_ms).collect();
        assert_eq!(older, vec![stamps[4], stamps[5]]);
    }

    #[test]
    fn group_ties_list_latest_insert_first() {
        let now = at(2026, 10, 14, 15, 0);
        let ts = ms(2026, 10, 14, 9, 0);
        let mut log = ReportLog::new();
        log.record(Reading::baseline(ts), Some("a".into()), ts);
        log.record(Reading::baseline(ts), Some("b".into()), ts);

        let groups = group(log.list(), &now);
        let notes: Vec<_> = groups[0].1.iter().map(|r| r.note.as_deref().unwrap()).collect();
        assert_eq!(notes, vec!["b", "a"]);
    }

    #[test]
    fn group_of_empty_log_has_empty_buckets() {
        let groups = group(&[], &at(2026, 10, 14, 15, 0));
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|(_, r)| r.is_empty()));
    }
}
