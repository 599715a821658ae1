use chrono::{
    DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    Weekday,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Restricted RRULE subset: `FREQ=...;INTERVAL=...;BYDAY=...;BYMONTHDAY=...`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceRule {
    pub freq: Frequency,
    pub interval: u32,
    pub by_day: Vec<Weekday>,
    pub by_month_day: Option<u32>,
}

impl RecurrenceRule {
    /// Parses a rule string. Unknown keys and unknown BYDAY codes are
    /// ignored; a missing or unrecognized FREQ invalidates the whole rule.
    pub fn parse(rule: &str) -> Option<Self> {
        let mut freq = None;
        let mut interval = 1u32;
        let mut by_day = Vec::new();
        let mut by_month_day = None;

        for pair in rule.split(';') {
            let pair = pair.trim();
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key.trim().to_ascii_uppercase().as_str() {
                "FREQ" => {
                    freq = match value.trim().to_ascii_uppercase().as_str() {
                        "DAILY" => Some(Frequency::Daily),
                        "WEEKLY" => Some(Frequency::Weekly),
                        "MONTHLY" => Some(Frequency::Monthly),
                        "YEARLY" => Some(Frequency::Yearly),
                        _ => None,
                    };
                }
                "INTERVAL" => {
                    if let Ok(n) = value.trim().parse::<u32>() {
                        if n >= 1 {
                            interval = n;
                        }
                    }
                }
                "BYDAY" => {
                    by_day = value.split(',').filter_map(weekday_from_code).collect();
                }
                "BYMONTHDAY" => {
                    if let Ok(n) = value.trim().parse::<u32>() {
                        if (1..=31).contains(&n) {
                            by_month_day = Some(n);
                        }
                    }
                }
                _ => {}
            }
        }

        Some(Self {
            freq: freq?,
            interval,
            by_day,
            by_month_day,
        })
    }
}

/// Advances `current` one step according to `rule`, evaluated as a calendar
/// date in `zone`. Returns `None` when the rule is invalid.
///
/// With `keep_time_of_day` the original local time-of-day is reattached to
/// the advanced date; otherwise the result lands on midnight.
pub fn next_occurrence<Tz: TimeZone>(
    current: DateTime<Utc>,
    rule: &str,
    zone: &Tz,
    keep_time_of_day: bool,
) -> Option<DateTime<Utc>> {
    let rule = RecurrenceRule::parse(rule)?;
    let local = current.with_timezone(zone);
    let date = local.date_naive();
    let time = local.time();

    let next_date = match rule.freq {
        Frequency::Daily => date + Duration::days(rule.interval as i64),
        Frequency::Weekly => {
            if rule.by_day.is_empty() {
                date + Duration::weeks(rule.interval as i64)
            } else {
                // Earliest date strictly after `date` landing on any listed weekday.
                rule.by_day
                    .iter()
                    .map(|wd| next_weekday_after(date, *wd))
                    .min()?
            }
        }
        Frequency::Monthly => {
            let advanced = date.checked_add_months(Months::new(rule.interval))?;
            match rule.by_month_day {
                Some(dom) => {
                    let clamped = dom.min(days_in_month(advanced.year(), advanced.month())?);
                    advanced.with_day(clamped)?
                }
                None => advanced,
            }
        }
        Frequency::Yearly => date.checked_add_months(Months::new(rule.interval.checked_mul(12)?))?,
    };

    let next_time = if keep_time_of_day { time } else { NaiveTime::MIN };
    to_utc(zone, next_date.and_time(next_time))
}

/// Resolves a naive local datetime in `zone` to UTC. A time falling into a
/// DST gap is shifted forward one hour.
pub(crate) fn to_utc<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    zone.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            zone.from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
}

fn next_weekday_after(date: NaiveDate, target: Weekday) -> NaiveDate {
    let mut days = (target.num_days_from_monday() as i64
        - date.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    if days == 0 {
        days = 7;
    }
    date + Duration::days(days)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(next) => Some((next - first).num_days() as u32),
        // December of chrono's maximum year still has 31 days.
        None => Some(31),
    }
}

fn weekday_from_code(code: &str) -> Option<Weekday> {
    match code.trim().to_ascii_uppercase().as_str() {
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        "SU" => Some(Weekday::Sun),
        _ => None,
    }
}
