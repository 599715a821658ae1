use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::task::{Priority, ReminderSpec, Status, Task};
use crate::recurrence::to_utc;

/// Hour of day used when a date phrase carries no explicit time token.
pub const DEFAULT_HOUR: u32 = 9;

const WEEKDAY_NAMES: &str =
    "monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tue|wed|thu|fri|sat|sun";

/// Date-phrase alternation shared by the deadline and remind-me clauses.
/// Every alternative ends on a word boundary so a weekday abbreviation never
/// matches the start of a longer word ("by satellite" is not a deadline).
const DATE_PHRASE: &str = r"today\b|tomorrow\b|next\s+week\b|in\s+\d+\s+days?\b|monday\b|tuesday\b|wednesday\b|thursday\b|friday\b|saturday\b|sunday\b|mon\b|tue\b|wed\b|thu\b|fri\b|sat\b|sun\b|\d{4}-\d{1,2}-\d{1,2}\b|\d{1,2}/\d{1,2}(?:/\d{2,4})?\b";

static RE_PROJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"#([A-Za-z0-9 _-]+)").unwrap());
static RE_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)/([A-Za-z][A-Za-z0-9_-]*)").unwrap());
static RE_PRIORITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bp[1-4]\b").unwrap());

static RE_TODAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btoday\b").unwrap());
static RE_TOMORROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btomorrow\b").unwrap());
static RE_NEXT_WEEK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bnext\s+week\b").unwrap());
static RE_IN_DAYS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bin\s+(\d+)\s+days?\b").unwrap());
static RE_WEEKDAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b({WEEKDAY_NAMES})\b")).unwrap());
static RE_ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());
static RE_SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").unwrap());
static RE_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b").unwrap());

static RE_DEADLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:deadline|by)\s+((?:{DATE_PHRASE})(?:\s+\d{{1,2}}(?::\d{{2}})?\s*(?:am|pm))?)"
    ))
    .unwrap()
});
static RE_DEADLINE_BRACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\{\s*deadline:\s*([^}]+)\}").unwrap());

static RE_EVERY_WEEKDAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bevery\s+weekday\b").unwrap());
static RE_EVERY_DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bevery\s?day\b").unwrap());
static RE_EVERY_MONTH_ON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bevery\s+month\s+on\s+the\s+(\d{1,2})(?:st|nd|rd|th)?\b").unwrap()
});
static RE_EVERY_NAMED_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\bevery\s+({WEEKDAY_NAMES})\b")).unwrap());
static RE_EVERY_N_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bevery\s+(\d+)\s+(day|week|month|year)s?\b").unwrap());
static RE_EVERY_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bevery\s+(week|month|year)\b").unwrap());

static RE_REMIND_AT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\bremind\s+me\s+at\s+((?:(?:{DATE_PHRASE}|\d{{1,2}}(?::\d{{2}})?\s*(?:am|pm))\s*)+)"
    ))
    .unwrap()
});
static RE_REMIND_BEFORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bremind\s+me\s+(\d+)\s*(m|h)\s+before\b").unwrap());

/// Structured result of one quick-add line. Produced fresh per parse; the
/// caller maps it into a persisted task.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickAddResult {
    pub title: String,
    pub due: Option<DateTime<Utc>>,
    pub due_all_day: bool,
    pub deadline: Option<DateTime<Utc>>,
    pub deadline_all_day: bool,
    pub priority: Priority,
    pub project: Option<String>,
    pub section: Option<String>,
    pub recurring_rule: Option<String>,
    pub deadline_recurring_rule: Option<String>,
    pub reminders: Vec<ReminderSpec>,
}

impl QuickAddResult {
    /// Maps the parse result into a new open task stamped at `now`.
    pub fn into_task(self, now: DateTime<Utc>) -> Task {
        let mut task = Task::new(self.title, now);
        task.priority = self.priority;
        task.project = self.project;
        task.section = self.section;
        task.due = self.due;
        task.due_all_day = self.due_all_day;
        task.deadline = self.deadline;
        task.deadline_all_day = self.deadline_all_day;
        task.recurring_rule = self.recurring_rule;
        task.deadline_recurring_rule = self.deadline_recurring_rule;
        task.reminders = self.reminders;
        task.status = Status::Open;
        task
    }
}

/// Parses one free-text line into structured task fields.
///
/// Pure function of `(text, now)`: the reference instant (and its zone) is
/// injected so results are deterministic under test. Parsing never fails;
/// unrecognized tokens just leave the matching field empty.
///
/// Each extraction below scans the original text independently; stripping
/// for the title happens once at the end, so overlapping matches never
/// double-consume.
pub fn parse_quick_add<Tz: TimeZone>(text: &str, now: &DateTime<Tz>) -> QuickAddResult {
    let zone = now.timezone();
    let base = now.date_naive();
    let lower = text.to_lowercase();

    // 1. Priority: highest mentioned wins, default P4.
    let priority = if lower.contains("p1") {
        Priority::P1
    } else if lower.contains("p2") {
        Priority::P2
    } else if lower.contains("p3") {
        Priority::P3
    } else {
        Priority::P4
    };

    // 2. Project tag: first #tag wins, later ones stay in the title.
    let project = RE_PROJECT
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|p| !p.is_empty());
    let section = RE_SECTION.captures(text).map(|c| c[1].to_string());

    // 3. Due date phrase + time-of-day token from anywhere in the text.
    let due_date = resolve_date_phrase(text, base);
    let due_time = resolve_time(text);
    let due_all_day = due_date.is_some() && due_time.is_none();
    let mut due = due_date.and_then(|d| to_utc(&zone, d.and_time(or_default_hour(due_time))));

    // 4. Deadline clause.
    let mut deadline = None;
    let mut deadline_all_day = false;
    for caps in RE_DEADLINE
        .captures_iter(text)
        .chain(RE_DEADLINE_BRACE.captures_iter(text))
    {
        let phrase = &caps[1];
        if let Some(d) = resolve_date_phrase(phrase, base) {
            let t = resolve_time(phrase);
            deadline_all_day = t.is_none();
            deadline = to_utc(&zone, d.and_time(or_default_hour(t)));
            break;
        }
    }

    // 5. Recurrence clause.
    let recurring_rule = extract_recurrence(text);

    // 6. Reminders: absolute "remind me at", then relative "remind me N before".
    let mut reminders = Vec::new();
    let reminder_base = due
        .map(|d| d.with_timezone(&zone).date_naive())
        .unwrap_or(base);
    for caps in RE_REMIND_AT.captures_iter(text) {
        let phrase = &caps[1];
        let d = resolve_date_phrase(phrase, base);
        let t = resolve_time(phrase);
        if d.is_none() && t.is_none() {
            continue;
        }
        if let Some(at) = to_utc(&zone, d.unwrap_or(reminder_base).and_time(or_default_hour(t))) {
            reminders.push(ReminderSpec::Absolute(at));
        }
    }
    for caps in RE_REMIND_BEFORE.captures_iter(text) {
        // An offset with no due anchor is meaningless; drop it silently.
        if due.is_none() {
            continue;
        }
        if let Ok(n) = caps[1].parse::<i64>() {
            let minutes = if caps[2].eq_ignore_ascii_case("h") {
                n * 60
            } else {
                n
            };
            reminders.push(ReminderSpec::Offset(minutes));
        }
    }

    // 7. A recurrence without an anchor gets seeded to today at the default hour.
    if recurring_rule.is_some() && due.is_none() {
        due = to_utc(
            &zone,
            base.and_time(NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0).unwrap()),
        );
    }

    let title = strip_title(text);
    debug!(
        "quick-add parsed: title={:?} due={:?} deadline={:?} rule={:?} reminders={}",
        title,
        due,
        deadline,
        recurring_rule,
        reminders.len()
    );

    QuickAddResult {
        title,
        due,
        due_all_day,
        deadline,
        deadline_all_day,
        priority,
        project,
        section,
        recurring_rule,
        deadline_recurring_rule: None,
        reminders,
    }
}

/// Resolves the first recognized date phrase in `text` against `base`.
///
/// Precedence: literal today/tomorrow/next week, "in N days", a weekday name
/// (next-or-same occurrence), then an explicit `YYYY-M-D` or `M/D[/YY[YY]]`
/// date. Two-digit years normalize to 2000+YY.
fn resolve_date_phrase(text: &str, base: NaiveDate) -> Option<NaiveDate> {
    if RE_TODAY.is_match(text) {
        return Some(base);
    }
    if RE_TOMORROW.is_match(text) {
        return Some(base + Duration::days(1));
    }
    if RE_NEXT_WEEK.is_match(text) {
        return Some(base + Duration::days(7));
    }
    if let Some(caps) = RE_IN_DAYS.captures(text) {
        // Out-of-range counts leave the field empty instead of aborting the parse.
        if let Some(date) = caps[1]
            .parse::<i64>()
            .ok()
            .and_then(Duration::try_days)
            .and_then(|d| base.checked_add_signed(d))
        {
            return Some(date);
        }
    }
    if let Some(caps) = RE_WEEKDAY.captures(text) {
        if let Some(wd) = weekday_from_name(&caps[1]) {
            return Some(next_or_same_weekday(base, wd));
        }
    }
    if let Some(caps) = RE_ISO_DATE.captures(text) {
        let y: i32 = caps[1].parse().ok()?;
        let m: u32 = caps[2].parse().ok()?;
        let d: u32 = caps[3].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
            return Some(date);
        }
    }
    if let Some(caps) = RE_SLASH_DATE.captures(text) {
        let m: u32 = caps[1].parse().ok()?;
        let d: u32 = caps[2].parse().ok()?;
        let y = match caps.get(3) {
            Some(y) => {
                let y: i32 = y.as_str().parse().ok()?;
                if y < 100 {
                    2000 + y
                } else {
                    y
                }
            }
            None => base.year(),
        };
        if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
            return Some(date);
        }
    }
    None
}

/// First `H[:MM] am|pm` token in `text`, 12-hour clock.
fn resolve_time(text: &str) -> Option<NaiveTime> {
    let caps = RE_TIME.captures(text)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if hour == 12 {
        hour = 0;
    }
    if caps[3].eq_ignore_ascii_case("pm") {
        hour += 12;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn or_default_hour(time: Option<NaiveTime>) -> NaiveTime {
    time.unwrap_or_else(|| NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0).unwrap())
}

fn extract_recurrence(text: &str) -> Option<String> {
    if RE_EVERY_WEEKDAY.is_match(text) {
        return Some("FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR".to_string());
    }
    if RE_EVERY_DAY.is_match(text) {
        return Some("FREQ=DAILY".to_string());
    }
    if let Some(caps) = RE_EVERY_MONTH_ON.captures(text) {
        return Some(format!("FREQ=MONTHLY;BYMONTHDAY={}", &caps[1]));
    }
    if let Some(caps) = RE_EVERY_NAMED_DAY.captures(text) {
        if let Some(wd) = weekday_from_name(&caps[1]) {
            return Some(format!("FREQ=WEEKLY;BYDAY={}", weekday_code(wd)));
        }
    }
    if let Some(caps) = RE_EVERY_N_UNIT.captures(text) {
        return Some(format!(
            "FREQ={};INTERVAL={}",
            freq_for_unit(&caps[2]),
            &caps[1]
        ));
    }
    if let Some(caps) = RE_EVERY_UNIT.captures(text) {
        return Some(format!("FREQ={}", freq_for_unit(&caps[1])));
    }
    None
}

fn freq_for_unit(unit: &str) -> &'static str {
    match unit.to_ascii_lowercase().as_str() {
        "day" => "DAILY",
        "week" => "WEEKLY",
        "month" => "MONTHLY",
        _ => "YEARLY",
    }
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    let name = name.to_ascii_lowercase();
    match name.get(..3)? {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn weekday_code(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Next occurrence of `target` on or after `base`, same day included.
fn next_or_same_weekday(base: NaiveDate, target: Weekday) -> NaiveDate {
    let days = (target.num_days_from_monday() as i64
        - base.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    base + Duration::days(days)
}

/// Removes every recognized token span from the original text. Only the
/// first project tag and section are consumed; later ones stay verbatim.
fn strip_title(text: &str) -> String {
    let mut s = text.to_string();
    if let Some(range) = RE_PROJECT.find(&s).map(|m| m.range()) {
        s.replace_range(range, " ");
    }
    if let Some(range) = RE_SECTION.find(&s).map(|m| m.range()) {
        s.replace_range(range, " ");
    }
    let patterns: [&Regex; 17] = [
        &RE_DEADLINE_BRACE,
        &RE_DEADLINE,
        &RE_REMIND_AT,
        &RE_REMIND_BEFORE,
        &RE_EVERY_WEEKDAY,
        &RE_EVERY_MONTH_ON,
        &RE_EVERY_NAMED_DAY,
        &RE_EVERY_N_UNIT,
        &RE_EVERY_DAY,
        &RE_EVERY_UNIT,
        &RE_PRIORITY,
        &RE_TODAY,
        &RE_TOMORROW,
        &RE_NEXT_WEEK,
        &RE_IN_DAYS,
        &RE_WEEKDAY,
        &RE_ISO_DATE,
    ];
    for re in patterns {
        s = re.replace_all(&s, " ").into_owned();
    }
    s = RE_SLASH_DATE.replace_all(&s, " ").into_owned();
    s = RE_TIME.replace_all(&s, " ").into_owned();

    let cleaned = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        "Untitled task".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    // Friday.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 6, 9, 0, 0).unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_pay_rent_example() {
        let result = parse_quick_add("Pay rent tomorrow 8am p1 #Home", &now());
        assert_eq!(result.title, "Pay rent");
        assert_eq!(result.priority, Priority::P1);
        assert_eq!(result.project.as_deref(), Some("Home"));
        assert_eq!(result.due, Some(utc(2026, 2, 7, 8, 0)));
        assert!(!result.due_all_day);
        assert_eq!(result.deadline, None);
        assert_eq!(result.recurring_rule, None);
    }

    #[test]
    fn test_parse_is_pure() {
        let a = parse_quick_add("Plan trip next week p2 #Travel remind me at 8pm", &now());
        let b = parse_quick_add("Plan trip next week p2 #Travel remind me at 8pm", &now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_title_becomes_placeholder() {
        let result = parse_quick_add("tomorrow p1", &now());
        assert_eq!(result.title, "Untitled task");
    }

    #[test]
    fn test_priority_order_and_default() {
        let result = parse_quick_add("triage p3 then p1", &now());
        assert_eq!(result.priority, Priority::P1);
        let result = parse_quick_add("just a note", &now());
        assert_eq!(result.priority, Priority::P4);
    }

    #[test]
    fn test_first_tag_wins_later_ones_stay() {
        let result = parse_quick_add("file taxes #Finance #Urgent", &now());
        assert_eq!(result.project.as_deref(), Some("Finance"));
        assert_eq!(result.title, "file taxes #Urgent");
    }

    #[test]
    fn test_section_token() {
        let result = parse_quick_add("draft post #Blog /Ideas", &now());
        assert_eq!(result.project.as_deref(), Some("Blog"));
        assert_eq!(result.section.as_deref(), Some("Ideas"));
        assert_eq!(result.title, "draft post");
    }

    #[test]
    fn test_weekday_is_next_or_same() {
        // now() is a Friday; "friday" resolves to the same day.
        let result = parse_quick_add("Ship release friday", &now());
        assert_eq!(result.due, Some(utc(2026, 2, 6, 9, 0)));
        assert!(result.due_all_day);
        assert_eq!(result.title, "Ship release");

        let result = parse_quick_add("Standup notes mon", &now());
        assert_eq!(result.due, Some(utc(2026, 2, 9, 9, 0)));
    }

    #[test]
    fn test_in_n_days() {
        let result = parse_quick_add("renew passport in 10 days", &now());
        assert_eq!(result.due, Some(utc(2026, 2, 16, 9, 0)));
        assert_eq!(result.title, "renew passport");
    }

    #[test]
    fn test_explicit_dates() {
        let result = parse_quick_add("dentist 2026-3-14 2:30 pm", &now());
        assert_eq!(result.due, Some(utc(2026, 3, 14, 14, 30)));
        assert_eq!(result.title, "dentist");

        // Two-digit year normalizes to 2000+YY, year-less form uses now's year.
        let result = parse_quick_add("vote 11/3/26", &now());
        assert_eq!(result.due, Some(utc(2026, 11, 3, 9, 0)));
        let result = parse_quick_add("party 12/31", &now());
        assert_eq!(result.due, Some(utc(2026, 12, 31, 9, 0)));
    }

    #[test]
    fn test_twelve_hour_clock() {
        let result = parse_quick_add("lunch today 12pm", &now());
        assert_eq!(result.due, Some(utc(2026, 2, 6, 12, 0)));
        let result = parse_quick_add("backup today 12am", &now());
        assert_eq!(result.due, Some(utc(2026, 2, 6, 0, 0)));
    }

    #[test]
    fn test_deadline_by_clause() {
        let result = parse_quick_add("Submit report by monday 5pm", &now());
        assert_eq!(result.deadline, Some(utc(2026, 2, 9, 17, 0)));
        assert!(!result.deadline_all_day);
        assert_eq!(result.title, "Submit report");
        // The bare weekday also resolves as a due phrase (independent scans).
        assert_eq!(result.due, Some(utc(2026, 2, 9, 17, 0)));
    }

    #[test]
    fn test_braced_deadline() {
        let result = parse_quick_add("Finish thesis {deadline: 2026-6-1}", &now());
        assert_eq!(result.deadline, Some(utc(2026, 6, 1, 9, 0)));
        assert!(result.deadline_all_day);
        assert_eq!(result.title, "Finish thesis");
    }

    #[test]
    fn test_oversized_in_days_count_leaves_due_empty() {
        let result = parse_quick_add("call the bank in 999999999 days", &now());
        assert_eq!(result.due, None);
        assert_eq!(result.title, "call the bank");

        let result = parse_quick_add("heat death in 99999999999999999999 days", &now());
        assert_eq!(result.due, None);
    }

    #[test]
    fn test_weekday_prefix_word_is_not_a_deadline() {
        let result = parse_quick_add("drop off package by satellite office", &now());
        assert_eq!(result.deadline, None);
        assert_eq!(result.due, None);
        assert_eq!(result.title, "drop off package by satellite office");

        let result = parse_quick_add("lunch with monica by friday", &now());
        assert_eq!(result.deadline, Some(utc(2026, 2, 6, 9, 0)));
        assert_eq!(result.title, "lunch with monica");
    }

    #[test]
    fn test_unresolvable_by_clause_is_ignored() {
        let result = parse_quick_add("stop by the store", &now());
        assert_eq!(result.deadline, None);
        assert_eq!(result.title, "stop by the store");
    }

    #[test]
    fn test_every_patterns() {
        let cases = [
            ("gym every weekday", "FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR"),
            ("water plants every day", "FREQ=DAILY"),
            ("journal everyday", "FREQ=DAILY"),
            ("rent every month on the 1st", "FREQ=MONTHLY;BYMONTHDAY=1"),
            ("review every friday", "FREQ=WEEKLY;BYDAY=FR"),
            ("sync every 2 weeks", "FREQ=WEEKLY;INTERVAL=2"),
            ("report every month", "FREQ=MONTHLY"),
            ("checkup every year", "FREQ=YEARLY"),
        ];
        for (text, expected) in cases {
            let result = parse_quick_add(text, &now());
            assert_eq!(result.recurring_rule.as_deref(), Some(expected), "{text}");
        }
    }

    #[test]
    fn test_recurrence_seeds_due_at_default_hour() {
        let result = parse_quick_add("water plants every day", &now());
        assert_eq!(result.due, Some(utc(2026, 2, 6, 9, 0)));
        assert!(!result.due_all_day);
        assert_eq!(result.title, "water plants");
    }

    #[test]
    fn test_offset_reminder() {
        let result = parse_quick_add("Review report tomorrow 9am remind me 30m before", &now());
        assert_eq!(result.reminders, vec![ReminderSpec::Offset(30)]);
        assert_eq!(result.due, Some(utc(2026, 2, 7, 9, 0)));
        assert_eq!(result.title, "Review report");
    }

    #[test]
    fn test_hour_offset_reminder() {
        let result = parse_quick_add("flight tomorrow 6am remind me 2h before", &now());
        assert_eq!(result.reminders, vec![ReminderSpec::Offset(120)]);
    }

    #[test]
    fn test_offset_without_due_is_dropped() {
        let result = parse_quick_add("buy milk remind me 30m before", &now());
        assert!(result.reminders.is_empty());
    }

    #[test]
    fn test_absolute_reminder_defaults_to_due_date() {
        let result = parse_quick_add("Call mom tomorrow 5pm remind me at 9am", &now());
        // Time token precedence: "5pm" is the first in the text, so due is 17:00.
        assert_eq!(result.due, Some(utc(2026, 2, 7, 17, 0)));
        assert_eq!(
            result.reminders,
            vec![ReminderSpec::Absolute(utc(2026, 2, 7, 9, 0))]
        );
        assert_eq!(result.title, "Call mom");
    }

    #[test]
    fn test_absolute_reminder_with_own_date() {
        let result = parse_quick_add("conference 2026-5-20 remind me at 2026-5-19 8pm", &now());
        assert_eq!(
            result.reminders,
            vec![ReminderSpec::Absolute(utc(2026, 5, 19, 20, 0))]
        );
    }

    #[test]
    fn test_into_task() {
        let stamp = now();
        let task = parse_quick_add("Pay rent tomorrow 8am p1 #Home", &stamp).into_task(stamp);
        assert_eq!(task.title, "Pay rent");
        assert_eq!(task.priority, Priority::P1);
        assert_eq!(task.status, Status::Open);
        assert_eq!(task.due, Some(utc(2026, 2, 7, 8, 0)));
        assert_eq!(task.created_at, stamp);
        assert_eq!(task.completed_at, None);
        let _ = Uuid::parse_str(&task.id.to_string()).unwrap();
    }
}
