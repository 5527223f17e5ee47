//! Static event catalog for the 2026 program calendar.
//!
//! The catalog is immutable configuration data: a fixed table of holidays,
//! academic dates, and program events, plus a biweekly session series
//! generated from date-range rules. It is generated once at first access
//! and consumed in-process by the calendar view; nothing here touches the
//! database or the wire.

use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

/// Category tag for a catalog entry, used by the calendar view for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Holiday,
    Academic,
    Exam,
    Vacation,
    Deadline,
    Program,
    ProgramImportant,
    Session,
}

/// A single catalog entry: one day, or an inclusive date range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub title: String,
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    fn on(date: &str, title: &str, kind: EventKind) -> Self {
        Self {
            date: parse_date(date),
            end_date: None,
            title: title.to_string(),
            kind,
            description: None,
        }
    }

    fn span(start: &str, end: &str, title: &str, kind: EventKind) -> Self {
        Self {
            end_date: Some(parse_date(end)),
            ..Self::on(start, title, kind)
        }
    }

    fn desc(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Whether this entry falls on `date`: equal to the single date, or
    /// inside the inclusive `[date, end_date]` range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.end_date {
            Some(end) => self.date <= date && date <= end,
            None => self.date == date,
        }
    }
}

// Catalog dates are compile-time literals; a typo should fail loudly at
// first access rather than silently drop an entry.
fn parse_date(s: &str) -> NaiveDate {
    s.parse().expect("valid catalog date")
}

/// Generate the session series.
///
/// Phase 1 (regular sessions, Mon/Thu): 2026-03-09 until the pre-finals
/// recess starting 2026-06-09, skipping the midterm recess
/// 2026-04-14..=2026-04-27.
///
/// Phase 2 (Final Sprint, Mon/Thu): 2026-07-06 until Demo Day on
/// 2026-08-01.
fn generate_session_events() -> Vec<CalendarEvent> {
    let mut sessions = Vec::new();

    let phase1_start = parse_date("2026-03-09");
    let midterm_recess_start = parse_date("2026-04-14");
    let midterm_recess_end = parse_date("2026-04-27");
    let finals_recess_start = parse_date("2026-06-09");

    let mut count = 1;
    let mut current = phase1_start;
    while current < finals_recess_start {
        let in_recess = midterm_recess_start <= current && current <= midterm_recess_end;
        if !in_recess {
            if let Some(event) = session_on(current, &format!("Session #{count}"), "") {
                sessions.push(event);
                count += 1;
            }
        }
        current = current + Days::new(1);
    }

    let sprint_start = parse_date("2026-07-06");
    let demo_day = parse_date("2026-08-01");

    let mut sprint_count = 1;
    let mut current = sprint_start;
    while current < demo_day {
        if let Some(event) = session_on(
            current,
            &format!("Sprint #{sprint_count}"),
            " | Final Sprint",
        ) {
            sessions.push(event);
            sprint_count += 1;
        }
        current = current + Days::new(1);
    }

    sessions
}

/// Sessions run Monday 19:00-22:00 and Thursday 20:00-22:00.
fn session_on(date: NaiveDate, title: &str, suffix: &str) -> Option<CalendarEvent> {
    let hours = match date.weekday() {
        Weekday::Mon => "Mon 19:00-22:00",
        Weekday::Thu => "Thu 20:00-22:00",
        _ => return None,
    };
    Some(CalendarEvent {
        date,
        end_date: None,
        title: title.to_string(),
        kind: EventKind::Session,
        description: Some(format!("{hours}{suffix}")),
    })
}

/// The fixed (non-generated) part of the 2026 catalog.
fn static_events() -> Vec<CalendarEvent> {
    use EventKind::*;

    vec![
        // -- February --
        CalendarEvent::span("2026-02-14", "2026-03-05", "Cohort 5 recruiting", Program)
            .desc("Application window"),
        CalendarEvent::span("2026-02-14", "2026-02-18", "Lunar New Year holiday", Holiday)
            .desc("Sat-Wed, 5 days"),
        CalendarEvent::on("2026-02-28", "March 1st holiday weekend begins", Holiday),
        CalendarEvent::span("2026-02-09", "2026-02-13", "Course registration", Academic),
        CalendarEvent::span("2026-02-23", "2026-02-27", "Tuition payment", Academic),
        CalendarEvent::on("2026-02-24", "Freshman course registration", Academic),
        CalendarEvent::on("2026-02-26", "Returning-student course registration", Academic),
        // -- March --
        CalendarEvent::span("2026-03-06", "2026-03-08", "Cohort 5 interviews", ProgramImportant)
            .desc("Interviews and admission decisions"),
        CalendarEvent::on("2026-03-09", "OT", ProgramImportant)
            .desc("Orientation + intro session"),
        CalendarEvent::span("2026-03-14", "2026-03-15", "MT", ProgramImportant)
            .desc("Overnight team building"),
        CalendarEvent::span("2026-03-23", "2026-04-09", "Industry partnership project", Program)
            .desc("Startup agent pipeline build"),
        CalendarEvent::on("2026-03-01", "Independence Movement Day", Holiday),
        CalendarEvent::on("2026-03-02", "Substitute holiday", Holiday),
        CalendarEvent::on("2026-03-03", "Semester begins", Academic).desc("Spring 2026 term"),
        CalendarEvent::span("2026-03-05", "2026-03-09", "Course add/drop", Academic),
        CalendarEvent::span("2026-03-12", "2026-03-16", "Late registration", Academic),
        // -- April --
        CalendarEvent::on("2026-04-13", "Partnership project demo", ProgramImportant)
            .desc("Final presentation and retrospective"),
        CalendarEvent::on("2026-04-08", "One-third point of term", Deadline),
        CalendarEvent::span("2026-04-14", "2026-04-16", "Course withdrawal period", Deadline),
        CalendarEvent::span("2026-04-21", "2026-04-27", "Midterm exams", Exam)
            .desc("Midterm period"),
        // -- May --
        CalendarEvent::on("2026-05-04", "Guest speaker #1", ProgramImportant)
            .desc("AI practitioner (fundamentals)"),
        CalendarEvent::on("2026-05-18", "Guest speaker #2", ProgramImportant)
            .desc("Startup founder (tech to business)"),
        CalendarEvent::on("2026-05-05", "Children's Day", Holiday),
        CalendarEvent::on("2026-05-23", "Buddha's Birthday", Holiday),
        CalendarEvent::on("2026-05-24", "Buddha's Birthday (Sun)", Holiday),
        CalendarEvent::on("2026-05-25", "Substitute holiday", Holiday),
        CalendarEvent::on("2026-05-15", "Two-thirds point of term", Deadline),
        // -- June --
        CalendarEvent::on("2026-06-01", "Guest speaker #3", ProgramImportant)
            .desc("VC (investor perspective)"),
        CalendarEvent::on("2026-06-03", "Local elections", Holiday).desc("One-off public holiday"),
        CalendarEvent::on("2026-06-06", "Memorial Day", Holiday)
            .desc("Saturday, no substitute holiday"),
        CalendarEvent::span("2026-06-16", "2026-06-22", "Final exams", Exam).desc("Finals period"),
        CalendarEvent::on("2026-06-23", "Summer break begins", Vacation),
        CalendarEvent::on("2026-06-29", "Grade submission deadline", Deadline),
        // -- July --
        CalendarEvent::span("2026-07-06", "2026-08-01", "Final Sprint", Program)
            .desc("Final project sprint"),
        CalendarEvent::on("2026-07-09", "Guest speaker #4", ProgramImportant)
            .desc("AI practitioner (advanced)"),
        CalendarEvent::on("2026-07-20", "Guest speaker #5", ProgramImportant)
            .desc("Startup founder (field insights)"),
        CalendarEvent::on("2026-07-27", "Guest speaker #6", ProgramImportant)
            .desc("VC (pitching perspective)"),
        CalendarEvent::on("2026-07-15", "Chobok", Holiday),
        CalendarEvent::on("2026-07-25", "Jungbok", Holiday),
        // -- August --
        CalendarEvent::on("2026-08-01", "Cohort 5 Demo Day", ProgramImportant)
            .desc("Final presentations and demos"),
        CalendarEvent::on("2026-08-03", "Fall leave-of-absence filing opens", Academic),
        CalendarEvent::span("2026-08-10", "2026-08-14", "Fall course registration", Academic),
        CalendarEvent::on("2026-08-14", "Malbok", Holiday),
        CalendarEvent::on("2026-08-15", "Liberation Day", Holiday),
        CalendarEvent::on("2026-08-17", "Substitute holiday", Holiday),
        CalendarEvent::span("2026-08-21", "2026-08-27", "Fall tuition payment", Academic),
        CalendarEvent::on("2026-08-28", "Commencement", Academic),
    ]
}

/// Generated sessions first, then the static table. Query results preserve
/// this insertion order.
static CATALOG: LazyLock<Vec<CalendarEvent>> = LazyLock::new(|| {
    let mut events = generate_session_events();
    events.extend(static_events());
    events
});

/// The full 2026 event catalog, in insertion order.
pub fn catalog() -> &'static [CalendarEvent] {
    &CATALOG
}

/// Every catalog entry falling on `date`, in catalog insertion order.
pub fn events_on(date: NaiveDate) -> Vec<&'static CalendarEvent> {
    CATALOG.iter().filter(|e| e.contains(date)).collect()
}

/// A month shown by the calendar view.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
    pub name: &'static str,
}

/// The months the 2026 calendar view pages over.
pub const MONTHS_2026: [Month; 7] = [
    Month { year: 2026, month: 2, name: "February" },
    Month { year: 2026, month: 3, name: "March" },
    Month { year: 2026, month: 4, name: "April" },
    Month { year: 2026, month: 5, name: "May" },
    Month { year: 2026, month: 6, name: "June" },
    Month { year: 2026, month: 7, name: "July" },
    Month { year: 2026, month: 8, name: "August" },
];

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid month");
    next.signed_duration_since(first).num_days() as u32
}

/// Weekday of the first day of the month, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("valid month")
        .weekday()
        .num_days_from_sunday()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn sessions_fall_on_mondays_and_thursdays_only() {
        for event in catalog().iter().filter(|e| e.kind == EventKind::Session) {
            let day = event.date.weekday();
            assert!(
                day == Weekday::Mon || day == Weekday::Thu,
                "session on {} falls on {day}",
                event.date
            );
        }
    }

    #[test]
    fn midterm_recess_has_no_sessions() {
        let recess_start = date("2026-04-14");
        let recess_end = date("2026-04-27");
        assert!(!catalog().iter().any(|e| {
            e.kind == EventKind::Session && recess_start <= e.date && e.date <= recess_end
        }));
    }

    #[test]
    fn session_counts_match_the_2026_schedule() {
        let sessions: Vec<_> = catalog()
            .iter()
            .filter(|e| e.kind == EventKind::Session)
            .collect();
        // Phase 1: 12 Mondays + 11 Thursdays; Phase 2: 4 of each.
        assert_eq!(sessions.len(), 31);
        assert_eq!(sessions[0].date, date("2026-03-09"));
        assert_eq!(sessions[0].title, "Session #1");
        assert_eq!(sessions[22].title, "Session #23");
        assert_eq!(sessions[23].title, "Sprint #1");
        assert_eq!(sessions[23].date, date("2026-07-06"));
        assert_eq!(sessions[30].date, date("2026-07-30"));
    }

    #[test]
    fn range_membership_is_inclusive_on_both_ends() {
        let titles = |d: &str| -> Vec<&str> {
            events_on(date(d)).iter().map(|e| e.title.as_str()).collect()
        };
        // Midterm exams span 04-21..=04-27.
        assert!(titles("2026-04-21").contains(&"Midterm exams"));
        assert!(titles("2026-04-27").contains(&"Midterm exams"));
        assert!(!titles("2026-04-28").contains(&"Midterm exams"));
        assert!(!titles("2026-04-20").contains(&"Midterm exams"));
    }

    #[test]
    fn single_day_events_match_exactly() {
        let events = events_on(date("2026-08-01"));
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert!(titles.contains(&"Cohort 5 Demo Day"));
        // The Final Sprint range ends on Demo Day, inclusive.
        assert!(titles.contains(&"Final Sprint"));
        assert!(events_on(date("2026-08-02"))
            .iter()
            .all(|e| e.title != "Cohort 5 Demo Day"));
    }

    #[test]
    fn catalog_order_puts_sessions_first() {
        assert_eq!(catalog()[0].kind, EventKind::Session);
        let first_static = catalog()
            .iter()
            .position(|e| e.kind != EventKind::Session)
            .unwrap();
        // Everything after the first static entry is static table content.
        assert!(catalog()[first_static..]
            .iter()
            .all(|e| e.kind != EventKind::Session));
    }

    #[test]
    fn month_grid_helpers() {
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2026, 8), 31);
        assert_eq!(days_in_month(2024, 2), 29);
        // 2026-03-01 was a Sunday.
        assert_eq!(first_weekday_of_month(2026, 3), 0);
        assert_eq!(MONTHS_2026.len(), 7);
        assert_eq!(MONTHS_2026[0].name, "February");
    }
}
