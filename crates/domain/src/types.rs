//! Session and calendar event types

use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::constants::WIRE_UTC_OFFSET_SECS;

/// Authenticated portal session.
///
/// Created only by a successful login and immutable afterwards. Carries every
/// token needed to authorize subsequent calls, so multiple independent
/// sessions can coexist in one process without shared cookie-jar state.
#[derive(Debug, Clone)]
pub struct Session {
    /// Long-lived, company-scoped master credential. Never logged, never
    /// rendered by `Debug`, never embedded in error text.
    site_id: SecretString,
    /// Short-lived token sent as the `JSESSIONID` cookie on API-host calls.
    session_id: String,
    authenticated: bool,
}

impl Session {
    /// Build a session from the tokens produced by the login chain.
    pub fn new(site_id: SecretString, session_id: String) -> Self {
        Self { site_id, session_id, authenticated: true }
    }

    /// Site identifier, kept behind `secrecy` redaction.
    pub fn site_id(&self) -> &SecretString {
        &self.site_id
    }

    /// Token authorizing calendar requests.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Person descriptor parsed from the `personInfo` composite string.
///
/// Each field can be independently absent; the all-empty composite (a global
/// event) maps to the whole struct being absent instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInfo {
    pub organization: Option<String>,
    pub responsibility: Option<String>,
    pub position: Option<String>,
    pub work_type: Option<String>,
}

/// One leave/schedule entry from the portal calendar.
///
/// Absent wire fields stay `None`; they are never defaulted to empty strings
/// or zero, since absence is meaningful (company-wide events omit all
/// person-specific fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event kind as reported by the portal (e.g. leave vs. holiday).
    pub kind: String,
    pub title: String,
    /// Leave-type display name
    pub leave_name: Option<String>,
    /// Leave-type code
    pub leave_code: Option<i64>,
    /// Person the entry belongs to; `None` for global/company-wide events.
    pub person: Option<PersonInfo>,
    /// Delegate handling the person's duties during the leave
    pub agent_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Start time of day; always present when `all_day` is false.
    pub start_time: Option<NaiveTime>,
    /// End time of day; always present when `all_day` is false.
    pub end_time: Option<NaiveTime>,
    pub all_day: bool,
    /// Approval-status code of the underlying leave request
    pub approval_status: Option<String>,
    pub reason: Option<String>,
    pub note: Option<String>,
}

impl CalendarEvent {
    /// True for entries not tied to a specific person (company-wide holidays
    /// and the like).
    pub fn is_global(&self) -> bool {
        self.person.is_none()
    }

    /// Event start as an instant in the given display time zone.
    ///
    /// All-day events resolve to midnight portal time.
    pub fn start_datetime_in(&self, tz: Tz) -> DateTime<Tz> {
        localize(self.start_date, self.start_time, tz)
    }

    /// Event end as an instant in the given display time zone.
    pub fn end_datetime_in(&self, tz: Tz) -> DateTime<Tz> {
        localize(self.end_date, self.end_time, tz)
    }
}

/// Interpret a wall-clock date/time at the portal's fixed +09:00 offset and
/// convert it to the display zone.
fn localize(date: NaiveDate, time: Option<NaiveTime>, tz: Tz) -> DateTime<Tz> {
    let naive = date.and_time(time.unwrap_or(NaiveTime::MIN));
    (naive - Duration::seconds(WIRE_UTC_OFFSET_SECS as i64)).and_utc().with_timezone(&tz)
}
