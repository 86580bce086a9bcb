//! Calendar wire types
//!
//! The calendar endpoint returns loosely-typed, partially-null records. This
//! module declares the expected shape per field and normalizes each record
//! into a [`CalendarEvent`], flagging anything unexpected as a `Parse` error
//! instead of silently accepting arbitrary structure.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use tigris_domain::{CalendarEvent, PersonInfo, Result, TigrisError};

/// Envelope of the calendar search response.
#[derive(Debug, Deserialize)]
pub(crate) struct CalendarEnvelope {
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
    #[serde(rename = "DATA", default)]
    pub data: Vec<RawCalendarRecord>,
}

/// One raw record from the `DATA` array. Every field can be null/absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCalendarRecord {
    pub kind: Option<String>,
    pub title: Option<String>,
    pub leav_nm: Option<String>,
    pub leav_cd: Option<i64>,
    pub person_info: Option<String>,
    pub agent_name: Option<String>,
    pub sta_ymd: Option<String>,
    pub end_ymd: Option<String>,
    pub all_day: Option<Boolish>,
    pub sta_hm: Option<String>,
    pub end_hm: Option<String>,
    pub req_status_cd: Option<String>,
    pub reason: Option<String>,
    pub note: Option<String>,
}

/// Boolean-ish wire value: the portal emits real booleans, quoted booleans,
/// `Y`/`N` flags, and 0/1 depending on the record source.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Boolish {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Boolish {
    fn normalize(&self) -> Result<bool> {
        match self {
            Boolish::Bool(value) => Ok(*value),
            Boolish::Int(0) => Ok(false),
            Boolish::Int(1) => Ok(true),
            Boolish::Int(other) => {
                Err(TigrisError::Parse(format!("boolean-ish field holds number {other}")))
            }
            Boolish::Text(text) => match text.trim() {
                "true" | "TRUE" | "True" | "Y" | "y" | "1" => Ok(true),
                "false" | "FALSE" | "False" | "N" | "n" | "0" => Ok(false),
                other => {
                    Err(TigrisError::Parse(format!("boolean-ish field holds text {other:?}")))
                }
            },
        }
    }
}

impl RawCalendarRecord {
    /// Normalize this record into a typed event, enforcing the event
    /// invariants (start <= end; timed events carry both times).
    pub(crate) fn into_event(self) -> Result<CalendarEvent> {
        let kind = require("kind", self.kind)?;
        let title = require("title", self.title)?;
        let start_date = parse_record_date("staYmd", require("staYmd", self.sta_ymd)?)?;
        let end_date = parse_record_date("endYmd", require("endYmd", self.end_ymd)?)?;

        if start_date > end_date {
            return Err(TigrisError::Parse(format!(
                "event starts after it ends ({start_date} > {end_date})"
            )));
        }

        let start_time =
            self.sta_hm.as_deref().and_then(non_empty).map(parse_record_time).transpose()?;
        let end_time =
            self.end_hm.as_deref().and_then(non_empty).map(parse_record_time).transpose()?;

        // When the flag is missing entirely, the absence of both times is the
        // only signal left.
        let all_day = match self.all_day {
            Some(flag) => flag.normalize()?,
            None => start_time.is_none() && end_time.is_none(),
        };

        if !all_day && (start_time.is_none() || end_time.is_none()) {
            return Err(TigrisError::Parse(
                "timed event is missing its start or end time of day".into(),
            ));
        }

        Ok(CalendarEvent {
            kind,
            title,
            leave_name: self.leav_nm.as_deref().and_then(non_empty).map(String::from),
            leave_code: self.leav_cd,
            person: self.person_info.as_deref().and_then(parse_person_info),
            agent_name: self.agent_name.as_deref().and_then(non_empty).map(String::from),
            start_date,
            end_date,
            start_time,
            end_time,
            all_day,
            approval_status: self.req_status_cd.as_deref().and_then(non_empty).map(String::from),
            reason: self.reason.as_deref().and_then(non_empty).map(String::from),
            note: self.note.as_deref().and_then(non_empty).map(String::from),
        })
    }
}

/// Split the `personInfo` composite on its three `/` boundaries.
///
/// The all-empty composite (`"///"`) denotes a global event and maps to
/// `None`, not to four empty strings.
pub(crate) fn parse_person_info(raw: &str) -> Option<PersonInfo> {
    let mut parts = raw.splitn(4, '/');
    let organization = clean(parts.next());
    let responsibility = clean(parts.next());
    let position = clean(parts.next());
    let work_type = clean(parts.next());

    let all_empty = organization.is_none()
        && responsibility.is_none()
        && position.is_none()
        && work_type.is_none();
    if all_empty {
        return None;
    }

    Some(PersonInfo { organization, responsibility, position, work_type })
}

fn clean(part: Option<&str>) -> Option<String> {
    part.map(str::trim).filter(|p| !p.is_empty()).map(String::from)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn require(field: &str, value: Option<String>) -> Result<String> {
    value
        .as_deref()
        .and_then(non_empty)
        .map(String::from)
        .ok_or_else(|| TigrisError::Parse(format!("record is missing required field {field}")))
}

/// Global events carry bare `YYYYMMDD` dates while person events carry
/// `YYYY-MM-DD`; both are accepted.
fn parse_record_date(field: &str, raw: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&raw, "%Y%m%d"))
        .map_err(|err| TigrisError::Parse(format!("invalid date in {field} ({raw:?}): {err}")))
}

/// Times of day arrive as `THH:MM:SS`; the leading `T` is optional.
fn parse_record_time(raw: &str) -> Result<NaiveTime> {
    let raw = raw.strip_prefix('T').unwrap_or(raw);
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|err| TigrisError::Parse(format!("invalid time of day ({raw:?}): {err}")))
}
