//! Calendar retrieval
//!
//! Fetches leave/schedule entries from the secondary API host. The endpoint
//! signals failure by redirecting to an error page instead of returning a
//! JSON error code, so the transport keeps redirects visible and the fetcher
//! inspects `Location` targets itself.

pub mod wire;

use chrono::{DateTime, TimeZone};
use reqwest::header::{COOKIE, REFERER};
use reqwest::{Method, Response};
use serde::Deserialize;
use tigris_domain::constants::{
    API_SESSION_COOKIE, CALENDAR_COMMAND, CALENDAR_PATH, COLUMN_SHOW_COOKIE, ERROR_REDIRECT_PATH,
    MENU_CD, MENU_DATA_RW_TYPE, MENU_LOCATION, MENU_PROG_CD, MENU_REGISTER_PATH,
    NO_MATCHING_DATA_PATH, SESSION_CHECK_OK, SESSION_CHECK_PATH,
};
use tigris_domain::{CalendarEvent, Result, Session, TigrisError};
use tracing::{debug, warn};
use url::Url;

use crate::auth::redirect_location;
use crate::config::ClientConfig;
use crate::http::{decode_json, HttpClient};
use crate::time::format_wire_timestamp;

/// Error-redirect codes treated as authentication failures. The upstream
/// taxonomy is undocumented; anything else degrades to `Remote`.
const AUTH_REDIRECT_CODES: &[&str] = &["401", "403"];

/// JSON body of the session check endpoint.
#[derive(Debug, Deserialize)]
struct SessionCheckBody {
    #[serde(rename = "loginInfo", default)]
    login_info: Option<String>,
}

/// Fetches calendar entries for an authenticated [`Session`].
pub struct CalendarFetcher {
    http: HttpClient,
    config: ClientConfig,
}

impl CalendarFetcher {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Reuse an existing transport (shared with the authenticator).
    pub fn with_http_client(config: ClientConfig, http: HttpClient) -> Self {
        Self { http, config }
    }

    /// Fetch all events in the given window.
    ///
    /// Both datetimes may be in any zone; they are converted to the portal's
    /// fixed +09:00 offset before hitting the wire. An inverted window fails
    /// fast with `InvalidInput` before any network call.
    ///
    /// # Errors
    /// `Auth` when the session is stale or rejected, `Remote` for other
    /// server-side failures, `Parse` when the payload shape drifts,
    /// `Transport` on network failure.
    pub async fn fetch_calendar<Tz: TimeZone>(
        &self,
        session: &Session,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> Result<Vec<CalendarEvent>> {
        self.fetch(session, start, end, false).await
    }

    /// Like [`fetch_calendar`](Self::fetch_calendar) but restricted to the
    /// caller's own teammates. Skipping menu registration leaves the portal
    /// in its default, team-scoped mode.
    pub async fn fetch_teammate_calendar<Tz: TimeZone>(
        &self,
        session: &Session,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> Result<Vec<CalendarEvent>> {
        self.fetch(session, start, end, true).await
    }

    async fn fetch<Tz: TimeZone>(
        &self,
        session: &Session,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        teammate_only: bool,
    ) -> Result<Vec<CalendarEvent>> {
        if start > end {
            return Err(TigrisError::InvalidInput(
                "calendar window start is after its end".into(),
            ));
        }

        self.check_session(session).await?;
        if !teammate_only {
            self.register_menu(session).await?;
        }
        self.search(session, start, end).await
    }

    /// Verify the session is still accepted by the API host.
    async fn check_session(&self, session: &Session) -> Result<()> {
        let url = format!("{}{}", self.config.api_base_url, SESSION_CHECK_PATH);
        let request =
            self.http.request(Method::GET, &url).header(COOKIE, session_cookie(session));

        let response = self.http.send(request).await?;
        if response.status().is_redirection() {
            return Err(stale_session_error(&response, &self.config.api_base_url));
        }
        let status = response.status();
        if !status.is_success() {
            return Err(TigrisError::Remote {
                code: status.as_u16().to_string(),
                message: "session check returned an unexpected status".into(),
            });
        }

        let body: SessionCheckBody = decode_json(response, "session check").await?;
        if body.login_info.as_deref() != Some(SESSION_CHECK_OK) {
            return Err(TigrisError::Auth {
                code: None,
                message: "session is no longer valid; log in again".into(),
            });
        }
        Ok(())
    }

    /// Register the calendar menu location. Without this call the portal
    /// silently restricts results to the user's own teammates.
    async fn register_menu(&self, session: &Session) -> Result<()> {
        let url = format!("{}{}", self.config.api_base_url, MENU_REGISTER_PATH);
        let request = self
            .http
            .request(Method::POST, &url)
            .header(COOKIE, session_cookie(session))
            .form(&[
                ("location", MENU_LOCATION),
                ("progCd", MENU_PROG_CD),
                ("menuCd", MENU_CD),
                ("dataRwType", MENU_DATA_RW_TYPE),
            ]);

        let response = self.http.send(request).await?;
        let status = response.status();
        if status.is_redirection() {
            return Err(stale_session_error(&response, &self.config.api_base_url));
        }
        if !status.is_success() {
            return Err(TigrisError::Remote {
                code: status.as_u16().to_string(),
                message: "menu registration rejected".into(),
            });
        }
        Ok(())
    }

    /// Run the calendar search itself and map the raw payload.
    async fn search<Tz: TimeZone>(
        &self,
        session: &Session,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> Result<Vec<CalendarEvent>> {
        let url = format!("{}{}", self.config.api_base_url, CALENDAR_PATH);
        let request = self
            .http
            .request(Method::POST, &url)
            .query(&[("cmd", CALENDAR_COMMAND)])
            .header(COOKIE, format!("{}; {COLUMN_SHOW_COOKIE}=N", session_cookie(session)))
            .header(REFERER, format!("{}/Main.do?result=", self.config.api_base_url))
            .form(&[
                ("searchSYmd", format_wire_timestamp(&start).as_str()),
                ("searchEYmd", format_wire_timestamp(&end).as_str()),
                // Filter fields of unconfirmed purpose; always sent at their
                // frontend defaults.
                ("cmmSearchOrgCd", ""),
                ("orgSearchType", "N"),
                ("searchPosCd", ""),
                ("searchResCd", ""),
            ]);

        let response = self.http.send(request).await?;
        let status = response.status();

        if status.is_redirection() {
            return Err(stale_session_error(&response, &self.config.api_base_url));
        }
        if !status.is_success() {
            return Err(TigrisError::Remote {
                code: status.as_u16().to_string(),
                message: "calendar search returned an unexpected status".into(),
            });
        }

        let envelope: wire::CalendarEnvelope = decode_json(response, "calendar").await?;
        debug!(
            records = envelope.data.len(),
            message = envelope.message.as_deref().unwrap_or_default(),
            "calendar search returned"
        );

        envelope.data.into_iter().map(wire::RawCalendarRecord::into_event).collect()
    }
}

fn session_cookie(session: &Session) -> String {
    format!("{API_SESSION_COOKIE}={}", session.session_id())
}

/// Classify an error redirect. `Error.do?code=N` carries a code; 401/403 are
/// authentication failures, everything else (including unrecognized codes)
/// is `Remote`. Any other redirect target means the session was rejected.
fn stale_session_error(response: &Response, api_base_url: &str) -> TigrisError {
    let location = match redirect_location(response) {
        Some(location) => location,
        None => {
            return TigrisError::Auth {
                code: None,
                message: "request was redirected; session is no longer valid".into(),
            }
        }
    };

    warn!(location, "calendar request was redirected");

    if let Some(code) = error_redirect_code(location, api_base_url) {
        if AUTH_REDIRECT_CODES.contains(&code.as_str()) {
            return TigrisError::Auth {
                code: Some(code),
                message: "session rejected by the API host".into(),
            };
        }
        return TigrisError::Remote {
            code,
            message: "API host redirected to its error page".into(),
        };
    }

    if location.contains(NO_MATCHING_DATA_PATH) {
        return TigrisError::Auth {
            code: None,
            message: "session rejected by the API host".into(),
        };
    }

    TigrisError::Auth {
        code: None,
        message: "request was redirected; session is no longer valid".into(),
    }
}

/// Extract the `code` query parameter from an `Error.do` redirect target.
/// Relative locations are resolved against the API host.
fn error_redirect_code(location: &str, api_base_url: &str) -> Option<String> {
    let absolute = Url::parse(location).or_else(|_| {
        Url::parse(api_base_url).and_then(|base| base.join(location))
    });
    let url = absolute.ok()?;

    // Match the final path segment exactly; a suffix match would also catch
    // unrelated pages like `NoMatchingError.do`.
    let last_segment = url.path_segments().and_then(|mut segments| segments.next_back());
    if last_segment != Some(ERROR_REDIRECT_PATH) {
        return None;
    }
    url.query_pairs().find(|(key, _)| key == "code").map(|(_, value)| value.into_owned())
}
