//! High-level client facade
//!
//! Bundles the authenticator and the fetcher over one shared transport. The
//! facade holds no session state: `login` hands the [`Session`] to the
//! caller, who passes it back to every fetch, so several independent
//! sessions can run through one client.

use chrono::{DateTime, TimeZone};
use tigris_domain::{CalendarEvent, Result, Session};

use crate::auth::SessionAuthenticator;
use crate::calendar::CalendarFetcher;
use crate::config::ClientConfig;
use crate::http::HttpClient;

/// Unofficial Tigris HR portal client.
///
/// ```no_run
/// use chrono::{Duration, Utc};
/// use tigris_client::{ClientConfig, TigrisClient};
///
/// # async fn example() -> tigris_client::Result<()> {
/// let client = TigrisClient::new(ClientConfig::default())?;
/// let session = client.login("user@example.com", "password").await?;
/// let events = client
///     .fetch_calendar(&session, Utc::now(), Utc::now() + Duration::weeks(4))
///     .await?;
/// for event in events {
///     println!("{} ({} – {})", event.title, event.start_date, event.end_date);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TigrisClient {
    authenticator: SessionAuthenticator,
    fetcher: CalendarFetcher,
}

impl TigrisClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self {
            authenticator: SessionAuthenticator::with_http_client(config.clone(), http.clone()),
            fetcher: CalendarFetcher::with_http_client(config, http),
        })
    }

    /// Run the login chain and return the resulting session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        self.authenticator.login(email, password).await
    }

    /// Fetch calendar events for the given window.
    pub async fn fetch_calendar<Tz: TimeZone>(
        &self,
        session: &Session,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> Result<Vec<CalendarEvent>> {
        self.fetcher.fetch_calendar(session, start, end).await
    }

    /// Fetch calendar events restricted to the caller's own teammates.
    pub async fn fetch_teammate_calendar<Tz: TimeZone>(
        &self,
        session: &Session,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> Result<Vec<CalendarEvent>> {
        self.fetcher.fetch_teammate_calendar(session, start, end).await
    }
}
