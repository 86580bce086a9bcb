//! Conversions from external transport errors into domain errors.

use reqwest::Error as HttpError;
use tigris_domain::TigrisError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the client side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct ClientError(pub TigrisError);

impl From<ClientError> for TigrisError {
    fn from(value: ClientError) -> Self {
        value.0
    }
}

impl From<TigrisError> for ClientError {
    fn from(value: TigrisError) -> Self {
        ClientError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TigrisError */
/* -------------------------------------------------------------------------- */

/// Transport failures stay `Transport` whatever their flavor (connect,
/// timeout, body). They are never reinterpreted into another error kind, so
/// timeout/cancellation signals reach the caller unchanged.
impl From<HttpError> for ClientError {
    fn from(err: HttpError) -> Self {
        let detail = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            format!("http failure: {err}")
        };
        ClientError(TigrisError::Transport(detail))
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → TigrisError */
/* -------------------------------------------------------------------------- */

/// Malformed URLs in server responses are contract drift, not network
/// failures. The offending URL is deliberately not echoed: the SSO URL
/// embeds credentials.
impl From<UrlError> for ClientError {
    fn from(err: UrlError) -> Self {
        ClientError(TigrisError::Parse(format!("server returned an unparseable URL: {err}")))
    }
}
