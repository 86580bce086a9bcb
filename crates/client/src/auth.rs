//! Session authentication
//!
//! The portal has no documented API; the login chain below was recovered from
//! its frontend. Three sequential calls, each feeding the next:
//!
//! 1. POST credentials to the portal login endpoint, yielding `siteId` and
//!    `sessionId` in a JSON envelope.
//! 2. GET the index endpoint with the session cookie; its `data` field is an
//!    SSO URL whose query embeds a second, fixed credential.
//! 3. POST the extracted parameters to the SSO URL's host, activating the
//!    session against the secondary API host.
//!
//! The `siteId` and the SSO constant password are master credentials: they
//! are wrapped in `SecretString` on arrival and never reach logs or errors.

use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tigris_domain::constants::{
    API_SESSION_COOKIE, INDEX_PATH, LOGIN_PATH, LOGIN_TIME_ZONE, NO_MATCHING_DATA_PATH,
    PORTAL_SESSION_COOKIE,
};
use tigris_domain::{Result, Session, TigrisError};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::http::{decode_json, HttpClient};

/// JSON envelope returned by the portal login endpoint.
#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    #[serde(default)]
    site_id: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

/// JSON envelope returned by the index endpoint; `data` is the SSO URL.
#[derive(Debug, Deserialize)]
struct IndexEnvelope {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

/// Parameters extracted from the SSO URL's query string, plus the bare
/// activation endpoint (host + path, query stripped).
struct SsoParams {
    endpoint: Url,
    site_id: String,
    user_mail_id: String,
    login_user_id: String,
    login_password: SecretString,
    multi_lang_cd: Option<String>,
}

/// Performs the full login chain and produces a [`Session`].
pub struct SessionAuthenticator {
    http: HttpClient,
    config: ClientConfig,
}

impl SessionAuthenticator {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Reuse an existing transport (shared with the calendar fetcher).
    pub fn with_http_client(config: ClientConfig, http: HttpClient) -> Self {
        Self { http, config }
    }

    /// Perform the full login chain.
    ///
    /// # Errors
    /// `Auth` when the portal rejects the credentials, `Transport` on network
    /// failure, `Parse` when an envelope does not match the recovered shape.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let (site_id, session_id) = self.portal_login(email, password).await?;
        let sso = self.fetch_sso_params(&session_id).await?;
        let activated = self.activate_sso(&sso).await?;

        // The activation host may rotate the session token via Set-Cookie;
        // prefer its value over the portal-issued one.
        let session_id = activated.unwrap_or(session_id);
        debug!("session activated against secondary host");

        Ok(Session::new(site_id, session_id))
    }

    /// Step 1: credential login against the portal host.
    async fn portal_login(&self, email: &str, password: &str) -> Result<(SecretString, String)> {
        let url = format!("{}{}", self.config.portal_base_url, LOGIN_PATH);
        let request = self.http.request(Method::POST, &url).form(&[
            ("loginId", email),
            ("passwd", password),
            // Placeholders the portal frontend always submits verbatim.
            ("siteId", ""),
            ("timeZone", LOGIN_TIME_ZONE),
            ("recaptchaToken", ""),
        ]);

        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TigrisError::Remote {
                code: status.as_u16().to_string(),
                message: "login endpoint returned an unexpected status".into(),
            });
        }

        // The portal answers HTTP 200 on bad credentials too; only the
        // envelope code tells success apart from failure.
        let envelope: LoginEnvelope = decode_json(response, "login").await?;
        if envelope.code != 0 {
            return Err(TigrisError::Auth {
                code: Some(envelope.code.to_string()),
                message: envelope.message.unwrap_or_else(|| "credentials rejected".into()),
            });
        }

        let data = envelope
            .data
            .ok_or_else(|| TigrisError::Parse("login envelope is missing its data object".into()))?;
        let site_id = data
            .site_id
            .filter(|v| !v.is_empty())
            .map(SecretString::new)
            .ok_or_else(|| TigrisError::Parse("login envelope is missing siteId".into()))?;
        let session_id = data
            .session_id
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TigrisError::Parse("login envelope is missing sessionId".into()))?;

        debug!("portal login accepted");
        Ok((site_id, session_id))
    }

    /// Step 2: fetch the SSO URL from the index endpoint and pull the
    /// activation parameters out of its query string.
    async fn fetch_sso_params(&self, session_id: &str) -> Result<SsoParams> {
        let url = format!("{}{}", self.config.portal_base_url, INDEX_PATH);
        let request = self
            .http
            .request(Method::GET, &url)
            .header(COOKIE, format!("{PORTAL_SESSION_COOKIE}={session_id}"));

        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TigrisError::Remote {
                code: status.as_u16().to_string(),
                message: "index endpoint returned an unexpected status".into(),
            });
        }

        let envelope: IndexEnvelope = decode_json(response, "index").await?;
        if envelope.code != 0 {
            return Err(TigrisError::Remote {
                code: envelope.code.to_string(),
                message: envelope.message.unwrap_or_else(|| "index request rejected".into()),
            });
        }

        let raw_url = envelope
            .data
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TigrisError::Parse("index envelope is missing the SSO URL".into()))?;
        let sso_url =
            Url::parse(&raw_url).map_err(|err| TigrisError::from(ClientError::from(err)))?;

        // The query carries the credentials; it moves into the form body and
        // the stripped URL becomes the activation endpoint. The raw URL must
        // never surface in logs or error text.
        let mut endpoint = sso_url.clone();
        endpoint.set_query(None);

        Ok(SsoParams {
            site_id: required_query_param(&sso_url, "siteId")?,
            user_mail_id: required_query_param(&sso_url, "userMailId")?,
            login_user_id: required_query_param(&sso_url, "loginUserId")?,
            login_password: SecretString::new(required_query_param(&sso_url, "loginPassword")?),
            multi_lang_cd: query_param(&sso_url, "multiLangCd"),
            endpoint,
        })
    }

    /// Step 3: POST the extracted parameters to the SSO host. Success is
    /// implied by anything that is not a redirect to the error page.
    async fn activate_sso(&self, sso: &SsoParams) -> Result<Option<String>> {
        let mut form: Vec<(&str, &str)> = vec![
            ("siteId", sso.site_id.as_str()),
            ("userMailId", sso.user_mail_id.as_str()),
            ("loginUserId", sso.login_user_id.as_str()),
            ("loginPassword", sso.login_password.expose_secret()),
        ];
        if let Some(lang) = &sso.multi_lang_cd {
            form.push(("multiLangCd", lang));
        }

        let request = self.http.request(Method::POST, sso.endpoint.clone()).form(&form);
        let response = self.http.send(request).await?;
        let status = response.status();

        if status.is_redirection() {
            if redirect_location(&response).is_some_and(|loc| loc.contains(NO_MATCHING_DATA_PATH)) {
                return Err(TigrisError::Auth {
                    code: None,
                    message: "SSO activation rejected the session".into(),
                });
            }
            // Redirect to the main page is the normal success path.
            return Ok(extract_set_cookie(&response, API_SESSION_COOKIE));
        }

        if status.is_success() {
            return Ok(extract_set_cookie(&response, API_SESSION_COOKIE));
        }

        Err(TigrisError::Remote {
            code: status.as_u16().to_string(),
            message: "SSO activation returned an unexpected status".into(),
        })
    }
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs().find(|(key, _)| key == name).map(|(_, value)| value.into_owned())
}

fn required_query_param(url: &Url, name: &str) -> Result<String> {
    query_param(url, name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| TigrisError::Parse(format!("SSO URL is missing parameter {name}")))
}

pub(crate) fn redirect_location(response: &Response) -> Option<&str> {
    response.headers().get("Location").and_then(|value| value.to_str().ok())
}

/// Pull a cookie value out of the response's `Set-Cookie` headers. Cookies
/// are carried explicitly between steps instead of through a transport jar.
pub(crate) fn extract_set_cookie(response: &Response, name: &str) -> Option<String> {
    response.headers().get_all(SET_COOKIE).iter().find_map(|header| {
        let raw = header.to_str().ok()?;
        let pair = raw.split(';').next()?;
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name && !value.is_empty()).then(|| value.to_string())
    })
}
