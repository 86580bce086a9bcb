//! End-to-end flow against a mock portal: login chain followed by a 4-week
//! calendar fetch over one shared transport.

use chrono::{Duration, Utc};
use tigris_client::{ClientConfig, TigrisClient, TigrisError};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_portal(server: &MockServer) {
    // Step 1: credential login
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string_contains("loginId=user%40example.com"))
        .and(body_string_contains("timeZone=Asia%2FSeoul"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "message": "SUCCESS",
            "data": { "siteId": "site-1", "sessionId": "portal-session" }
        })))
        .mount(server)
        .await;

    // Step 2: index hands out the SSO URL
    let sso_url = format!(
        "{}/cloudSsologinUser.do?siteId=site-1&userMailId=user@example.com\
         &loginUserId=user@example.com&loginPassword=const-pw&multiLangCd=ko",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/hr/index"))
        .and(header("Cookie", "_tigris_sid=portal-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "message": "SUCCESS",
            "data": sso_url
        })))
        .mount(server)
        .await;

    // Step 3: SSO activation redirects to the main page and rotates the token
    Mock::given(method("POST"))
        .and(path("/cloudSsologinUser.do"))
        .and(body_string_contains("loginPassword=const-pw"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", "/Main.do?result=")
                .insert_header("Set-Cookie", "JSESSIONID=api-session; Path=/; HttpOnly"),
        )
        .mount(server)
        .await;
}

async fn mount_calendar(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/chkLoginSession.do"))
        .and(header("Cookie", "JSESSIONID=api-session"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "loginInfo": "Login!" })),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/setLocationProgCdforLog.do"))
        .and(body_string_contains("progCd=TAA-0370"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/TAADclzVcatnCldrMgr.do"))
        .and(query_param("cmd", "getTAADclzVcatnCldrMgr"))
        .and(header("Cookie", "JSESSIONID=api-session; colShowYn=N"))
        .and(body_string_contains("orgSearchType=N"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Message": "SUCCESS",
            "DATA": [
                {
                    "kind": "vacation",
                    "title": "Annual leave",
                    "leavNm": "Annual",
                    "leavCd": 10,
                    "personInfo": "Engineering/Lead/Senior/Full-time",
                    "staYmd": "2024-03-04",
                    "endYmd": "2024-03-05",
                    "allDay": "N",
                    "staHm": "T09:00:00",
                    "endHm": "T18:00:00",
                    "reqStatusCd": "C",
                    "reason": "Family trip"
                },
                {
                    "kind": "half-day",
                    "title": "Morning off",
                    "leavNm": "Half day",
                    "leavCd": 21,
                    "personInfo": "Sales/Member/Junior/Full-time",
                    "staYmd": "2024-03-07",
                    "endYmd": "2024-03-07",
                    "allDay": false,
                    "staHm": "T09:00:00",
                    "endHm": "T13:00:00"
                },
                {
                    "kind": "holiday",
                    "title": "Company foundation day",
                    "personInfo": "///",
                    "staYmd": "20240315",
                    "endYmd": "20240315",
                    "allDay": true
                }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_then_fetch_four_week_window() {
    let server = MockServer::start().await;
    mount_portal(&server).await;
    mount_calendar(&server).await;

    let config = ClientConfig::default()
        .with_portal_base_url(server.uri())
        .with_api_base_url(server.uri());
    let client = TigrisClient::new(config).expect("client");

    let session = client.login("user@example.com", "hunter2").await.expect("session");
    assert!(session.is_authenticated());
    assert_eq!(session.session_id(), "api-session");

    let start = Utc::now();
    let events =
        client.fetch_calendar(&session, start, start + Duration::weeks(4)).await.expect("events");

    assert_eq!(events.len(), 3);
    for event in &events {
        assert!(event.start_date <= event.end_date);
        if !event.all_day {
            assert!(event.start_time.is_some(), "timed event missing start time");
            assert!(event.end_time.is_some(), "timed event missing end time");
        }
    }

    let global: Vec<_> = events.iter().filter(|e| e.is_global()).collect();
    assert_eq!(global.len(), 1);
    assert_eq!(global[0].title, "Company foundation day");
    assert_eq!(global[0].person, None);

    let person = events[0].person.as_ref().expect("person");
    assert_eq!(person.organization.as_deref(), Some("Engineering"));
    assert_eq!(person.work_type.as_deref(), Some("Full-time"));

    // Same session reused for a second fetch without re-activation
    let again =
        client.fetch_calendar(&session, start, start + Duration::weeks(1)).await.expect("events");
    assert_eq!(again.len(), 3);
}

#[tokio::test]
async fn expired_session_surfaces_auth_error_on_fetch() {
    let server = MockServer::start().await;
    mount_portal(&server).await;

    // Session check passes, but the search itself bounces to the error page.
    Mock::given(method("GET"))
        .and(path("/chkLoginSession.do"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "loginInfo": "Login!" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/setLocationProgCdforLog.do"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/TAADclzVcatnCldrMgr.do"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/Error.do?code=403"))
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_portal_base_url(server.uri())
        .with_api_base_url(server.uri());
    let client = TigrisClient::new(config).expect("client");

    let session = client.login("user@example.com", "hunter2").await.expect("session");
    let start = Utc::now();
    let err = client.fetch_calendar(&session, start, start + Duration::weeks(4)).await.unwrap_err();

    match err {
        TigrisError::Auth { code, .. } => assert_eq!(code.as_deref(), Some("403")),
        other => panic!("expected auth error, got {other:?}"),
    }
}
