//! Service clients end to end against a scripted transport.

mod support;

use glide_common::testing::token_with_operator;
use glide_core::testing::{MockTransport, RecordingMetricsSink};
use glide_core::transport_ports::AUTHORIZATION;
use glide_core::{KycMatchClient, MagicAuthClient, NumberVerifyClient, SimSwapClient, TelcoFinderClient};
use glide_domain::constants::{
    BACKCHANNEL_AUTH_PATH, KYC_MATCH_PATH, MAGIC_AUTH_CHECK_PATH, MAGIC_AUTH_CHECK_SERVER_AUTH_PATH,
    MAGIC_AUTH_START_PATH, NUMBER_VERIFY_PATH, SIM_SWAP_CHECK_PATH, SIM_SWAP_RETRIEVE_DATE_PATH,
    TELCO_FINDER_NETWORK_ID_PATH, TELCO_FINDER_SEARCH_PATH, TOKEN_PATH,
};
use glide_domain::{
    ApiConfig, GlideError, InternalSettings, KycMatchProps, MagicAuthStartProps, MagicAuthVerifyProps,
    NumberVerifyAuthUrlInput, NumberVerifyClientForParams, ServerAuthStatus, Settings, SimSwapCheckParams,
    SimSwapRetrieveDateParams, UserIdentifier,
};
use serde_json::json;
use support::{context, context_with, json_body, settings, token_body};
use url::Url;

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

// Number verify

#[test]
fn auth_url_carries_oauth_parameters() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    let client = NumberVerifyClient::new(context(&transport, &metrics));

    let url = client
        .auth_url(&NumberVerifyAuthUrlInput {
            state: Some("state-1".into()),
            use_dev_number: Some("+15550100".into()),
            print_code: true,
        })
        .unwrap();

    let url = Url::parse(&url).unwrap();
    assert_eq!(url.path(), "/oauth2/auth");
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let keys: Vec<&str> = query.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        [
            "client_id",
            "response_type",
            "redirect_uri",
            "scope",
            "purpose",
            "state",
            "nonce",
            "max_age",
            "login_hint",
            "dev_print"
        ]
    );
    let get = |key: &str| query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
    assert_eq!(get("client_id"), Some("test-client"));
    assert_eq!(get("scope"), Some("openid"));
    assert_eq!(get("purpose"), Some("dpv:FraudPreventionAndDetection:number-verification"));
    assert_eq!(get("state"), Some("state-1"));
    assert_eq!(get("max_age"), Some("0"));
    assert_eq!(get("login_hint"), Some("tel:+15550100"));
    assert!(get("nonce").is_some_and(|n| !n.is_empty()));
}

#[test]
fn auth_url_generates_state_and_omits_optional_parameters() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    let settings = Settings { redirect_uri: String::new(), ..settings() };
    let client = NumberVerifyClient::new(context_with(settings, &transport, &metrics));

    let url = Url::parse(&client.auth_url(&NumberVerifyAuthUrlInput::default()).unwrap()).unwrap();
    let keys: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();

    assert!(keys.contains(&"state".to_string()));
    assert!(!keys.contains(&"redirect_uri".to_string()));
    assert!(!keys.contains(&"login_hint".to_string()));
    assert!(!keys.contains(&"dev_print".to_string()));
}

#[test]
fn auth_url_requires_client_id() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    let settings = Settings { client_id: String::new(), ..settings() };
    let client = NumberVerifyClient::new(context_with(settings, &transport, &metrics));

    let err = client.auth_url(&NumberVerifyAuthUrlInput::default()).unwrap_err();
    assert!(matches!(err, GlideError::Configuration(msg) if msg.contains("client id")));
}

#[tokio::test]
async fn number_verify_end_to_end() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    let access_token = token_with_operator("TestOperator");
    transport
        .on_post(TOKEN_PATH, 200, token_body(&access_token, "openid"))
        .on_post(NUMBER_VERIFY_PATH, 200, json!({"devicePhoneNumberVerified": true}));

    let client = NumberVerifyClient::new(context(&transport, &metrics));
    let user = client
        .for_user(NumberVerifyClientForParams { code: "auth-code".into(), phone_number: Some("+1 555 0100".into()) })
        .await
        .unwrap();

    assert_eq!(user.operator().await.unwrap(), "TestOperator");

    let conf = ApiConfig::new().with_session_identifier("sess-1");
    let response = user.verify_number(None, &conf).await.unwrap();
    assert!(response.device_phone_number_verified);

    let calls = transport.requests_to(NUMBER_VERIFY_PATH);
    assert_eq!(calls.len(), 1);
    assert_eq!(json_body(&calls[0]), json!({"phoneNumber": "+15550100"}));
    assert_eq!(calls[0].header_value(AUTHORIZATION), Some(format!("Bearer {access_token}").as_str()));

    let exchanges = transport.requests_to(TOKEN_PATH);
    let form = exchanges[0].body.clone().unwrap_or_default();
    assert!(form.contains("grant_type=authorization_code"));
    assert!(form.contains("code=auth-code"));

    assert_eq!(
        sorted(metrics.names()),
        ["Glide numberVerify start function", "Glide success", "Glide verified"]
    );
    let events = metrics.events();
    let start = events.iter().find(|e| e.metric_name == "Glide numberVerify start function").unwrap();
    assert_eq!(start.operator, "TestOperator");
    assert_eq!(start.api, "number-verify");
    assert_eq!(start.session_id, "sess-1");
    assert_eq!(start.client_id, "test-client");
}

#[tokio::test]
async fn number_verify_argument_overrides_bound_number_and_skips_metrics() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport
        .on_post(TOKEN_PATH, 200, token_body(&token_with_operator("Op"), "openid"))
        .on_post(NUMBER_VERIFY_PATH, 200, json!({"devicePhoneNumberVerified": false}));

    let client = NumberVerifyClient::new(context(&transport, &metrics));
    let user = client
        .for_user(NumberVerifyClientForParams { code: "c".into(), phone_number: Some("111".into()) })
        .await
        .unwrap();

    let response = user.verify_number(Some("222"), &ApiConfig::new()).await.unwrap();
    assert!(!response.device_phone_number_verified);
    assert_eq!(json_body(&transport.requests_to(NUMBER_VERIFY_PATH)[0]), json!({"phoneNumber": "+222"}));
    assert!(metrics.names().is_empty());
}

#[tokio::test]
async fn number_verify_requires_a_phone_number() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport.on_post(TOKEN_PATH, 200, token_body("tok", "openid"));

    let client = NumberVerifyClient::new(context(&transport, &metrics));
    let user = client.for_user(NumberVerifyClientForParams { code: "c".into(), phone_number: None }).await.unwrap();

    let err = user.verify_number(None, &ApiConfig::new()).await.unwrap_err();
    assert!(matches!(err, GlideError::InvalidInput(_)));
    assert_eq!(transport.count(NUMBER_VERIFY_PATH), 0);
}

#[tokio::test]
async fn number_verify_rejected_code_fails_for_user() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport.on_post(TOKEN_PATH, 400, json!({"error": "invalid_grant"}));

    let client = NumberVerifyClient::new(context(&transport, &metrics));
    let err = client
        .for_user(NumberVerifyClientForParams { code: "used".into(), phone_number: None })
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), Some(400));
}

// SIM swap

#[tokio::test]
async fn sim_swap_check_uses_bound_number_and_max_age() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport
        .on_post(BACKCHANNEL_AUTH_PATH, 200, json!({"auth_req_id": "req-1"}))
        .on_post(TOKEN_PATH, 200, token_body("sim-token", "sim-swap"))
        .on_post(SIM_SWAP_CHECK_PATH, 200, json!({"swapped": true}))
        .on_post(SIM_SWAP_RETRIEVE_DATE_PATH, 200, json!({"latestSimChange": "2024-01-02T03:04:05Z"}));

    let client = SimSwapClient::new(context(&transport, &metrics));
    let user = client.for_user(UserIdentifier::phone("+55 (51) 2345-6789")).await.unwrap();
    assert!(!user.requires_consent());

    let check = user
        .check(&SimSwapCheckParams { phone_number: None, max_age: Some(24) }, &ApiConfig::new())
        .await
        .unwrap();
    assert!(check.swapped);
    assert_eq!(
        json_body(&transport.requests_to(SIM_SWAP_CHECK_PATH)[0]),
        json!({"phoneNumber": "+555123456789", "maxAge": 24})
    );

    let date = user
        .retrieve_date(&SimSwapRetrieveDateParams { phone_number: Some("5550100".into()) }, &ApiConfig::new())
        .await
        .unwrap();
    assert_eq!(date.latest_sim_change, "2024-01-02T03:04:05Z");
    assert_eq!(
        json_body(&transport.requests_to(SIM_SWAP_RETRIEVE_DATE_PATH)[0]),
        json!({"phoneNumber": "+5550100"})
    );

    // One backchannel start, one token exchange shared by both calls.
    assert_eq!(transport.count(BACKCHANNEL_AUTH_PATH), 1);
    assert_eq!(transport.count(TOKEN_PATH), 1);
}

#[tokio::test]
async fn sim_swap_not_found_names_the_number() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport
        .on_post(BACKCHANNEL_AUTH_PATH, 200, json!({"auth_req_id": "req-1"}))
        .on_post(TOKEN_PATH, 200, token_body("sim-token", "sim-swap"))
        .on_post(SIM_SWAP_CHECK_PATH, 404, json!({"message": "unknown"}));

    let client = SimSwapClient::new(context(&transport, &metrics));
    let user = client.for_user(UserIdentifier::phone("5550100")).await.unwrap();

    let err = user.check(&SimSwapCheckParams::default(), &ApiConfig::new()).await.unwrap_err();
    match err {
        GlideError::NotFound { resource, subject } => {
            assert_eq!(resource, "network id");
            assert_eq!(subject, "5550100");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn sim_swap_without_phone_identifier_needs_explicit_number() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport.on_post(
        BACKCHANNEL_AUTH_PATH,
        200,
        json!({"auth_req_id": "req-1", "consentUrl": "https://consent"}),
    );

    let client = SimSwapClient::new(context(&transport, &metrics));
    let user = client.for_user(UserIdentifier::ip("10.0.0.1")).await.unwrap();
    assert!(user.requires_consent());
    assert_eq!(user.consent_url().as_deref(), Some("https://consent"));

    let err = user.check(&SimSwapCheckParams::default(), &ApiConfig::new()).await.unwrap_err();
    assert!(matches!(err, GlideError::InvalidInput(_)));
    assert_eq!(transport.count(TOKEN_PATH), 0);
}

#[tokio::test]
async fn missing_api_base_url_is_a_configuration_error() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport.on_post(BACKCHANNEL_AUTH_PATH, 200, json!({"auth_req_id": "req-1"}));
    let settings = Settings {
        internal: InternalSettings { api_base_url: String::new(), ..settings().internal },
        ..settings()
    };

    let client = SimSwapClient::new(context_with(settings, &transport, &metrics));
    let user = client.for_user(UserIdentifier::phone("5550100")).await.unwrap();

    let err = user.check(&SimSwapCheckParams::default(), &ApiConfig::new()).await.unwrap_err();
    assert!(matches!(err, GlideError::Configuration(msg) if msg == "internal.apiBaseUrl is unset"));
}

// KYC match

#[tokio::test]
async fn kyc_match_defaults_missing_fields_and_reports_metrics() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport
        .on_post(BACKCHANNEL_AUTH_PATH, 200, json!({"auth_req_id": "req-1"}))
        .on_post(TOKEN_PATH, 200, token_body("kyc-token", "kyc-match"))
        .on_post(KYC_MATCH_PATH, 200, json!({"nameMatch": "true", "emailMatch": null}));

    let client = KycMatchClient::new(context(&transport, &metrics));
    let user = client.for_user(UserIdentifier::phone("5550100")).await.unwrap();

    let props = KycMatchProps {
        phone_number: "555 0100".into(),
        name: "Ada Lovelace".into(),
        postal_code: Some(12345),
        ..KycMatchProps::default()
    };
    let conf = ApiConfig::new().with_session_identifier("kyc-session");
    let response = user.match_user(&props, &conf).await.unwrap();

    assert_eq!(response.name_match, "true");
    assert_eq!(response.email_match, "not_available");
    assert_eq!(response.gender_match, "not_available");
    assert_eq!(
        json_body(&transport.requests_to(KYC_MATCH_PATH)[0]),
        json!({"phoneNumber": "+5550100", "name": "Ada Lovelace", "postalCode": 12345})
    );
    assert_eq!(sorted(metrics.names()), ["Glide match complete", "Glide start"]);
    assert!(metrics.events().iter().all(|e| e.api == "kyc-match"));
}

// Magic auth

#[tokio::test]
async fn magic_auth_start_reports_operator_from_response() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport
        .on_post(TOKEN_PATH, 200, token_body("ma-token", "magic-auth"))
        .on_post(
            MAGIC_AUTH_START_PATH,
            200,
            json!({"type": "MAGIC", "authUrl": "https://op/auth", "operatorId": "op-7"}),
        );

    let client = MagicAuthClient::new(context(&transport, &metrics));
    let props = MagicAuthStartProps {
        phone_number: "+1 555 0100".into(),
        email: "ignored@example.com".into(),
        redirect_url: "https://app/done".into(),
        ..MagicAuthStartProps::default()
    };
    let response = client.start_auth(&props, &ApiConfig::new().with_session_identifier("ma-1")).await.unwrap();

    assert_eq!(response.kind, "MAGIC");
    assert_eq!(response.auth_url.as_deref(), Some("https://op/auth"));
    assert_eq!(
        json_body(&transport.requests_to(MAGIC_AUTH_START_PATH)[0]),
        json!({"phoneNumber": "+15550100", "redirectUrl": "https://app/done"})
    );
    assert_eq!(sorted(metrics.names()), ["Glide start", "Glide verificationStartRes"]);
    let events = metrics.events();
    let res = events.iter().find(|e| e.metric_name == "Glide verificationStartRes").unwrap();
    assert_eq!(res.operator, "op-7");
}

#[tokio::test]
async fn magic_auth_verify_reuses_client_credentials_session() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport
        .on_post(TOKEN_PATH, 200, token_body("ma-token", "magic-auth"))
        .on_post(MAGIC_AUTH_CHECK_PATH, 200, json!({"verified": false}));

    let client = MagicAuthClient::new(context(&transport, &metrics));
    let props = MagicAuthVerifyProps { email: "user@example.com".into(), code: "123456".into(), ..Default::default() };
    let conf = ApiConfig::new().with_session_identifier("ma-2");

    assert!(!client.verify_auth(&props, &conf).await.unwrap().verified);
    assert!(!client.verify_auth(&props, &conf).await.unwrap().verified);

    assert_eq!(transport.count(TOKEN_PATH), 1);
    assert_eq!(
        json_body(&transport.requests_to(MAGIC_AUTH_CHECK_PATH)[0]),
        json!({"email": "user@example.com", "code": "123456"})
    );
    assert_eq!(
        sorted(metrics.names()),
        ["Glide success", "Glide success", "Glide unverified", "Glide unverified"]
    );
}

#[tokio::test]
async fn magic_auth_check_server_auth_sends_session_id_query() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport.on_post(TOKEN_PATH, 200, token_body("ma-token", "magic-auth")).on_json(
        glide_core::HttpMethod::Get,
        MAGIC_AUTH_CHECK_SERVER_AUTH_PATH,
        200,
        json!({"status": "COMPLETED", "verified": true}),
    );

    let client = MagicAuthClient::new(context(&transport, &metrics));
    let response = client.check_server_auth("srv 1", &ApiConfig::new()).await.unwrap();

    assert_eq!(response.status, ServerAuthStatus::Completed);
    assert!(response.verified);
    let calls = transport.requests_to(MAGIC_AUTH_CHECK_SERVER_AUTH_PATH);
    assert!(calls[0].url.ends_with("/magic-auth/verification/check-server-auth?sessionId=srv+1"));
    assert!(calls[0].body.is_none());
}

// Telco finder

#[tokio::test]
async fn telco_lookup_subjects_and_not_found() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport
        .on_post(TOKEN_PATH, 200, token_body("tf-token", "telco-finder"))
        .on_post(
            TELCO_FINDER_SEARCH_PATH,
            200,
            json!({
                "subject": "ipport:10.0.0.1",
                "properties": {"operator_Id": "OP1"},
                "links": [{"rel": "org.gsma.authorize", "href": "https://op/authorize"}]
            }),
        )
        .on_post(TELCO_FINDER_SEARCH_PATH, 404, json!({}));

    let client = TelcoFinderClient::new(context(&transport, &metrics));

    let found = client.lookup_ip("10.0.0.1", &ApiConfig::new()).await.unwrap();
    assert_eq!(found.properties.operator_id, "OP1");
    assert_eq!(found.link("org.gsma.authorize"), Some("https://op/authorize"));

    let err = client.lookup_number("555 0100", &ApiConfig::new()).await.unwrap_err();
    assert!(matches!(
        err,
        GlideError::NotFound { resource: "telco lookup", ref subject } if subject == "tel:+5550100"
    ));

    let bodies: Vec<_> = transport.requests_to(TELCO_FINDER_SEARCH_PATH).iter().map(json_body).collect();
    assert_eq!(bodies, [json!({"resource": "ipport:10.0.0.1"}), json!({"resource": "tel:+5550100"})]);
}

#[tokio::test]
async fn telco_network_id_not_found_names_the_number() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport
        .on_post(TOKEN_PATH, 200, token_body("tf-token", "telco-finder"))
        .on_post(TELCO_FINDER_NETWORK_ID_PATH, 404, json!({}));

    let client = TelcoFinderClient::new(context(&transport, &metrics));
    let err = client.network_id_for_number("5550100", &ApiConfig::new()).await.unwrap_err();

    assert!(matches!(
        err,
        GlideError::NotFound { resource: "network id", ref subject } if subject == "5550100"
    ));
}

#[tokio::test]
async fn telco_lookup_survives_oversized_token_lifetime() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport
        .on_post(
            TOKEN_PATH,
            200,
            json!({"access_token": "tf-token", "expires_in": 100_000_000_000_000_000_i64, "scope": "telco-finder"}),
        )
        .on_post(TELCO_FINDER_SEARCH_PATH, 200, json!({"subject": "tel:+5550100"}));

    let client = TelcoFinderClient::new(context(&transport, &metrics));
    client.lookup_number("5550100", &ApiConfig::new()).await.unwrap();
    let found = client.lookup_number("5550100", &ApiConfig::new()).await.unwrap();

    assert_eq!(found.subject, "tel:+5550100");
    assert_eq!(transport.count(TOKEN_PATH), 1);
}

#[tokio::test]
async fn telco_invalid_scope_surfaces_as_domain_error() {
    let transport = MockTransport::shared();
    let metrics = RecordingMetricsSink::shared();
    transport.on_post(TOKEN_PATH, 400, json!({"error": "invalid_scope"}));

    let client = TelcoFinderClient::new(context(&transport, &metrics));
    let err = client.network_id_for_number("5550100", &ApiConfig::new()).await.unwrap_err();

    assert!(matches!(err, GlideError::InvalidScope));
    assert_eq!(transport.count(TELCO_FINDER_NETWORK_ID_PATH), 0);
}
