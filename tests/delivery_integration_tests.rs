use std::time::Duration;

use missive::core::form::FormSnapshot;
use missive::delivery::{
    Credentials, DeliveryError, DeliveryProvider, DeliveryRequest, EmailJsProvider, deliver,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn credentials() -> Credentials {
    Credentials {
        service_id: "service_abc".to_string(),
        template_id: "template_xyz".to_string(),
        public_key: "pk_123".to_string(),
        private_key: None,
    }
}

fn fields() -> FormSnapshot {
    FormSnapshot {
        name: "Ada".to_string(),
        email: "ada@x.com".to_string(),
        title: "Hi".to_string(),
        message: "Hello".to_string(),
    }
}

async fn send_to(server: &MockServer, credentials: &Credentials) -> Result<(), DeliveryError> {
    let provider = EmailJsProvider::new(Some(server.uri()));
    let fields = fields();
    provider
        .send(DeliveryRequest {
            credentials,
            fields: &fields,
        })
        .await
}

// ============================================================================
// EmailJS Provider Tests
// ============================================================================

#[tokio::test]
async fn test_emailjs_posts_expected_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/email/send"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "service_id": "service_abc",
            "template_id": "template_xyz",
            "user_id": "pk_123",
            "template_params": {
                "name": "Ada",
                "email": "ada@x.com",
                "title": "Hi",
                "message": "Hello"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert_ok!(send_to(&mock_server, &credentials()).await);
}

#[tokio::test]
async fn test_emailjs_sends_access_token_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/email/send"))
        .and(body_json(json!({
            "service_id": "service_abc",
            "template_id": "template_xyz",
            "user_id": "pk_123",
            "accessToken": "secret",
            "template_params": {
                "name": "Ada",
                "email": "ada@x.com",
                "title": "Hi",
                "message": "Hello"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let credentials = Credentials {
        private_key: Some("secret".to_string()),
        ..credentials()
    };
    assert_ok!(send_to(&mock_server, &credentials).await);
}

#[tokio::test]
async fn test_emailjs_client_error_carries_status_and_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/email/send"))
        .respond_with(ResponseTemplate::new(400).set_body_string("The Public Key is invalid"))
        .mount(&mock_server)
        .await;

    let err = assert_err!(send_to(&mock_server, &credentials()).await);
    match err {
        DeliveryError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "The Public Key is invalid");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_emailjs_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/email/send"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = assert_err!(send_to(&mock_server, &credentials()).await);
    assert!(matches!(err, DeliveryError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_emailjs_empty_credential_never_hits_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let credentials = Credentials {
        template_id: "  ".to_string(),
        ..credentials()
    };
    let err = assert_err!(send_to(&mock_server, &credentials).await);
    assert!(matches!(err, DeliveryError::Config(_)));
}

#[tokio::test]
async fn test_emailjs_connection_refused_is_network_error() {
    // Grab a free port, then close it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let provider = EmailJsProvider::new(Some(format!("http://127.0.0.1:{port}")));
    let credentials = credentials();
    let fields = fields();
    let err = assert_err!(
        provider
            .send(DeliveryRequest {
                credentials: &credentials,
                fields: &fields,
            })
            .await
    );
    assert!(matches!(err, DeliveryError::Network(_)));
}

// ============================================================================
// Deadline Tests
// ============================================================================

#[tokio::test]
async fn test_deliver_times_out_slow_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/email/send"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let provider = EmailJsProvider::new(Some(mock_server.uri()));
    let credentials = credentials();
    let fields = fields();
    let timeout = Duration::from_millis(200);

    let err = assert_err!(
        deliver(
            &provider,
            DeliveryRequest {
                credentials: &credentials,
                fields: &fields,
            },
            timeout,
        )
        .await
    );
    assert!(matches!(err, DeliveryError::Timeout(t) if t == timeout));
}

#[tokio::test]
async fn test_deliver_passes_through_fast_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let provider = EmailJsProvider::new(Some(format!("{}/", mock_server.uri())));
    let credentials = credentials();
    let fields = fields();

    assert_ok!(
        deliver(
            &provider,
            DeliveryRequest {
                credentials: &credentials,
                fields: &fields,
            },
            Duration::from_secs(5),
        )
        .await
    );
}
