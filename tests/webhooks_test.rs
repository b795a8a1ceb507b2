// ABOUTME: Push subscription tests against a mock Strava server
// ABOUTME: Covers config fallbacks, missing defaults, listing, local lookups and deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, mock_config, subscription_json};
use serde_json::json;
use strava_client::{config::StravaConfig, StravaClient, StravaError};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CALLBACK_URL: &str = "https://example.com/strava/webhook";

async fn client_with(server: &MockServer, config: StravaConfig) -> StravaClient {
    let client = StravaClient::new(config).unwrap();
    client.set_tokens("access-1", "refresh-1").await.unwrap();
    assert!(server.received_requests().await.unwrap().is_empty());
    client
}

async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v3/push_subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            subscription_json(1, CALLBACK_URL),
            subscription_json(2, "https://example.com/other"),
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_uses_configured_defaults() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/push_subscriptions"))
        .and(body_json(json!({
            "callback_url": CALLBACK_URL,
            "verify_token": "verify-me"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(subscription_json(120_475, CALLBACK_URL)))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server.uri()).with_webhook(CALLBACK_URL, "verify-me");
    let client = client_with(&server, config).await;
    let subscription = client
        .webhooks()
        .create_subscription(None, None)
        .await
        .unwrap();

    assert_eq!(subscription.id, 120_475);
    assert_eq!(subscription.callback_url, CALLBACK_URL);
}

#[tokio::test]
async fn test_create_arguments_override_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/push_subscriptions"))
        .and(body_json(json!({
            "callback_url": "https://example.com/explicit",
            "verify_token": "verify-me"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(subscription_json(7, "https://example.com/explicit")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server.uri()).with_webhook(CALLBACK_URL, "verify-me");
    let client = client_with(&server, config).await;
    let subscription = client
        .webhooks()
        .create_subscription(Some("https://example.com/explicit"), None)
        .await
        .unwrap();

    assert_eq!(subscription.id, 7);
}

#[tokio::test]
async fn test_create_without_callback_url_makes_no_calls() {
    let server = MockServer::start().await;
    let client = client_with(&server, mock_config(&server.uri())).await;

    let err = client
        .webhooks()
        .create_subscription(None, Some("verify-me"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StravaError::MissingConfiguration {
            key: "webhook.callback_url"
        }
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_without_verify_token_makes_no_calls() {
    let server = MockServer::start().await;
    let client = client_with(&server, mock_config(&server.uri())).await;

    let err = client
        .webhooks()
        .create_subscription(Some(CALLBACK_URL), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StravaError::MissingConfiguration {
            key: "webhook.verify_token"
        }
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_and_find_subscriptions() {
    init_test_logging();
    let server = MockServer::start().await;
    mount_listing(&server).await;
    let client = client_with(&server, mock_config(&server.uri())).await;
    let webhooks = client.webhooks();

    let all = webhooks.list_subscriptions().await.unwrap();
    assert_eq!(all.iter().map(|s| s.id).collect::<Vec<_>>(), [1, 2]);
    assert_eq!(all[0].callback_url, CALLBACK_URL);

    let found = webhooks.find_subscription(2).await.unwrap().unwrap();
    assert_eq!(found.callback_url, "https://example.com/other");

    assert!(webhooks.find_subscription(99).await.unwrap().is_none());
    assert_eq!(webhooks.first_subscription().await.unwrap().unwrap().id, 1);
    assert!(webhooks.subscriptions_exist().await.unwrap());

    // every lookup lists again; there is no single-subscription endpoint
    assert_eq!(server.received_requests().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_empty_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/push_subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let client = client_with(&server, mock_config(&server.uri())).await;

    assert!(!client.webhooks().subscriptions_exist().await.unwrap());
    assert!(client.webhooks().first_subscription().await.unwrap().is_none());
}

#[tokio::test]
async fn test_non_array_listing_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/push_subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;
    let client = client_with(&server, mock_config(&server.uri())).await;

    let err = client.webhooks().list_subscriptions().await.unwrap_err();
    assert!(matches!(err, StravaError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_delete_subscription() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/push_subscriptions/120475"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/push_subscriptions/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Resource Not Found"})))
        .mount(&server)
        .await;
    let client = client_with(&server, mock_config(&server.uri())).await;

    assert!(client.webhooks().delete_subscription(120_475).await.unwrap());
    assert!(matches!(
        client.webhooks().delete_subscription(99).await,
        Err(StravaError::NotFound { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_delete_with_zero_id_makes_no_calls() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = client_with(&server, mock_config(&server.uri())).await;

    let err = client.webhooks().delete_subscription(0).await.unwrap_err();

    assert!(matches!(err, StravaError::InvalidArgument { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}
