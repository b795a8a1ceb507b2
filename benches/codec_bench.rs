// ABOUTME: Criterion benchmarks for the Strava record codecs and status classifier
// ABOUTME: Measures subscription list decoding, webhook event decoding and classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

//! Criterion benchmarks for decoding Strava payloads.

#![allow(clippy::unwrap_used, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::{json, Value};
use strava_client::{classify, Subscription, WebhookEvent};

fn subscription_list(count: u64) -> Value {
    Value::Array(
        (1..=count)
            .map(|id| {
                json!({
                    "id": id,
                    "resource_state": 2,
                    "application_id": 4321,
                    "callback_url": format!("https://example.com/hooks/{id}"),
                    "created_at": "2024-03-01T10:00:00Z",
                    "updated_at": "2024-03-02T11:30:00Z"
                })
            })
            .collect(),
    )
}

fn bench_subscription_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_subscriptions");

    for count in [1_u64, 10, 100] {
        let payload = subscription_list(count);
        group.throughput(Throughput::Elements(count));
        group.bench_function(format!("list_{count}"), |b| {
            b.iter(|| Subscription::list_from_json(black_box(&payload)).unwrap());
        });
    }

    group.finish();
}

fn bench_webhook_event_decoding(c: &mut Criterion) {
    let activity_event = json!({
        "aspect_type": "update",
        "event_time": 1_516_126_040,
        "object_id": 1_360_128_428,
        "object_type": "activity",
        "owner_id": 134_815,
        "subscription_id": 120_475,
        "updates": {"title": "Messy", "type": "Ride"}
    });
    let deauthorization = json!({
        "aspect_type": "update",
        "event_time": 1_516_126_040,
        "object_id": 134_815,
        "object_type": "athlete",
        "owner_id": 134_815,
        "subscription_id": 120_475,
        "updates": {"authorized": "false"}
    });

    let mut group = c.benchmark_group("decode_webhook_event");
    group.bench_function("activity_update", |b| {
        b.iter(|| WebhookEvent::from_json(black_box(&activity_event)).unwrap());
    });
    group.bench_function("deauthorization", |b| {
        b.iter(|| {
            WebhookEvent::from_json(black_box(&deauthorization))
                .unwrap()
                .is_deauthorization()
        });
    });
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let statuses: Vec<u16> = vec![200, 204, 400, 401, 404, 418, 429, 500, 502, 503, 504];
    c.bench_function("classify_statuses", |b| {
        b.iter(|| {
            statuses
                .iter()
                .filter_map(|status| classify(black_box(*status)))
                .count()
        });
    });
}

criterion_group!(
    benches,
    bench_subscription_decoding,
    bench_webhook_event_decoding,
    bench_classify
);
criterion_main!(benches);
