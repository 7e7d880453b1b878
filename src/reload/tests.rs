// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::RestartPolicy;

fn fast_policy(max_restarts: u32) -> RestartPolicy {
    RestartPolicy::builder()
        .with_delay(Duration::from_millis(1))
        .with_max_restarts(max_restarts)
        .build()
}

#[test]
fn test_from_secs() {
    assert!(RestartPolicy::from_secs(0.0, 10).is_none());
    assert!(RestartPolicy::from_secs(-1.0, 10).is_none());
    assert!(RestartPolicy::from_secs(f64::NAN, 10).is_none());

    let policy = RestartPolicy::from_secs(2.0, 5).unwrap();
    assert_eq!(policy.delay(), Duration::from_secs(2));
    assert_eq!(policy.max_restarts(), 5);
}

#[test]
fn test_delay_grows_and_is_capped() {
    let policy = RestartPolicy::builder()
        .with_delay(Duration::from_secs(2))
        .with_backoff(2.0)
        .with_max_delay(Duration::from_secs(10))
        .build();

    let delays: Vec<_> = (0..5).map(|n| policy.delay_for(n).as_secs()).collect();
    assert_eq!(delays, [2, 4, 8, 10, 10]);
    assert_eq!(policy.delay_for(u32::MAX), Duration::from_secs(10));
}

#[test]
fn test_backoff_below_one_keeps_delay() {
    let policy = RestartPolicy::builder()
        .with_delay(Duration::from_secs(3))
        .with_backoff(0.5)
        .build();

    assert_eq!(policy.delay_for(4), Duration::from_secs(3));
}

#[tokio::test]
async fn test_clean_exit_stops_immediately() {
    let mut calls = 0;
    let status = fast_policy(10)
        .supervise(&CancellationToken::new(), || {
            calls += 1;
            async { Ok(0) }
        })
        .await
        .unwrap();

    assert_eq!(status, 0);
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_restarts_until_success() {
    let mut statuses = vec![0, 1, 3];
    let status = fast_policy(10)
        .supervise(&CancellationToken::new(), || {
            let next = statuses.pop().unwrap_or(0);
            async move { Ok(next) }
        })
        .await
        .unwrap();

    assert_eq!(status, 0);
    assert!(statuses.is_empty());
}

#[tokio::test]
async fn test_gives_up_after_max_restarts() {
    let mut calls = 0;
    let status = fast_policy(3)
        .supervise(&CancellationToken::new(), || {
            calls += 1;
            async { Ok(7) }
        })
        .await
        .unwrap();

    assert_eq!(status, 7);
    assert_eq!(calls, 4);
}

#[tokio::test]
async fn test_cancelled_token_stops_restarting() {
    let token = CancellationToken::new();
    token.cancel();
    let mut calls = 0;

    let status = fast_policy(10)
        .supervise(&token, || {
            calls += 1;
            async { Ok(1) }
        })
        .await
        .unwrap();

    assert_eq!(status, 1);
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_errors_propagate() {
    let result = fast_policy(10)
        .supervise(&CancellationToken::new(), || async {
            Err(anyhow::anyhow!("spawn failed"))
        })
        .await;

    assert!(result.is_err());
}
