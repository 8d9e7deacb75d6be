// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! End-to-end tests: mock Pi-hole -> exporter -> scrape.

use pihole_config::Config;
use pihole_exporter::{run, Exporter, SHUTDOWN_DEADLINE};
use pihole_test_utils::exposition::sample;
use pihole_test_utils::fixtures::MINIMAL_STATS;
use pihole_test_utils::MockPihole;
use std::io;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout, Instant};

fn config_for(pihole_host: &str) -> Config {
    Config {
        bind_address: "127.0.0.1".to_string(),
        port: 0,
        pihole_host: pihole_host.to_string(),
        pihole_token: "0123abcd".to_string(),
        pihole_interval: 1,
        ..Config::default()
    }
}

async fn scrape(exporter: &Exporter) -> String {
    reqwest::get(format!("http://{}/metrics", exporter.local_addr()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_scrape_after_first_poll() {
    let mock = MockPihole::start(MINIMAL_STATS).await;
    let exporter = Exporter::start(&config_for(&mock.host())).await.unwrap();
    let host = mock.host();

    let deadline = Instant::now() + Duration::from_secs(5);
    let text = loop {
        let text = scrape(&exporter).await;
        if sample(&text, "pihole_status", &[("host", host.as_str())]).is_some() {
            break text;
        }
        assert!(Instant::now() < deadline, "no data scraped within 5s");
        sleep(Duration::from_millis(20)).await;
    };

    assert_eq!(
        sample(&text, "pihole_domains_being_blocked", &[("host", host.as_str())]),
        Some(10_000.0)
    );
    assert_eq!(sample(&text, "pihole_status", &[("host", host.as_str())]), Some(1.0));
    assert_eq!(
        sample(&text, "pihole_top_queries", &[("host", host.as_str()), ("domain", "example.com")]),
        Some(42.0)
    );
    assert!(mock.last_query().unwrap().ends_with("&auth=0123abcd"));

    exporter.shutdown().await;
}

#[tokio::test]
async fn test_outage_keeps_last_values() {
    let mock = MockPihole::start(MINIMAL_STATS).await;
    let exporter = Exporter::start(&config_for(&mock.host())).await.unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !exporter.registry().render().unwrap().contains("pihole_status") {
        assert!(Instant::now() < deadline, "no data published within 5s");
        sleep(Duration::from_millis(20)).await;
    }
    let before = exporter.registry().render().unwrap();

    mock.set_reply(502, "bad gateway");
    let seen = mock.request_count();
    let deadline = Instant::now() + Duration::from_secs(5);
    while mock.request_count() == seen {
        assert!(Instant::now() < deadline, "no failed poll within 5s");
        sleep(Duration::from_millis(20)).await;
    }
    sleep(Duration::from_millis(50)).await;

    assert_eq!(scrape(&exporter).await, before);
    exporter.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_within_deadline() {
    let mock = MockPihole::start(MINIMAL_STATS).await;
    let exporter = Exporter::start(&config_for(&mock.host())).await.unwrap();
    let addr = exporter.local_addr();
    scrape(&exporter).await;

    let started = Instant::now();
    exporter.shutdown().await;
    assert!(started.elapsed() < Duration::from_secs(1));

    // Listener is closed
    assert!(reqwest::get(format!("http://{}/metrics", addr)).await.is_err());

    // Poll loop is stopped
    let count = mock.request_count();
    sleep(Duration::from_millis(1200)).await;
    assert_eq!(mock.request_count(), count);
}

#[tokio::test]
async fn test_invalid_host_fails_start() {
    let result = Exporter::start(&config_for("pi.hole/admin")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_bind_conflict_fails_before_polling() {
    let mock = MockPihole::start(MINIMAL_STATS).await;
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();

    let config = Config {
        port: taken.local_addr().unwrap().port(),
        ..config_for(&mock.host())
    };
    let error = Exporter::start(&config).await.err().unwrap();

    assert!(format!("{:#}", error).contains("Failed to start metrics endpoint"));
    sleep(Duration::from_millis(100)).await;
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_run_returns_after_signal() {
    let mock = MockPihole::start(MINIMAL_STATS).await;
    let (tx, rx) = oneshot::channel::<()>();

    let task = tokio::spawn({
        let config = config_for(&mock.host());
        async move {
            run(&config, async {
                let _ = rx.await;
                Ok(())
            })
            .await
        }
    });

    let deadline = Instant::now() + Duration::from_secs(5);
    while mock.request_count() == 0 {
        assert!(Instant::now() < deadline);
        sleep(Duration::from_millis(20)).await;
    }

    tx.send(()).unwrap();
    let result = timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_signal_failure_is_an_error() {
    let mock = MockPihole::start(MINIMAL_STATS).await;
    let config = config_for(&mock.host());

    let result = timeout(
        Duration::from_secs(2),
        run(&config, async {
            Err(io::Error::new(io::ErrorKind::Unsupported, "no signal support"))
        }),
    )
    .await
    .unwrap();

    let error = result.unwrap_err();
    assert!(format!("{:#}", error).contains("no signal support"));
}

#[tokio::test]
async fn test_shutdown_bounded_with_stalled_scrape() {
    let mock = MockPihole::start(MINIMAL_STATS).await;
    let exporter = Exporter::start(&config_for(&mock.host())).await.unwrap();

    // Half-sent request keeps the endpoint from draining
    let mut stalled = TcpStream::connect(exporter.local_addr()).await.unwrap();
    stalled.write_all(b"GET /metrics HTTP/1.1\r\nHost: x").await.unwrap();
    sleep(Duration::from_millis(50)).await;

    let started = Instant::now();
    exporter.shutdown().await;
    assert!(started.elapsed() < SHUTDOWN_DEADLINE + Duration::from_millis(300));
}
