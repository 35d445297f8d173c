//! End-to-end tick tests against mock search and webhook servers

use crate::common::{config, page, product_json, t, SEARCH_PATH, WEBHOOK_PATH};
use rinkan_monitor::monitor::{Monitor, TickOutcome, Watermark};
use rinkan_monitor::notify::DiscordMessage;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_webhook(server: &MockServer, status: u16) {
    let response = if status < 300 {
        ResponseTemplate::new(status)
    } else {
        ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "message": "Invalid Form Body"
        }))
    };
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn sent_titles(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .map(|r| r.body_json::<DiscordMessage>().unwrap().embeds[0].title.clone())
        .collect()
}

#[tokio::test]
async fn test_single_keyword_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("keyword", "Speedmaster"))
        .and(query_param("color[]", "ブルー"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            product_json("new", "Speedmaster Professional", t(60)),
            product_json("old", "Speedmaster Professional", t(-60)),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_webhook(&server, 204).await;

    let config = config(
        &server,
        r#"
        keywords = ["Speedmaster"]
        colors = { blue = true }
        categories = []
        "#,
        "",
    );
    let monitor = Monitor::from_config(&config).unwrap();

    let report = monitor.tick_at(Watermark::at(t(0)), t(120)).await;

    assert_eq!(report.outcome, TickOutcome::Completed);
    assert_eq!(report.notified, 1);
    assert_eq!(report.watermark, Watermark::at(t(120)));
    assert_eq!(sent_titles(&server).await, vec!["OMEGA - Watch new"]);
}

#[tokio::test]
async fn test_pagination_fetches_until_stale_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            product_json("4", "", t(40)),
            product_json("3", "", t(30)),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            product_json("2", "", t(-20)),
            product_json("1", "", t(-30)),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
        .expect(0)
        .mount(&server)
        .await;
    mount_webhook(&server, 204).await;

    let monitor = Monitor::from_config(&config(&server, "", "")).unwrap();
    let report = monitor.tick_at(Watermark::at(t(0)), t(100)).await;

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(
        sent_titles(&server).await,
        vec!["OMEGA - Watch 4", "OMEGA - Watch 3"]
    );
}

#[tokio::test]
async fn test_unreadable_timestamp_stops_paging_and_advances() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![product_json("good", "", t(30))])),
        )
        .expect(2)
        .mount(&server)
        .await;

    let mut bad = product_json("bad", "", t(0));
    bad["created_at"] = "not a date".into();
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![bad, product_json("old", "", t(-5))])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
        .expect(0)
        .mount(&server)
        .await;
    mount_webhook(&server, 204).await;

    let monitor = Monitor::from_config(&config(&server, "", "")).unwrap();

    let first = monitor.tick_at(Watermark::at(t(0)), t(100)).await;
    assert_eq!(first.outcome, TickOutcome::Completed);
    assert_eq!(first.pages_fetched, 2);
    assert_eq!(first.notified, 1);
    assert_eq!(first.watermark, Watermark::at(t(100)));

    let second = monitor.tick_at(first.watermark, t(200)).await;
    assert_eq!(second.outcome, TickOutcome::Completed);
    assert_eq!(second.pages_fetched, 1);
    assert_eq!(second.notified, 0);
    assert_eq!(second.watermark, Watermark::at(t(200)));

    assert_eq!(sent_titles(&server).await, vec!["OMEGA - Watch good"]);
}

#[tokio::test]
async fn test_server_error_keeps_watermark_for_next_tick() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![product_json("1", "", t(30))])),
        )
        .mount(&server)
        .await;
    mount_webhook(&server, 204).await;

    let monitor = Monitor::from_config(&config(&server, "", "pagination = false")).unwrap();

    let failed = monitor.tick_at(Watermark::at(t(0)), t(100)).await;
    assert!(matches!(failed.outcome, TickOutcome::Aborted { .. }));
    assert_eq!(failed.watermark, Watermark::at(t(0)));
    assert!(sent_titles(&server).await.is_empty());

    // the product listed before the failed tick is still reported
    let retried = monitor.tick_at(failed.watermark, t(200)).await;
    assert!(retried.is_completed());
    assert_eq!(retried.notified, 1);
    assert_eq!(retried.watermark, Watermark::at(t(200)));
}

#[tokio::test]
async fn test_local_filter_and_webhook_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            product_json("3", "Seamaster Diver", t(30)),
            product_json("2", "Constellation", t(20)),
            product_json("1", "Speedmaster", t(10)),
        ])))
        .mount(&server)
        .await;
    mount_webhook(&server, 400).await;

    let config = config(
        &server,
        r#"keywords = ["speedmaster", "SEAMASTER"]"#,
        "pagination = false",
    );
    let monitor = Monitor::from_config(&config).unwrap();

    let report = monitor.tick_at(Watermark::at(t(0)), t(100)).await;

    // failed sends are skipped, not fatal
    assert!(report.is_completed());
    assert_eq!(report.matched, 2);
    assert_eq!(report.failed_notifications, 2);
    assert_eq!(report.watermark, Watermark::at(t(100)));
    assert_eq!(
        sent_titles(&server).await,
        vec!["OMEGA - Watch 3", "OMEGA - Watch 1"]
    );

    let search = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.method.as_str() == "GET")
        .unwrap();
    assert!(search.url.query_pairs().all(|(k, _)| k != "keyword"));
}

#[tokio::test]
async fn test_repeat_tick_sends_nothing_new() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![product_json("1", "", t(30))])),
        )
        .mount(&server)
        .await;
    mount_webhook(&server, 204).await;

    let monitor = Monitor::from_config(&config(&server, "", "pagination = false")).unwrap();

    let first = monitor.tick_at(Watermark::unset(), t(100)).await;
    let second = monitor.tick_at(first.watermark, t(200)).await;

    assert_eq!(first.notified, 1);
    assert_eq!(second.notified, 0);
    assert_eq!(sent_titles(&server).await.len(), 1);
}
