use chrono::{Duration, Utc};
use repopulse::aggregate::{Aggregator, AggregatorConfig};
use repopulse::model::GradientSpec;
use repopulse::remote::RemoteClient;
use repopulse::score::HealthPolicy;
use repopulse::status::fetch_status;
use serde_json::json;
use std::time::Duration as StdDuration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPO: &str = "acme/widgets/main";

fn test_config() -> AggregatorConfig {
    AggregatorConfig {
        window_days: 30,
        page_delay: StdDuration::from_millis(5),
        page_timeout: StdDuration::from_millis(250),
    }
}

fn aggregator(server: &MockServer) -> Aggregator {
    Aggregator::new(RemoteClient::new(server.uri()), test_config())
}

fn commit(author: &str, date: &str) -> serde_json::Value {
    json!({ "author": author, "authored_date": date })
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).format("%Y-%m-%d").to_string()
}

async fn mount_page(server: &MockServer, page: u32, commits: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/commits/list/{REPO}")))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "commits": commits })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn counts_start_on_page_two() {
    let server = MockServer::start().await;
    let now = today();
    // page 1 only bootstraps paging; zed must not show up anywhere
    mount_page(&server, 1, vec![commit("zed", &now)]).await;
    mount_page(
        &server,
        2,
        vec![
            commit("ann", &now),
            commit("bob", &now),
            commit("ann", &now),
            commit("cid", &now),
            commit("bob", &now),
        ],
    )
    .await;
    mount_page(&server, 3, vec![]).await;

    let stats = aggregator(&server).fetch_stats(REPO, None).await.unwrap();
    assert_eq!(stats.num_commits, 5);
    assert_eq!(stats.num_committers, 3);
}

#[tokio::test]
async fn empty_first_page_does_not_stop_the_run() {
    let server = MockServer::start().await;
    mount_page(&server, 1, vec![]).await;
    mount_page(&server, 2, vec![commit("ann", &today()), commit("bob", &today())]).await;
    mount_page(&server, 3, vec![]).await;

    let stats = aggregator(&server).fetch_stats(REPO, None).await.unwrap();
    assert_eq!(stats.num_commits, 2);
    assert_eq!(stats.num_committers, 2);
}

#[tokio::test]
async fn stale_commit_stops_the_run_uncounted() {
    let server = MockServer::start().await;
    mount_page(&server, 1, vec![]).await;
    mount_page(
        &server,
        2,
        vec![commit("ann", &today()), commit("bob", &days_ago(45))],
    )
    .await;
    // never reached
    Mock::given(method("GET"))
        .and(path(format!("/commits/list/{REPO}")))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "commits": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let stats = aggregator(&server).fetch_stats(REPO, None).await.unwrap();
    assert_eq!(stats.num_commits, 1);
    assert_eq!(stats.num_committers, 1);
}

#[tokio::test]
async fn unparseable_date_stops_the_run_uncounted() {
    let server = MockServer::start().await;
    mount_page(&server, 1, vec![]).await;
    mount_page(
        &server,
        2,
        vec![
            commit("ann", &today()),
            commit("bob", "not-a-date"),
            commit("cid", &today()),
        ],
    )
    .await;

    let stats = aggregator(&server).fetch_stats(REPO, None).await.unwrap();
    assert_eq!(stats.num_commits, 1);
    assert_eq!(stats.num_committers, 1);
}

#[tokio::test]
async fn limit_stops_after_the_current_page() {
    let server = MockServer::start().await;
    let now = today();
    mount_page(&server, 1, vec![]).await;
    mount_page(
        &server,
        2,
        vec![
            commit("ann", &now),
            commit("bob", &now),
            commit("cid", &now),
            commit("dee", &now),
        ],
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("/commits/list/{REPO}")))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "commits": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let stats = aggregator(&server).fetch_stats(REPO, Some(2)).await.unwrap();
    // soft cap: the page it tripped on is still counted in full
    assert!(stats.num_commits >= 2);
    assert_eq!(stats.num_commits, 4);
}

#[tokio::test]
async fn timeout_yields_stats_accumulated_so_far() {
    let server = MockServer::start().await;
    mount_page(&server, 1, vec![]).await;
    mount_page(&server, 2, vec![commit("ann", &today()), commit("bob", &today())]).await;
    Mock::given(method("GET"))
        .and(path(format!("/commits/list/{REPO}")))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "commits": [] }))
                .set_delay(StdDuration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let stats = aggregator(&server).fetch_stats(REPO, None).await.unwrap();
    assert_eq!(stats.num_commits, 2);
    assert_eq!(stats.num_committers, 2);
}

#[tokio::test]
async fn transport_failure_yields_stats_accumulated_so_far() {
    let server = MockServer::start().await;
    mount_page(&server, 1, vec![]).await;
    mount_page(&server, 2, vec![commit("ann", &today())]).await;
    Mock::given(method("GET"))
        .and(path(format!("/commits/list/{REPO}")))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let stats = aggregator(&server).fetch_stats(REPO, None).await.unwrap();
    assert_eq!(stats.num_commits, 1);
}

#[tokio::test]
async fn unreachable_remote_degrades_to_zero_stats() {
    // no mocks mounted: every page request 404s
    let server = MockServer::start().await;

    let stats = aggregator(&server).fetch_stats(REPO, None).await.unwrap();
    assert_eq!(stats.num_commits, 0);
    assert_eq!(stats.num_committers, 0);
}

#[tokio::test]
async fn empty_repo_ref_is_rejected() {
    let server = MockServer::start().await;
    assert!(aggregator(&server).fetch_stats("", None).await.is_err());
}

#[tokio::test]
async fn status_composes_stats_score_and_meter() {
    let server = MockServer::start().await;
    let now = today();
    mount_page(&server, 1, vec![]).await;
    mount_page(
        &server,
        2,
        vec![
            commit("ann", &now),
            commit("bob", &now),
            commit("ann", &now),
            commit("cid", &now),
            commit("bob", &now),
        ],
    )
    .await;
    mount_page(&server, 3, vec![]).await;

    let aggregator = aggregator(&server);
    let policy = HealthPolicy::default();
    let report = fetch_status(&aggregator, &policy, &GradientSpec::default(), REPO)
        .await
        .unwrap();

    assert_eq!(report.stats.num_commits, 5);
    assert_eq!(report.stats.num_committers, 3);
    assert!((report.health - 5.0 / 15.0).abs() < 1e-12);
    assert_eq!(report.segments.len(), 100);
}
