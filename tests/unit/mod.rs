use mockito::{Matcher, Server, ServerGuard};
use mp_crawler::config::{Config, CrawlConfig, CredentialsConfig, RestApiConfig};
use mp_crawler::error::{AppError, AuthError};
use mp_crawler::utils::articles::{fetch_and_store_articles, CrawlTarget};
use mp_crawler::utils::logger::setup_logger;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn test_config(server: &ServerGuard, dir: &TempDir) -> Config {
    let cookie_file = dir.path().join("raw_cookie.txt");
    fs::write(&cookie_file, "slave_sid=abc; uin=o1; data_ticket=x=y\n").unwrap();

    Config {
        credentials: CredentialsConfig {
            cookie_file: cookie_file.display().to_string(),
        },
        rest_api: RestApiConfig {
            base_url: server.url(),
            timeout: 5,
            user_agent: "integration-test".to_string(),
        },
        crawl: CrawlConfig {
            page_size: 5,
            search_count: 5,
            page_delay_ms: 0,
            max_pages: 100,
            max_retries: 0,
            retry_backoff_ms: 0,
            output_dir: dir.path().display().to_string(),
            output_pattern: "{name}_articles.csv".to_string(),
        },
    }
}

async fn mock_landing(server: &mut ServerGuard, location: &str) {
    server
        .mock("GET", "/")
        .match_header("cookie", Matcher::Regex("slave_sid=abc".to_string()))
        .with_status(302)
        .with_header("location", location)
        .create_async()
        .await;
    server
        .mock("GET", "/cgi-bin/home")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html></html>")
        .create_async()
        .await;
}

fn page_body(total: u64, range: std::ops::Range<u64>) -> String {
    let list: Vec<_> = range
        .map(|i| json!({"title": format!("Article {i}"), "link": format!("https://mp.weixin.qq.com/s/{i}")}))
        .collect();
    json!({"base_resp": {"ret": 0, "err_msg": "ok"}, "app_msg_cnt": total, "app_msg_list": list})
        .to_string()
}

#[tokio::test]
async fn test_full_crawl_writes_csv_and_status() {
    setup_logger();
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(&server, &dir);

    mock_landing(&mut server, "/cgi-bin/home?t=home/index&lang=zh_CN&token=4242").await;
    let search = server
        .mock("GET", "/cgi-bin/searchbiz")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "rustlang".into()),
            Matcher::UrlEncoded("token".into(), "4242".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"list": [{"nickname": "Rust Lang", "alias": "rustlang", "fakeid": "MzI0"}], "total": 1}"#)
        .create_async()
        .await;

    let mut pages = Vec::new();
    for (begin, range) in [(0, 0..5), (5, 5..10), (10, 10..12)] {
        pages.push(
            server
                .mock("GET", "/cgi-bin/appmsg")
                .match_query(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("action".into(), "list_ex".into()),
                    Matcher::UrlEncoded("fakeid".into(), "MzI0".into()),
                    Matcher::UrlEncoded("begin".into(), begin.to_string()),
                    Matcher::UrlEncoded("count".into(), "5".into()),
                    Matcher::UrlEncoded("type".into(), "9".into()),
                ]))
                .with_status(200)
                .with_body(page_body(12, range))
                .expect(1)
                .create_async()
                .await,
        );
    }

    let summary = fetch_and_store_articles(&cfg, &CrawlTarget::Search("rustlang".to_string()), None)
        .await
        .unwrap();

    assert_eq!(summary.emitted, 12);
    assert_eq!(summary.pages, 3);
    assert!(summary.complete);

    let csv = fs::read_to_string(dir.path().join("Rust Lang_articles.csv")).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "title,link");
    assert_eq!(lines[1], "Article 0,https://mp.weixin.qq.com/s/0");
    assert_eq!(lines[12], "Article 11,https://mp.weixin.qq.com/s/11");

    let status: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("Rust Lang_articles.csv.status.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(status["complete"], true);
    assert_eq!(status["state"], "done");
    assert_eq!(status["total"], 12);

    search.assert_async().await;
    for page in pages {
        page.assert_async().await;
    }
}

#[tokio::test]
async fn test_max_count_truncates_output() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(&server, &dir);

    mock_landing(&mut server, "/cgi-bin/home?token=1").await;
    let _first = server
        .mock("GET", "/cgi-bin/appmsg")
        .match_query(Matcher::UrlEncoded("begin".into(), "0".into()))
        .with_status(200)
        .with_body(page_body(50, 0..5))
        .create_async()
        .await;
    let second = server
        .mock("GET", "/cgi-bin/appmsg")
        .match_query(Matcher::UrlEncoded("begin".into(), "5".into()))
        .with_status(200)
        .with_body(page_body(50, 5..10))
        .expect(0)
        .create_async()
        .await;

    let summary = fetch_and_store_articles(&cfg, &CrawlTarget::Fakeid("MzI0".to_string()), Some(3))
        .await
        .unwrap();

    assert_eq!(summary.emitted, 3);
    let csv = fs::read_to_string(dir.path().join("MzI0_articles.csv")).unwrap();
    assert_eq!(csv.lines().count(), 4);
    second.assert_async().await;
}

#[tokio::test]
async fn test_unknown_account_makes_no_list_calls() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(&server, &dir);

    mock_landing(&mut server, "/cgi-bin/home?token=1").await;
    let _search = server
        .mock("GET", "/cgi-bin/searchbiz")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"base_resp": {"ret": 0}, "list": [], "total": 0}"#)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/cgi-bin/appmsg")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = fetch_and_store_articles(&cfg, &CrawlTarget::Search("nobody".to_string()), None).await;

    assert!(matches!(result, Err(AppError::AccountNotFound(ref q)) if q == "nobody"));
    list.assert_async().await;
}

#[tokio::test]
async fn test_expired_cookies_fail_before_search() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_config(&server, &dir);

    let _landing = server
        .mock("GET", "/")
        .with_status(200)
        .with_body("<html>login</html>")
        .create_async()
        .await;
    let search = server
        .mock("GET", "/cgi-bin/searchbiz")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = fetch_and_store_articles(&cfg, &CrawlTarget::Search("rustlang".to_string()), None).await;

    assert!(matches!(result, Err(AppError::Auth(AuthError::TokenNotFound(_)))));
    search.assert_async().await;
}

#[tokio::test]
async fn test_missing_cookie_file() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = test_config(&server, &dir);
    cfg.credentials.cookie_file = dir.path().join("absent.txt").display().to_string();

    let result = fetch_and_store_articles(&cfg, &CrawlTarget::Fakeid("MzI0".to_string()), None).await;

    assert!(matches!(result, Err(AppError::Auth(AuthError::Io(_)))));
}
