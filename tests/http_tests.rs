//! WikiClient against a local mock of the MediaWiki Action API

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

use flashdeck::rank::rank_by_length;
use flashdeck::*;

const API_PATH: &str = "/w/api.php";

fn client(server: &ServerGuard) -> WikiClient {
    let cfg = ClientConfig {
        api_url: format!("{}{}", server.url(), API_PATH),
        ..ClientConfig::default()
    };
    WikiClient::new(&cfg).unwrap()
}

/// Mock answering one `action`, optionally narrowed by `prop`.
async fn api_mock(server: &mut ServerGuard, action: &str, prop: Option<&str>, body: Value) -> Mock {
    let mut query = vec![
        Matcher::UrlEncoded("action".to_string(), action.to_string()),
        Matcher::UrlEncoded("format".to_string(), "json".to_string()),
        Matcher::UrlEncoded("formatversion".to_string(), "2".to_string()),
    ];
    if let Some(prop) = prop {
        query.push(Matcher::UrlEncoded("prop".to_string(), prop.to_string()));
    }
    server
        .mock("GET", API_PATH)
        .match_query(Matcher::AllOf(query))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

fn titles(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_links_keep_existing_main_namespace_only() {
    let mut server = Server::new_async().await;
    let mock = api_mock(
        &mut server,
        "parse",
        Some("links"),
        json!({
            "parse": {
                "title": "Star",
                "pageid": 26808,
                "links": [
                    {"ns": 0, "title": "Sun", "exists": true},
                    {"ns": 14, "title": "Category:Stars", "exists": true},
                    {"ns": 0, "title": "Red dwarf planet"},
                    {"ns": 0, "title": "Sun", "exists": true},
                    {"ns": 4, "title": "Wikipedia:Manual of Style", "exists": true},
                    {"ns": 0, "title": "Telescope", "exists": true}
                ]
            }
        }),
    )
    .await;

    let links = client(&server).get_links("Star").await.unwrap();
    assert_eq!(links, titles(&["Sun", "Telescope"]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_subject_page_carries_suggestions() {
    let mut server = Server::new_async().await;
    api_mock(
        &mut server,
        "parse",
        None,
        json!({"error": {"code": "missingtitle", "info": "The page you specified doesn't exist."}}),
    )
    .await;
    let search = api_mock(
        &mut server,
        "opensearch",
        None,
        json!(["Stellar", ["Stellar nucleosynthesis", "Stellar evolution"], ["", ""], [
            "https://en.wikipedia.org/wiki/Stellar_nucleosynthesis",
            "https://en.wikipedia.org/wiki/Stellar_evolution"
        ]]),
    )
    .await;

    let err = client(&server).get_links("Stellar").await.unwrap_err();
    assert!(matches!(err, DeckError::SubjectNotFound { .. }));
    assert_eq!(err.suggestions(), ["Stellar nucleosynthesis", "Stellar evolution"]);
    search.assert_async().await;
}

#[tokio::test]
async fn test_parse_without_parse_object_is_malformed() {
    let mut server = Server::new_async().await;
    api_mock(&mut server, "parse", None, json!({"batchcomplete": true})).await;

    let err = client(&server).get_links("Star").await.unwrap_err();
    assert!(matches!(err, DeckError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_query_without_query_object_is_malformed() {
    let mut server = Server::new_async().await;
    api_mock(&mut server, "query", Some("info"), json!({"batchcomplete": true})).await;

    let err = client(&server)
        .fetch_metadata(&titles(&["Sun"]))
        .await
        .unwrap_err();
    assert!(matches!(err, DeckError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_query_error_object_is_malformed() {
    let mut server = Server::new_async().await;
    api_mock(
        &mut server,
        "query",
        Some("extracts"),
        json!({"error": {"code": "toomanyvalues", "info": "Too many values supplied for parameter \"titles\"."}}),
    )
    .await;

    let err = client(&server).fetch_text("Sun").await.unwrap_err();
    assert!(matches!(err, DeckError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_open_search_object_is_malformed() {
    let mut server = Server::new_async().await;
    api_mock(
        &mut server,
        "opensearch",
        None,
        json!({"error": {"code": "badvalue", "info": "Unrecognized value"}}),
    )
    .await;

    let err = client(&server).open_search("Star").await.unwrap_err();
    assert!(matches!(err, DeckError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_redirected_batches_merge_under_returned_title() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("action".to_string(), "query".to_string()),
            Matcher::UrlEncoded("prop".to_string(), "info".to_string()),
            Matcher::UrlEncoded("redirects".to_string(), "1".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "batchcomplete": true,
                "query": {
                    "redirects": [{"from": "Sol", "to": "Sun"}],
                    "pages": [
                        {"pageid": 26751, "ns": 0, "title": "Sun", "length": 150000,
                         "watchers": 1800, "fullurl": "https://en.wikipedia.org/wiki/Sun"},
                        {"ns": 0, "title": "Ghost", "missing": true}
                    ]
                }
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;

    let wiki = client(&server);
    let ranked = rank_by_length(&wiki, &titles(&["Sun", "Sol", "Ghost"]), 2)
        .await
        .unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].title, "Sun");
    assert_eq!(ranked[0].length, 150000);
    assert_eq!(ranked[0].watchers, Some(1800));
    assert_eq!(ranked[0].visiting_watchers, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_text_of_missing_page_is_empty() {
    let mut server = Server::new_async().await;
    api_mock(
        &mut server,
        "query",
        Some("extracts"),
        json!({"query": {"pages": [{"ns": 0, "title": "Nope", "missing": true}]}}),
    )
    .await;

    assert_eq!(client(&server).fetch_text("Nope").await.unwrap(), "");
}

#[tokio::test]
async fn test_text_of_existing_page() {
    let mut server = Server::new_async().await;
    api_mock(
        &mut server,
        "query",
        Some("extracts"),
        json!({"query": {"pages": [{"pageid": 26751, "ns": 0, "title": "Sun",
            "extract": "The Sun is the star at the centre of the Solar System.\n\n\nEtymology"}]}}),
    )
    .await;

    let text = client(&server).fetch_text("Sun").await.unwrap();
    assert!(text.starts_with("The Sun is the star"));
}

#[tokio::test]
async fn test_lookup_follows_redirect() {
    let mut server = Server::new_async().await;
    api_mock(
        &mut server,
        "query",
        Some("info"),
        json!({"query": {
            "redirects": [{"from": "Sol", "to": "Sun"}],
            "pages": [{"pageid": 26751, "ns": 0, "title": "Sun", "length": 150000}]
        }}),
    )
    .await;

    let title = client(&server).lookup_title("Sol").await.unwrap();
    assert_eq!(title.as_deref(), Some("Sun"));
}

#[tokio::test]
async fn test_separator_in_term_never_reaches_the_api() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let wiki = client(&server);
    assert!(matches!(
        wiki.lookup_title("Cat|Dog").await,
        Err(DeckError::InvalidTitle { .. })
    ));
    assert!(matches!(
        wiki.fetch_text("Cat|Dog").await,
        Err(DeckError::InvalidTitle { .. })
    ));
    assert!(matches!(
        define_term(&wiki, "Cat|Dog", 0).await,
        Err(DeckError::InvalidTitle { .. })
    ));
    mock.assert_async().await;
}
