use httpmock::prelude::*;
use serde_json::json;
use tessera_core::{EntityExtractor, RazorConfig, TesseraError};
use tessera_textrazor::RazorConnector;

fn connector(server: &MockServer, key: &str) -> RazorConnector {
    let cfg = RazorConfig::new(key).with_endpoint(server.url("/"));
    RazorConnector::new(&cfg).expect("valid config")
}

#[tokio::test]
async fn posts_form_with_key_header_and_decodes_entities() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header("x-textrazor-key", "test-key")
                .form_urlencoded_tuple("extractors", "entities,topics,words,phrases")
                .form_urlencoded_tuple("text", "Paris is the capital of France.");
            then.status(200).json_body(json!({
                "ok": true,
                "response": {
                    "entities": [
                        {
                            "matchedText": "Paris",
                            "startingPos": 0,
                            "endingPos": 5,
                            "relevanceScore": 0.9,
                            "entityId": "Paris",
                            "wikiLink": "http://en.wikipedia.org/wiki/Paris",
                            "type": ["Place", "City"],
                            "freebaseId": "/m/05qtj"
                        },
                        {
                            "matchedText": "France",
                            "start": 24,
                            "end": 30,
                            "wikipediaLink": "http://en.wikipedia.org/wiki/France",
                            "type": "Country"
                        }
                    ]
                }
            }));
        })
        .await;

    let resp = connector(&server, "test-key")
        .extract("Paris is the capital of France.")
        .await
        .unwrap();
    mock.assert_async().await;

    assert_eq!(resp.entities.len(), 2);
    let paris = &resp.entities[0];
    assert_eq!(paris.matched_text.as_deref(), Some("Paris"));
    assert_eq!((paris.start, paris.end), (Some(0), Some(5)));
    assert_eq!(paris.types, vec!["Place", "City"]);
    assert_eq!(paris.extra["freebaseId"], json!("/m/05qtj"));

    let france = &resp.entities[1];
    assert_eq!((france.start, france.end), (Some(24), Some(30)));
    assert_eq!(
        france.wiki_link.as_deref(),
        Some("http://en.wikipedia.org/wiki/France")
    );
    assert_eq!(france.types, vec!["Country"]);
}

#[tokio::test]
async fn custom_extractor_list_is_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .form_urlencoded_tuple("extractors", "entities");
            then.status(200).json_body(json!({ "ok": true, "response": {} }));
        })
        .await;

    let cfg = RazorConfig::new("k")
        .with_endpoint(server.url("/"))
        .with_extractors("entities");
    let resp = RazorConnector::new(&cfg)
        .unwrap()
        .extract("nothing here")
        .await
        .unwrap();
    mock.assert_async().await;
    assert!(resp.entities.is_empty());
}

#[tokio::test]
async fn server_error_is_extraction_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(500).body("upstream exploded");
        })
        .await;

    let err = connector(&server, "k").extract("text").await.unwrap_err();
    match err {
        TesseraError::Extraction { extractor, msg } => {
            assert_eq!(extractor, "tessera-textrazor");
            assert!(msg.contains("500"), "{msg}");
            assert!(msg.contains("upstream exploded"), "{msg}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_key_maps_to_config_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(401)
                .json_body(json!({ "ok": false, "error": "Your API key is not valid." }));
        })
        .await;

    let err = connector(&server, "wrong").extract("text").await.unwrap_err();
    assert!(matches!(err, TesseraError::Config(_)), "{err:?}");
}

#[tokio::test]
async fn ok_false_with_success_status_is_extraction_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200)
                .json_body(json!({ "ok": false, "error": "Text too long." }));
        })
        .await;

    let err = connector(&server, "k").extract("text").await.unwrap_err();
    assert_eq!(
        err,
        TesseraError::extraction("tessera-textrazor", "Text too long.")
    );
}

#[tokio::test]
async fn non_json_body_is_data_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = connector(&server, "k").extract("text").await.unwrap_err();
    assert!(matches!(err, TesseraError::Data(_)), "{err:?}");
}
