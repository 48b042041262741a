use locmerge::mcp::{
    LocmergeMcpServer,
    types::{MergeTranslationsParams, SubtreeEntry},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Value, json};

use crate::{McpTestFixture, extract_tool_result_json, fixture_multi_locale};

fn subtree(locale: &str, tree: Value) -> SubtreeEntry {
    SubtreeEntry {
        locale: locale.to_string(),
        tree,
    }
}

#[tokio::test]
async fn test_merge_overrides_existing_leaves() {
    let fixture = fixture_multi_locale().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(MergeTranslationsParams {
        project_root_path: fixture.root(),
        at: None,
        replace: false,
        subtrees: vec![subtree(
            "en",
            json!({"home": {"title": "Welcome back", "subtitle": "Glad to see you"}}),
        )],
    });

    let result = server.merge_translations(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    assert_eq!(json_result["results"][0]["added"], json!(["home.subtitle"]));
    assert_eq!(json_result["results"][0]["changed"], json!(["home.title"]));
    assert_eq!(json_result["summary"]["totalKeysAdded"], 1);
    assert_eq!(json_result["summary"]["totalKeysChanged"], 1);

    let en = fixture.read_locale_file("en").unwrap();
    assert_eq!(
        en,
        json!({
            "common": {"submit": "Submit", "cancel": "Cancel"},
            "home": {"title": "Welcome back", "subtitle": "Glad to see you"}
        })
    );
}

#[tokio::test]
async fn test_merge_at_path_creates_locale_file() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(MergeTranslationsParams {
        project_root_path: fixture.root(),
        at: Some("crm.leads".to_string()),
        replace: false,
        subtrees: vec![subtree("he", json!({"title": "לידים"}))],
    });

    let result = server.merge_translations(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    let he = fixture.read_locale_file("he").unwrap();
    assert_eq!(he, json!({"crm": {"leads": {"title": "לידים"}}}));
}

#[tokio::test]
async fn test_merge_invalid_at() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(MergeTranslationsParams {
        project_root_path: fixture.root(),
        at: Some("crm..leads".to_string()),
        replace: false,
        subtrees: vec![subtree("en", json!({"a": "A"}))],
    });

    let err = server.merge_translations(params).await.unwrap_err();
    assert!(err.message.contains("Invalid 'at'"));
}

#[tokio::test]
async fn test_merge_non_object_tree_fails_for_that_locale() {
    let fixture = fixture_multi_locale().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(MergeTranslationsParams {
        project_root_path: fixture.root(),
        at: None,
        replace: false,
        subtrees: vec![
            subtree("en", json!("oops")),
            subtree("ja", json!({"common": {"cancel": "キャンセル"}})),
        ],
    });

    let result = server.merge_translations(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], false);
    assert_eq!(json_result["summary"]["failedLocales"], 1);
    assert_eq!(json_result["summary"]["successfulLocales"], 1);
    assert_eq!(
        fixture.read_locale_file("ja").unwrap()["common"]["cancel"],
        "キャンセル"
    );
}

#[tokio::test]
async fn test_merge_empty_subtrees() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(MergeTranslationsParams {
        project_root_path: fixture.root(),
        at: None,
        replace: false,
        subtrees: vec![],
    });

    let err = server.merge_translations(params).await.unwrap_err();
    assert!(err.message.contains("subtrees cannot be empty"));
}

#[tokio::test]
async fn test_merge_replace_drops_keys_missing_from_subtree() {
    let fixture = fixture_multi_locale().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(MergeTranslationsParams {
        project_root_path: fixture.root(),
        at: Some("common".to_string()),
        replace: true,
        subtrees: vec![subtree("en", json!({"submit": "Send", "close": "Close"}))],
    });

    let result = server.merge_translations(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    assert_eq!(json_result["results"][0]["added"], json!(["common.close"]));
    assert_eq!(json_result["results"][0]["changed"], json!(["common.submit"]));
    assert_eq!(json_result["results"][0]["removed"], json!(["common.cancel"]));
    assert_eq!(json_result["summary"]["totalKeysRemoved"], 1);

    let en = fixture.read_locale_file("en").unwrap();
    assert_eq!(en["common"], json!({"submit": "Send", "close": "Close"}));
    assert_eq!(en["home"]["title"], "Welcome");
}

#[tokio::test]
async fn test_merge_replace_without_at() {
    let fixture = fixture_multi_locale().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(MergeTranslationsParams {
        project_root_path: fixture.root(),
        at: None,
        replace: true,
        subtrees: vec![subtree("en", json!({"common": {}}))],
    });

    let err = server.merge_translations(params).await.unwrap_err();
    assert!(err.message.contains("'replace' requires 'at'"));
    assert_eq!(
        fixture.read_locale_file("en").unwrap()["common"]["cancel"],
        "Cancel"
    );
}
