use locmerge::mcp::{
    LocmergeMcpServer,
    types::{InsertMissingKeysParams, TranslationEntry},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Map, Value, json};

use crate::{McpTestFixture, extract_tool_result_json, fixture_multi_locale};

fn entry(locale: &str, keys: Value) -> TranslationEntry {
    let Value::Object(keys) = keys else {
        panic!("keys must be an object");
    };
    TranslationEntry {
        locale: locale.to_string(),
        keys,
    }
}

#[tokio::test]
async fn test_insert_single_locale_single_key() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(InsertMissingKeysParams {
        project_root_path: fixture.root(),
        translations: vec![entry("en", json!({"greeting": "Hello"}))],
    });

    let result = server.insert_missing_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    assert_eq!(json_result["summary"]["totalLocales"], 1);
    assert_eq!(json_result["summary"]["successfulLocales"], 1);
    assert_eq!(json_result["summary"]["failedLocales"], 0);
    assert_eq!(json_result["summary"]["totalKeysAdded"], 1);
    assert_eq!(json_result["summary"]["totalKeysKept"], 0);

    // Verify file was created
    let locale_data = fixture.read_locale_file("en").unwrap();
    assert_eq!(locale_data, json!({"greeting": "Hello"}));
}

#[tokio::test]
async fn test_insert_nested_keys_multiple_locales() {
    let fixture = fixture_multi_locale().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(InsertMissingKeysParams {
        project_root_path: fixture.root(),
        translations: vec![
            entry("en", json!({"crm.leads.title": "Leads"})),
            entry("ja", json!({"crm.leads.title": "リード", "common.cancel": "キャンセル"})),
        ],
    });

    let result = server.insert_missing_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    assert_eq!(json_result["summary"]["totalKeysAdded"], 3);

    let en = fixture.read_locale_file("en").unwrap();
    assert_eq!(en["crm"]["leads"]["title"], "Leads");
    assert_eq!(en["common"]["submit"], "Submit");

    let ja = fixture.read_locale_file("ja").unwrap();
    assert_eq!(
        ja,
        json!({
            "common": {"submit": "送信", "cancel": "キャンセル"},
            "crm": {"leads": {"title": "リード"}}
        })
    );
}

#[tokio::test]
async fn test_insert_never_overwrites() {
    let fixture = fixture_multi_locale().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(InsertMissingKeysParams {
        project_root_path: fixture.root(),
        translations: vec![entry("zh", json!({"common.submit": "确定"}))],
    });

    let result = server.insert_missing_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["summary"]["totalKeysAdded"], 0);
    assert_eq!(json_result["summary"]["totalKeysKept"], 1);
    assert_eq!(json_result["results"][0]["details"][0]["action"], "kept");

    let zh = fixture.read_locale_file("zh").unwrap();
    assert_eq!(zh["common"]["submit"], "提交");
}

#[tokio::test]
async fn test_insert_reports_conflict() {
    let fixture = McpTestFixture::with_messages(vec![("en", json!({"home": "Home"}))]).unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(InsertMissingKeysParams {
        project_root_path: fixture.root(),
        translations: vec![entry("en", json!({"home.title": "Welcome", "about": "About"}))],
    });

    let result = server.insert_missing_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    assert_eq!(json_result["summary"]["totalConflicts"], 1);
    assert_eq!(json_result["results"][0]["conflictCount"], 1);

    let en = fixture.read_locale_file("en").unwrap();
    assert_eq!(en, json!({"home": "Home", "about": "About"}));
}

#[tokio::test]
async fn test_insert_partial_failure() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(InsertMissingKeysParams {
        project_root_path: fixture.root(),
        translations: vec![
            entry("en", json!({"greeting": "Hello"})),
            entry("../evil", json!({"greeting": "Hi"})),
        ],
    });

    let result = server.insert_missing_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], false);
    assert_eq!(json_result["summary"]["successfulLocales"], 1);
    assert_eq!(json_result["summary"]["failedLocales"], 1);
    assert_eq!(json_result["results"][1]["success"], false);
    assert!(
        json_result["results"][1]["error"]
            .as_str()
            .unwrap()
            .contains("letters, numbers")
    );
    assert!(fixture.root_path().join("messages/en.json").exists());
}

#[tokio::test]
async fn test_insert_rejects_invalid_value() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocmergeMcpServer::new();

    let mut keys = Map::new();
    keys.insert("count".to_string(), json!(42));

    let params = Parameters(InsertMissingKeysParams {
        project_root_path: fixture.root(),
        translations: vec![TranslationEntry {
            locale: "en".to_string(),
            keys,
        }],
    });

    let result = server.insert_missing_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], false);
    assert!(
        json_result["results"][0]["error"]
            .as_str()
            .unwrap()
            .contains("Invalid value for key 'count'")
    );
}

#[tokio::test]
async fn test_insert_empty_translations() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocmergeMcpServer::new();

    let params = Parameters(InsertMissingKeysParams {
        project_root_path: fixture.root(),
        translations: vec![],
    });

    let err = server.insert_missing_keys(params).await.unwrap_err();
    assert!(err.message.contains("translations cannot be empty"));
}
