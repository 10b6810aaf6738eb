use agentdash_core::resolve::{resolve_url, resolve_url_traced, ShapeHypothesis};
use serde_json::{json, Value};

#[test]
fn descriptor_list_file_url() {
    let envelope = json!({"module_outputs": [{"file_url": "https://x/img.png"}]});
    assert_eq!(resolve_url(&envelope, &Value::Null), "https://x/img.png");
}

#[test]
fn descriptor_list_falls_back_to_url() {
    let envelope = json!({"module_outputs": [{"url": "https://x/a.png"}, {"file_url": "https://x/b.png"}]});
    assert_eq!(resolve_url(&envelope, &Value::Null), "https://x/a.png");
}

#[test]
fn artifact_file_list_inside_mapping() {
    let envelope = json!({"module_outputs": {"artifact_files": [{"file_url": "https://x/art.png"}]}});
    let res = resolve_url_traced(&envelope, &Value::Null);
    assert_eq!(res.url, "https://x/art.png");
    assert_eq!(res.hypothesis, Some(ShapeHypothesis::ModuleOutputsArtifactList));
}

#[test]
fn artifact_file_list_beats_mapping_fields() {
    let envelope = json!({"module_outputs": {
        "url": "https://x/direct.png",
        "artifact_files": [{"url": "https://x/artifact.png"}]
    }});
    let res = resolve_url_traced(&envelope, &Value::Null);
    assert_eq!(res.url, "https://x/artifact.png");
    assert_eq!(res.hypothesis, Some(ShapeHypothesis::ModuleOutputsArtifactList));
}

#[test]
fn mapping_fields_in_order() {
    let envelope = json!({"module_outputs": {"image_url": "https://x/i.png", "url": "https://x/u.png"}});
    assert_eq!(resolve_url(&envelope, &Value::Null), "https://x/u.png");
}

#[test]
fn artifact_file_mapping() {
    let envelope = json!({"module_outputs": {"artifact_files": {"url": "https://x/m.png"}}});
    let res = resolve_url_traced(&envelope, &Value::Null);
    assert_eq!(res.url, "https://x/m.png");
    assert_eq!(res.hypothesis, Some(ShapeHypothesis::ModuleOutputsArtifactMap));
}

#[test]
fn parsed_result_fields_in_order() {
    let parsed = json!({"url": "https://p/u.png", "image": "https://p/i.png", "file_url": "https://p/f.png"});
    assert_eq!(resolve_url(&json!({}), &parsed), "https://p/f.png");
}

#[test]
fn envelope_beats_parsed_result() {
    let envelope = json!({"module_outputs": [{"file_url": "https://env/x.png"}]});
    let parsed = json!({"image_url": "https://parsed/x.png"});
    assert_eq!(resolve_url(&envelope, &parsed), "https://env/x.png");
}

#[test]
fn raw_response_text_with_module_outputs_mapping() {
    let envelope = json!({"raw_response": r#"{"module_outputs":{"url":"https://y/z.png"}}"#});
    let res = resolve_url_traced(&envelope, &Value::Null);
    assert_eq!(res.url, "https://y/z.png");
    assert_eq!(res.hypothesis, Some(ShapeHypothesis::RawResponse));
}

#[test]
fn raw_response_structured_descriptor_list() {
    let envelope = json!({"raw_response": {"module_outputs": [{"url": "https://r/list.png"}]}});
    assert_eq!(resolve_url(&envelope, &Value::Null), "https://r/list.png");
}

#[test]
fn raw_response_nested_under_response_or_data() {
    let under_response = json!({"raw_response": {"response": {"module_outputs": {"file_url": "https://r/resp.png"}}}});
    assert_eq!(resolve_url(&under_response, &Value::Null), "https://r/resp.png");

    let under_data = json!({"raw_response": {"data": {"module_outputs": {"artifact_files": [{"url": "https://r/data.png"}]}}}});
    assert_eq!(resolve_url(&under_data, &Value::Null), "https://r/data.png");
}

#[test]
fn raw_response_top_level_fields() {
    let envelope = json!({"raw_response": "```json\n{\"response\": {\"image_url\": \"https://r/deep.png\"}}\n```"});
    assert_eq!(resolve_url(&envelope, &Value::Null), "https://r/deep.png");

    let envelope = json!({"raw_response": {"file_url": "https://r/top.png"}});
    assert_eq!(resolve_url(&envelope, &Value::Null), "https://r/top.png");
}

#[test]
fn unparseable_raw_response_is_skipped() {
    let envelope = json!({"raw_response": "upstream timeout"});
    assert_eq!(resolve_url(&envelope, &Value::Null), "");
}

#[test]
fn raw_response_does_not_recurse() {
    let envelope = json!({"raw_response": {"raw_response": {"url": "https://too/deep.png"}}});
    assert_eq!(resolve_url(&envelope, &Value::Null), "");
}

#[test]
fn no_match_returns_empty_string() {
    let envelope = json!({
        "success": true,
        "module_outputs": [],
        "response": {"result": "done"},
        "error": null
    });
    let res = resolve_url_traced(&envelope, &json!({"style": "Modern"}));
    assert_eq!(res.url, "");
    assert_eq!(res.hypothesis, None);
}

#[test]
fn wrong_shapes_never_panic() {
    let shapes = [
        json!(null),
        json!("envelope as text"),
        json!([1, 2, 3]),
        json!({"module_outputs": "oops"}),
        json!({"module_outputs": [null, {"url": 5}]}),
        json!({"module_outputs": {"artifact_files": 9, "url": ["x"]}}),
        json!({"raw_response": 12}),
        json!({"raw_response": ["a"]}),
    ];
    for envelope in shapes {
        assert_eq!(resolve_url(&envelope, &json!("parsed text")), "", "envelope: {envelope}");
    }
}
