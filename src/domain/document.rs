use serde_json::Value;

/// Flattens a JIRA rich-text document into plain text.
///
/// Text leaves are collected depth-first in document order and joined with a
/// single space. Anything that is not an object carrying a `content` list
/// yields an empty string.
pub fn extract_text(document: &Value) -> String {
    let Some(nodes) = document.get("content").and_then(Value::as_array) else {
        return String::new();
    };

    let mut parts = Vec::new();
    collect_text(nodes, &mut parts);
    parts.join(" ")
}

fn collect_text<'a>(nodes: &'a [Value], parts: &mut Vec<&'a str>) {
    for node in nodes {
        if node.get("type").and_then(Value::as_str) == Some("text") {
            if let Some(text) = node.get("text").and_then(Value::as_str) {
                parts.push(text);
            }
        }
        if let Some(children) = node.get("content").and_then(Value::as_array) {
            collect_text(children, parts);
        }
    }
}
