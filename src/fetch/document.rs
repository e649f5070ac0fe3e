//! Locating the root node inside a Figma API response

use serde_json::Value;

use super::error::{FetchError, FetchResult};

/// Pulls the node to compress out of a response body.
///
/// `GET /files/:key/nodes` answers `{"nodes": {"1:2": {"document": ...}}}`;
/// the requested id wins, otherwise the first entry carrying a document is
/// used. `GET /files/:key` answers `{"document": ...}`. A bare node (anything
/// with a `type`) is accepted as-is so local exports work too.
pub fn extract_root(mut response: Value, node_id: Option<&str>) -> FetchResult<Value> {
    if let Some(nodes) = response.get_mut("nodes").and_then(Value::as_object_mut) {
        if let Some(id) = node_id {
            if let Some(doc) = nodes.get_mut(id).and_then(|entry| entry.get_mut("document")) {
                if doc.is_object() {
                    return Ok(doc.take());
                }
            }
        }
        for entry in nodes.values_mut() {
            if let Some(doc) = entry.get_mut("document") {
                if doc.is_object() {
                    return Ok(doc.take());
                }
            }
        }
        return Err(FetchError::MissingDocument);
    }

    if let Some(doc) = response.get_mut("document") {
        if doc.is_object() {
            return Ok(doc.take());
        }
        return Err(FetchError::MissingDocument);
    }

    if response.get("type").is_some_and(Value::is_string) {
        return Ok(response);
    }

    Err(FetchError::MissingDocument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_response() {
        let response = json!({"name": "File", "document": {"type": "DOCUMENT", "name": "Doc"}});
        let root = extract_root(response, None).unwrap();
        assert_eq!(root["type"], "DOCUMENT");
    }

    #[test]
    fn test_nodes_response_prefers_requested_id() {
        let response = json!({"nodes": {
            "1:1": {"document": {"type": "FRAME", "name": "first"}},
            "2:2": {"document": {"type": "FRAME", "name": "wanted"}}
        }});
        let root = extract_root(response, Some("2:2")).unwrap();
        assert_eq!(root["name"], "wanted");
    }

    #[test]
    fn test_nodes_response_falls_back_to_first_document() {
        let response = json!({"nodes": {
            "1:1": null,
            "3:3": {"document": {"type": "FRAME", "name": "fallback"}}
        }});
        let root = extract_root(response, Some("9:9")).unwrap();
        assert_eq!(root["name"], "fallback");
    }

    #[test]
    fn test_bare_node_is_its_own_root() {
        let node = json!({"type": "FRAME", "name": "Exported"});
        assert_eq!(extract_root(node.clone(), None).unwrap(), node);
    }

    #[test]
    fn test_missing_document() {
        assert!(matches!(
            extract_root(json!({"nodes": {}}), Some("1:1")),
            Err(FetchError::MissingDocument)
        ));
        assert!(matches!(
            extract_root(json!({"err": "nope"}), None),
            Err(FetchError::MissingDocument)
        ));
        assert!(matches!(
            extract_root(json!({"document": null}), None),
            Err(FetchError::MissingDocument)
        ));
    }
}
