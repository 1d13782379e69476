use serde::Deserialize;
use std::collections::HashMap;

/// the subset of an Overpass JSON response used to build a road network.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverpassElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::{OverpassElement, OverpassResponse};

    #[test]
    fn test_decode() {
        let json = r#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 1, "lat": 41.3, "lon": -72.9},
                {"type": "way", "id": 10, "nodes": [1, 2], "tags": {"highway": "primary", "maxspeed": "40 mph"}},
                {"type": "relation", "id": 100, "members": []}
            ]
        }"#;
        let response: OverpassResponse = serde_json::from_str(json).expect("should decode");
        assert_eq!(response.elements.len(), 3);
        match &response.elements[1] {
            OverpassElement::Way { id, nodes, tags } => {
                assert_eq!(*id, 10);
                assert_eq!(nodes, &vec![1, 2]);
                assert_eq!(tags.get("maxspeed").map(String::as_str), Some("40 mph"));
            }
            other => panic!("expected way, found {other:?}"),
        }
        assert!(matches!(response.elements[2], OverpassElement::Other));
    }
}
