use family_tree_layout::layout::{LayoutVariant, derive};
use family_tree_layout::{Config, Person, SavedLayout};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOptions {
    node_pitch: Option<f64>,
    row_pitch: Option<f64>,
    parent_stroke: Option<String>,
    married_stroke: Option<String>,
}

fn build_config(options: LayoutOptions) -> Config {
    let mut config = Config::default();
    if let Some(v) = options.node_pitch {
        config.layout.node_pitch = v;
    }
    if let Some(v) = options.row_pitch {
        config.layout.row_pitch = v;
    }
    if let Some(v) = options.parent_stroke {
        config.theme.parent_stroke = v;
    }
    if let Some(v) = options.married_stroke {
        config.theme.married_stroke = v;
    }
    config
}

fn derive_json(
    persons_json: &str,
    saved_layout_json: Option<&str>,
    read_only: bool,
    options: LayoutOptions,
) -> Result<String, String> {
    let persons: Vec<Person> = serde_json::from_str(persons_json).map_err(|e| e.to_string())?;
    let saved = saved_layout_json
        .map(SavedLayout::from_json_lenient)
        .unwrap_or_default();
    let variant = if read_only {
        LayoutVariant::ReadOnly
    } else {
        LayoutVariant::Editable
    };
    let layout = derive(variant, &persons, &saved, &build_config(options));
    serde_json::to_string(&layout).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn derive_layout_json(
    persons_json: &str,
    saved_layout_json: Option<String>,
    read_only: bool,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<LayoutOptions>(&raw)
            .map_err(|error| JsValue::from_str(&error.to_string()))?,
        None => LayoutOptions::default(),
    };
    derive_json(persons_json, saved_layout_json.as_deref(), read_only, options)
        .map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use crate::{LayoutOptions, derive_json};

    const PERSONS: &str = r#"[
        {"id": "a", "firstName": "Ann", "relationshipsAsOne": [
            {"id": "r1", "type": "PARENT", "personOneId": "a", "personTwoId": "b"}
        ]},
        {"id": "b", "firstName": "Bob", "relationshipsAsTwo": [
            {"id": "r1", "type": "PARENT", "personOneId": "a", "personTwoId": "b"}
        ]}
    ]"#;

    #[test]
    fn derives_editable_layout_json() {
        let json = derive_json(PERSONS, None, false, LayoutOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"][1]["position"]["y"], 150.0);
        assert_eq!(value["edges"][0]["id"], "parent-a-b");
    }

    #[test]
    fn read_only_uses_saved_layout() {
        let saved = r#"{"nodes": [{"id": "b", "position": {"x": 7, "y": 8}}], "edges": []}"#;
        let json = derive_json(PERSONS, Some(saved), true, LayoutOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"].as_array().unwrap().len(), 1);
        assert_eq!(value["nodes"][0]["draggable"], false);
    }

    #[test]
    fn reports_bad_person_json() {
        assert!(derive_json("{", None, false, LayoutOptions::default()).is_err());
    }
}
