use serde_json::{json, Map, Value};

fn bilingual() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "en": { "type": "STRING", "description": "The English text." },
            "zh": { "type": "STRING", "description": "The Simplified Chinese translation." }
        },
        "required": ["en", "zh"]
    })
}

/// An OBJECT node whose properties are all required.
fn object(properties: Vec<(&str, Value)>) -> Value {
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required
    })
}

fn titled(field: &str) -> Value {
    object(vec![("title", bilingual()), (field, bilingual())])
}

fn board() -> Value {
    object(vec![("name", bilingual()), ("usage", bilingual())])
}

/// Response schema for backends that accept one (Gemini's `responseSchema`).
pub fn manual_response_schema() -> Value {
    object(vec![
        ("targetWord", bilingual()),
        ("coreGame", titled("description")),
        (
            "gameBoards",
            object(vec![
                ("title", bilingual()),
                ("boardA", board()),
                ("boardB", board()),
            ]),
        ),
        (
            "originAndTeardown",
            object(vec![
                ("title", bilingual()),
                ("teardown", bilingual()),
                ("story", bilingual()),
            ]),
        ),
        ("foulWarning", titled("description")),
        ("masteryTip", titled("description")),
    ])
}
