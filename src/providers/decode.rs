use crate::model::GameManual;
use log::debug;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("no JSON object found in the reply")]
    NotJson,

    #[error("JSON does not match the manual shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Picks the text that might hold the JSON object out of a model reply.
type Strategy = fn(&str) -> Option<&str>;

/// Tried in order; the first candidate that parses as a JSON object wins.
const STRATEGIES: [(&str, Strategy); 3] = [
    ("direct", direct),
    ("fenced", fenced_block),
    ("braces", outer_braces),
];

fn direct(payload: &str) -> Option<&str> {
    Some(payload.trim())
}

/// Contents of the first ``` fenced block, minus an optional language tag.
fn fenced_block(payload: &str) -> Option<&str> {
    let open = payload.find("```")?;
    let rest = &payload[open + 3..];
    let close = rest.find("```")?;
    let inner = &rest[..close];

    let inner = match inner.split_once('\n') {
        Some((tag, body)) if !tag.contains('{') => body,
        _ => inner,
    };
    Some(inner.trim())
}

/// Everything from the first `{` to the last `}`.
fn outer_braces(payload: &str) -> Option<&str> {
    let start = payload.find('{')?;
    let end = payload.rfind('}')?;
    (end > start).then(|| &payload[start..=end])
}

/// Recover the JSON object from a model reply.
pub fn decode_object(payload: &str) -> Option<Value> {
    STRATEGIES.iter().find_map(|(name, strategy)| {
        let candidate = strategy(payload)?;
        match serde_json::from_str::<Value>(candidate) {
            Ok(value @ Value::Object(_)) => {
                debug!("decoded reply with '{}' strategy", name);
                Some(value)
            }
            _ => None,
        }
    })
}

/// Recover a [`GameManual`] from a model reply.
pub fn decode_manual(payload: &str) -> Result<GameManual, DecodeError> {
    let value = decode_object(payload).ok_or(DecodeError::NotJson)?;
    Ok(serde_json::from_value(value)?)
}
