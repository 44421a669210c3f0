//! Turns raw service replies into validated results.
//!
//! Incomplete entries are dropped one by one; a reply of the wrong overall
//! shape normalizes to an empty list. Nothing here fails.

use serde_json::{Map, Value};

use crate::emotion::{Emotion, EmotionResult, Rectangle, ScoreSet};
use crate::tags::Tag;

const FACE_RECTANGLE: &str = "faceRectangle";
const SCORES: &str = "scores";
const TAGS: &str = "tags";

/// Normalize an emotion reply: a top-level array of face hits.
pub fn normalize_emotions(reply: &Value) -> Vec<EmotionResult> {
    let Some(hits) = reply.as_array() else {
        tracing::debug!("emotion reply is not an array");
        return Vec::new();
    };

    hits.iter()
        .enumerate()
        .filter_map(|(index, hit)| {
            let result = resolve_hit(hit);
            if result.is_none() {
                tracing::trace!(index, "dropping incomplete face hit");
            }
            result
        })
        .collect()
}

/// Normalize a vision analysis reply: `{"tags": [{name, confidence}, ...]}`.
pub fn normalize_tags(reply: &Value) -> Vec<Tag> {
    let Some(entries) = reply.get(TAGS).and_then(Value::as_array) else {
        tracing::debug!("vision reply carries no tag array");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name")?.as_str()?;
            let confidence = entry.get("confidence")?.as_f64()?;
            Some(Tag {
                name: name.to_string(),
                confidence,
            })
        })
        .collect()
}

fn resolve_hit(hit: &Value) -> Option<EmotionResult> {
    let hit = hit.as_object()?;
    let rect = resolve_rectangle(hit)?;
    let emotion = resolve_scores(hit)?.dominant()?;
    Some(EmotionResult { rect, emotion })
}

fn resolve_rectangle(hit: &Map<String, Value>) -> Option<Rectangle> {
    let frame = hit.get(FACE_RECTANGLE)?.as_object()?;
    let field = |key: &str| -> Option<u32> { frame.get(key)?.as_u64()?.try_into().ok() };

    Some(Rectangle {
        left: field("left")?,
        top: field("top")?,
        width: field("width")?,
        height: field("height")?,
    })
}

fn resolve_scores(hit: &Map<String, Value>) -> Option<ScoreSet> {
    let scores = hit.get(SCORES)?.as_object()?;
    let mut values = [0.0; 8];
    for (slot, emotion) in values.iter_mut().zip(Emotion::ALL) {
        *slot = scores.get(emotion.key())?.as_f64()?;
    }
    Some(ScoreSet::new(values))
}
