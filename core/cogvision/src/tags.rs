use serde::Serialize;

/// A descriptive tag returned by the vision analysis service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    /// Tag text, e.g. `"outdoor"`.
    pub name: String,
    /// Service confidence in the range 0.0–1.0.
    pub confidence: f64,
}

/// Render tags as a space-separated hashtag line, e.g. `"#outdoor #sky"`.
pub fn hashtags(tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| format!("#{}", tag.name))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str) -> Tag {
        Tag {
            name: name.to_string(),
            confidence: 0.5,
        }
    }

    #[test]
    fn hashtags_are_space_separated() {
        let line = hashtags(&[tag("outdoor"), tag("sky"), tag("grass")]);
        assert_eq!(line, "#outdoor #sky #grass");
    }

    #[test]
    fn no_tags_is_empty_line() {
        assert_eq!(hashtags(&[]), "");
    }
}
