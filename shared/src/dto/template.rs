//! # Template DTOs
//!
//! Swap templates are pre-defined target images or videos a user's face is
//! composited into. Templates are owned by the backend and read-only here.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Kind of media a template (and the resulting swap) produces.
///
/// Serialized as `"IMAGE"` / `"VIDEO"`. Lowercase spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaKind {
    #[serde(alias = "image")]
    Image,
    #[serde(alias = "video")]
    Video,
}

impl MediaKind {
    /// Short human label for badges.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "IMAGE"),
            MediaKind::Video => write!(f, "VIDEO"),
        }
    }
}

/// Swap template as returned by `GET /templates/` and `GET /templates/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub title: String,
    /// Media kind, `type` on the wire
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Preview image reference
    pub thumbnail: String,
    /// Full-resolution source media, when it differs from the thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Gem cost per swap
    pub cost: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Template {
    /// Reference the backend should composite into.
    ///
    /// Falls back to the thumbnail when no separate source media exists.
    pub fn swap_target(&self) -> &str {
        self.source_url.as_deref().unwrap_or(&self.thumbnail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_json(source: Option<&str>) -> String {
        match source {
            Some(s) => format!(
                r#"{{"id":3,"title":"Neon City","type":"VIDEO","thumbnail":"/t/neon.jpg","source_url":"{}","cost":10,"created_at":"2025-01-01T10:00:00.123456"}}"#,
                s
            ),
            None => r#"{"id":3,"title":"Neon City","type":"VIDEO","thumbnail":"/t/neon.jpg","cost":10}"#.to_string(),
        }
    }

    #[test]
    fn test_template_deserializes_backend_shape() {
        let template: Template = serde_json::from_str(&template_json(Some("/s/neon.mp4"))).unwrap();
        assert_eq!(template.id, 3);
        assert_eq!(template.kind, MediaKind::Video);
        assert_eq!(template.cost, 10);
        assert!(template.created_at.is_some());
    }

    #[test]
    fn test_swap_target_prefers_source_url() {
        let template: Template = serde_json::from_str(&template_json(Some("/s/neon.mp4"))).unwrap();
        assert_eq!(template.swap_target(), "/s/neon.mp4");
    }

    #[test]
    fn test_swap_target_falls_back_to_thumbnail() {
        let template: Template = serde_json::from_str(&template_json(None)).unwrap();
        assert_eq!(template.swap_target(), "/t/neon.jpg");
    }

    #[test]
    fn test_media_kind_accepts_lowercase() {
        let kind: MediaKind = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(kind, MediaKind::Image);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"IMAGE\"");
    }
}
