use serde::{Deserialize, Serialize};

/// A short link as returned by `GET /links`.
///
/// The upstream service has shipped both snake_case and Go-style field
/// names, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(alias = "Id")]
    pub id: i64,
    #[serde(alias = "OriginalURL")]
    pub original_url: String,
    #[serde(alias = "ShortURL")]
    pub short_url: String,
    #[serde(default, alias = "CreatedAt")]
    pub created_at: String,
    #[serde(default, alias = "Clicks")]
    pub clicks: i64,
    #[serde(default = "default_enabled", alias = "IsEnabled")]
    pub is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Body of a successful `POST /links`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedLink {
    pub short_url: String,
    #[serde(default, alias = "original_url")]
    pub long_url: Option<String>,
    #[serde(default)]
    pub link_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_snake_case() {
        let link: Link = serde_json::from_value(json!({
            "id": 7,
            "original_url": "https://example.com/very/long",
            "short_url": "localhost:8080/abc123",
            "created_at": "2024-05-01T10:00:00Z",
            "clicks": 12,
            "is_enabled": false
        }))
        .unwrap();
        assert_eq!(link.id, 7);
        assert_eq!(link.clicks, 12);
        assert!(!link.is_enabled);
    }

    #[test]
    fn test_link_go_style_names() {
        let link: Link = serde_json::from_value(json!({
            "Id": 3,
            "OriginalURL": "https://rust-lang.org",
            "ShortURL": "localhost:8080/zzz999",
            "CreatedAt": "2024-05-01T10:00:00Z",
            "Clicks": 0,
            "IsEnabled": true
        }))
        .unwrap();
        assert_eq!(link.short_url, "localhost:8080/zzz999");
        assert!(link.is_enabled);
    }

    #[test]
    fn test_link_optional_fields_default() {
        let link: Link = serde_json::from_value(json!({
            "id": 1,
            "original_url": "https://a.example",
            "short_url": "s/1"
        }))
        .unwrap();
        assert_eq!(link.clicks, 0);
        assert!(link.is_enabled);
        assert_eq!(link.created_at, "");
    }

    #[test]
    fn test_created_link() {
        let created: CreatedLink = serde_json::from_value(json!({
            "short_url": "abc123",
            "long_url": "https://example.com",
            "link_id": 42
        }))
        .unwrap();
        assert_eq!(created.long_url.as_deref(), Some("https://example.com"));
        assert_eq!(created.link_id, Some(42));
    }
}
