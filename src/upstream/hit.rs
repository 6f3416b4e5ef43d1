//! Story hits as returned by the search API.
//!
//! Only the fields the archive shows are kept; everything else in the
//! upstream payload (`children`, `_highlightResult`, ...) is dropped on
//! deserialization so cached snapshots stay small.

use reqwest::Url;
use serde::{Deserialize, Serialize};

const HN_ITEM_URL: &str = "https://news.ycombinator.com/item?id=";

/// Tags the search API attaches to items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTag {
    Story,
    ShowHn,
    AskHn,
    Job,
    Poll,
    FrontPage,
}

impl HitTag {
    pub fn as_str(self) -> &'static str {
        match self {
            HitTag::Story => "story",
            HitTag::ShowHn => "show_hn",
            HitTag::AskHn => "ask_hn",
            HitTag::Job => "job",
            HitTag::Poll => "poll",
            HitTag::FrontPage => "front_page",
        }
    }
}

/// One story record. Field names follow the upstream wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_at_i: i64,
    #[serde(default)]
    pub num_comments: Option<u64>,
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub story_id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "_tags", default)]
    pub tags: Vec<String>,
}

impl Hit {
    pub fn has_tag(&self, tag: HitTag) -> bool {
        self.tags.iter().any(|t| t == tag.as_str())
    }

    /// Story id, falling back to the object id.
    pub fn item_id(&self) -> String {
        self.story_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| self.object_id.clone())
    }

    /// Discussion page on news.ycombinator.com.
    pub fn item_url(&self) -> String {
        format!("{}{}", HN_ITEM_URL, self.item_id())
    }

    /// Where the title links to: the story url, or the discussion for text posts.
    pub fn link(&self) -> String {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.item_url(),
        }
    }

    /// Host of the story url, if it has a parseable one.
    pub fn host(&self) -> Option<String> {
        let url = Url::parse(self.url.as_deref()?).ok()?;
        url.host_str().map(str::to_string)
    }

    fn is_prefixed_post(&self) -> bool {
        self.has_tag(HitTag::AskHn) || self.has_tag(HitTag::ShowHn)
    }

    /// "Ask HN" / "Show HN" badge taken from the title prefix.
    pub fn badge(&self) -> Option<String> {
        if !self.is_prefixed_post() {
            return None;
        }
        let title = self.title.as_deref()?;
        title.split_once(':').map(|(prefix, _)| prefix.to_string())
    }

    /// Title with the badge prefix removed.
    pub fn display_title(&self) -> String {
        let title = self.title.clone().unwrap_or_default();
        if !self.is_prefixed_post() {
            return title;
        }
        match title.split_once(':') {
            Some((_, rest)) => rest.trim_start().to_string(),
            None => title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(value: serde_json::Value) -> Hit {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_bulky_fields_are_dropped() {
        let parsed = hit(json!({
            "objectID": "1",
            "title": "Hello",
            "children": [1, 2, 3],
            "_highlightResult": {"title": {"value": "Hello"}},
            "_tags": ["story"]
        }));
        let round = serde_json::to_value(&parsed).unwrap();
        assert!(round.get("children").is_none());
        assert!(round.get("_highlightResult").is_none());
        assert_eq!(round["objectID"], "1");
        assert_eq!(round["_tags"], json!(["story"]));
    }

    #[test]
    fn test_link_falls_back_to_item_page() {
        let text_post = hit(json!({"objectID": "42", "url": null}));
        assert_eq!(text_post.link(), "https://news.ycombinator.com/item?id=42");
        assert!(text_post.host().is_none());

        let story = hit(json!({"objectID": "1", "story_id": 7, "url": "https://example.com/a/b"}));
        assert_eq!(story.link(), "https://example.com/a/b");
        assert_eq!(story.item_url(), "https://news.ycombinator.com/item?id=7");
        assert_eq!(story.host().as_deref(), Some("example.com"));
    }

    #[test]
    fn test_badge_for_show_hn() {
        let show = hit(json!({
            "objectID": "1",
            "title": "Show HN: A thing: with colons",
            "_tags": ["story", "show_hn"]
        }));
        assert_eq!(show.badge().as_deref(), Some("Show HN"));
        assert_eq!(show.display_title(), "A thing: with colons");
    }

    #[test]
    fn test_plain_story_keeps_title() {
        let story = hit(json!({"objectID": "1", "title": "Rust: a retrospective", "_tags": ["story"]}));
        assert!(story.badge().is_none());
        assert_eq!(story.display_title(), "Rust: a retrospective");
    }
}
