use serde::Deserialize;

use crate::utils::CCStr;

use super::{ApiClient, ApiError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SidebarSubtopic {
    pub title: CCStr,
    pub slug: CCStr,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SidebarTopic {
    pub id: u64,
    pub title: CCStr,
    #[serde(default)]
    pub slug: Option<CCStr>,
    #[serde(default)]
    pub subtopics: Vec<SidebarSubtopic>,
}

impl SidebarTopic {
    /// Slug used in tutorial routes, derived from the title when the backend gives none.
    pub fn route_slug(&self) -> CCStr {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => slugify(&self.title),
        }
    }

    /// A topic holding a single subtopic of the same title is shown as a plain link.
    pub fn direct_link(&self) -> Option<&SidebarSubtopic> {
        match self.subtopics.as_slice() {
            [only] if only.title.trim().eq_ignore_ascii_case(self.title.trim()) => Some(only),
            _ => None,
        }
    }

    pub fn contains(&self, subtopic_slug: &str) -> bool {
        self.subtopics
            .iter()
            .any(|s| s.slug.eq_ignore_ascii_case(subtopic_slug))
    }
}

pub fn slugify(title: &str) -> CCStr {
    let mut slug = String::with_capacity(title.len());
    for c in title.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    CCStr::from(slug.trim_end_matches('-'))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subtopic {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: CCStr,
    #[serde(default)]
    pub content: CCStr,
    #[serde(default)]
    pub next_subtopic_slug: Option<CCStr>,
    #[serde(default)]
    pub all_subtopics: Vec<CCStr>,
}

impl ApiClient {
    pub async fn sidebar_topics(&self) -> Result<Vec<SidebarTopic>, ApiError> {
        self.get("topics/sidebar", &[]).await
    }

    pub async fn subtopic(&self, topic: &str, subtopic: &str) -> Result<Subtopic, ApiError> {
        self.get(&format!("topics/{topic}/{subtopic}"), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_response;

    fn topics() -> Vec<SidebarTopic> {
        decode_response(
            200,
            r#"[
                {"id": 1, "title": "Introduction",
                 "subtopics": [{"title": " introduction ", "slug": "introduction"}]},
                {"id": 2, "title": "Control Flow",
                 "subtopics": [{"title": "If", "slug": "if-statements"},
                               {"title": "Loops", "slug": "Loops"}]},
                {"id": 3, "title": "Empty"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn single_same_title_subtopic_is_a_direct_link() {
        let topics = topics();
        assert_eq!(
            topics[0].direct_link().map(|s| s.slug.as_ref()),
            Some("introduction")
        );
        assert!(topics[1].direct_link().is_none());
        assert!(topics[2].direct_link().is_none());
    }

    #[test]
    fn active_subtopic_lookup_ignores_case() {
        let topics = topics();
        assert!(topics[1].contains("loops"));
        assert!(!topics[0].contains("loops"));
    }

    #[test]
    fn route_slug_falls_back_to_title() {
        let topics = topics();
        assert_eq!(topics[1].route_slug().as_ref(), "control-flow");
        assert_eq!(slugify("  C++ & Rust!  ").as_ref(), "c-rust");
    }

    #[test]
    fn subtopic_decodes() {
        let sub: Subtopic = decode_response(
            200,
            r#"{"title": "Loops", "content": "<p>for</p>", "next_subtopic_slug": null,
                "all_subtopics": ["if-statements", "loops"]}"#,
        )
        .unwrap();
        assert_eq!(sub.id, None);
        assert_eq!(sub.all_subtopics.len(), 2);
    }
}
