use serde::{Deserialize, Serialize};

use crate::utils::CCStr;

use super::{Ack, ApiClient, ApiError};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Metrics {
    pub users: u64,
    pub views_today: u64,
    pub topic_contents: u64,
    pub blog_posts: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngagementSummary {
    pub unique_visitors: u64,
    #[serde(default)]
    pub peak_hour_range: Option<CCStr>,
    #[serde(default)]
    pub peak_day: Option<CCStr>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngagementRate {
    pub engagement_rate_percent: f64,
    pub engaged_visitors: u64,
    pub total_visitors: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageViews {
    pub title: CCStr,
    pub views: u64,
}

#[derive(Debug, Deserialize)]
struct PageViewsList {
    views: Vec<PageViews>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewsRange {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ViewsRange {
    pub const ALL: [ViewsRange; 3] = [ViewsRange::Daily, ViewsRange::Weekly, ViewsRange::Monthly];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewsRange::Daily => "daily",
            ViewsRange::Weekly => "weekly",
            ViewsRange::Monthly => "monthly",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewsRange::Daily => "Today",
            ViewsRange::Weekly => "This week",
            ViewsRange::Monthly => "This month",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStart {
    pub session_id: CCStr,
    pub device_type: CCStr,
    pub country: CCStr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEnd {
    pub session_id: CCStr,
    pub time_spent: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtopicView {
    pub session_id: CCStr,
    pub subtopic_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_depth_percent: Option<f64>,
}

impl ApiClient {
    pub async fn metrics(&self) -> Result<Metrics, ApiError> {
        self.get("analytics/metrics", &[]).await
    }

    pub async fn engagement_summary(&self) -> Result<EngagementSummary, ApiError> {
        self.get("analytics/engagement-summary", &[]).await
    }

    pub async fn engagement_rate(&self) -> Result<EngagementRate, ApiError> {
        self.get("analytics/engagement-rate", &[]).await
    }

    pub async fn page_views(&self, range: ViewsRange) -> Result<Vec<PageViews>, ApiError> {
        let list: PageViewsList = self
            .get(
                "analytics/page-views",
                &[("range".to_owned(), range.as_str().to_owned())],
            )
            .await?;
        Ok(list.views)
    }

    pub async fn session_start(&self, beacon: &SessionStart) -> Result<Ack, ApiError> {
        self.post("analytics/session/start", beacon).await
    }

    pub async fn session_end(&self, beacon: &SessionEnd) -> Result<Ack, ApiError> {
        self.post("analytics/session/end", beacon).await
    }

    pub async fn subtopic_view(&self, beacon: &SubtopicView) -> Result<Ack, ApiError> {
        self.post("analytics/subtopic/view", beacon).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_response;

    #[test]
    fn engagement_payloads_decode() {
        let rate: EngagementRate = decode_response(
            200,
            r#"{"engagement_rate_percent": 37.5, "engaged_visitors": 3, "total_visitors": 8}"#,
        )
        .unwrap();
        assert_eq!(rate.engaged_visitors, 3);

        let summary: EngagementSummary = decode_response(
            200,
            r#"{"unique_visitors": 12, "peak_hour_range": "14:00 - 15:00", "peak_day": null}"#,
        )
        .unwrap();
        assert_eq!(summary.peak_day, None);

        let list: PageViewsList =
            decode_response(200, r#"{"views": [{"title": "Loops", "views": 9}]}"#).unwrap();
        assert_eq!(list.views[0].title.as_ref(), "Loops");
    }

    #[test]
    fn beacons_serialize_expected_fields() {
        let view = SubtopicView {
            session_id: "abc".into(),
            subtopic_id: 4,
            time_spent_seconds: None,
            scroll_depth_percent: None,
        };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::json!({"session_id": "abc", "subtopic_id": 4})
        );

        let end = SessionEnd {
            session_id: "abc".into(),
            time_spent: 65,
        };
        assert_eq!(
            serde_json::to_value(&end).unwrap(),
            serde_json::json!({"session_id": "abc", "time_spent": 65})
        );
    }

    #[test]
    fn views_range_parses() {
        assert_eq!(ViewsRange::from_value("weekly"), Some(ViewsRange::Weekly));
        assert_eq!(ViewsRange::from_value("yearly"), None);
    }
}
