use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{
    pagination::{FetchResult, PageQuery},
    utils::CCStr,
};

use super::{ApiClient, ApiError};

/// Number of audit log entries per action type.
pub type AuditSummary = BTreeMap<CCStr, u64>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InactiveUser {
    pub user_id: u64,
    pub username: CCStr,
    pub role: CCStr,
    pub last_seen: CCStr,
}

#[derive(Debug, Deserialize)]
struct InactiveUsersPage {
    total: u64,
    users: Vec<InactiveUser>,
}

/// Daily login counts, `labels[i]` being the day of `data[i]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginTrend {
    pub labels: Vec<CCStr>,
    pub data: Vec<u64>,
}

impl LoginTrend {
    pub fn points(&self) -> impl Iterator<Item = (&CCStr, u64)> + '_ {
        self.labels.iter().zip(self.data.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeeklyActivity {
    pub week: CCStr,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionCount {
    pub action: CCStr,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryCount {
    pub country: CCStr,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelCount {
    pub label: CCStr,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceAnalytics {
    #[serde(default)]
    pub devices: Vec<LabelCount>,
    #[serde(default)]
    pub browsers: Vec<LabelCount>,
    #[serde(default)]
    pub os: Vec<LabelCount>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminActivity {
    pub username: CCStr,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditLogEntry {
    pub timestamp: CCStr,
    pub actor: CCStr,
    pub action_type: CCStr,
    #[serde(default)]
    pub target: Option<CCStr>,
    #[serde(default)]
    pub description: Option<CCStr>,
}

/// Color family used to draw an action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Create,
    Update,
    Delete,
    Login,
    Other,
}

impl ActionKind {
    pub fn of(action_type: &str) -> Self {
        let action = action_type.to_ascii_lowercase();
        if action.contains("create") || action.contains("register") {
            Self::Create
        } else if action.contains("update") || action.contains("assign") {
            Self::Update
        } else if action.contains("delete") {
            Self::Delete
        } else if action.contains("login") || action.contains("logout") {
            Self::Login
        } else {
            Self::Other
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ActionKind::Create => "action-create",
            ActionKind::Update => "action-update",
            ActionKind::Delete => "action-delete",
            ActionKind::Login => "action-login",
            ActionKind::Other => "action-other",
        }
    }
}

impl ApiClient {
    pub async fn audit_summary(&self) -> Result<AuditSummary, ApiError> {
        self.get("audit/audit-summary", &[]).await
    }

    pub async fn inactive_users(
        &self,
        query: &PageQuery,
    ) -> Result<FetchResult<InactiveUser>, ApiError> {
        let page: InactiveUsersPage = self
            .get("audit/inactive-users", &query.page_params())
            .await?;
        Ok(FetchResult::new(page.users, page.total))
    }

    pub async fn login_trend(&self) -> Result<LoginTrend, ApiError> {
        self.get("audit/login-trend", &[]).await
    }

    pub async fn weekly_activity(&self) -> Result<Vec<WeeklyActivity>, ApiError> {
        self.get("audit/weekly-activity", &[]).await
    }

    pub async fn frequent_actions(&self) -> Result<Vec<ActionCount>, ApiError> {
        self.get("audit/frequent-actions", &[]).await
    }

    pub async fn geo_logins(&self) -> Result<Vec<CountryCount>, ApiError> {
        self.get("audit/geo-logins", &[]).await
    }

    pub async fn device_analytics(&self) -> Result<DeviceAnalytics, ApiError> {
        self.get("audit/device-analytics", &[]).await
    }

    pub async fn top_admins(&self) -> Result<Vec<AdminActivity>, ApiError> {
        self.get("audit/top-admins", &[]).await
    }

    pub async fn recent_audit_logs(&self) -> Result<Vec<AuditLogEntry>, ApiError> {
        self.get("audit/recent-audit-logs", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_response;

    #[test]
    fn inactive_users_page_decodes() {
        let body = r#"{"page": 2, "per_page": 20, "total": 41, "pages": 3,
            "users": [{"user_id": 9, "username": "dora", "role": "editor, viewer",
                       "last_seen": "Never"}]}"#;
        let page: InactiveUsersPage = decode_response(200, body).unwrap();
        assert_eq!(page.total, 41);
        assert_eq!(page.users[0].last_seen.as_ref(), "Never");
    }

    #[test]
    fn summary_and_widgets_decode() {
        let summary: AuditSummary =
            decode_response(200, r#"{"create_user": 4, "login": 120, "delete_user": 1}"#)
                .unwrap();
        assert_eq!(summary.get("login"), Some(&120));

        let trend: LoginTrend = decode_response(
            200,
            r#"{"labels": ["2025-07-01", "2025-07-02"], "data": [3, 5]}"#,
        )
        .unwrap();
        let points: Vec<_> = trend.points().map(|(d, c)| (d.to_string(), c)).collect();
        assert_eq!(
            points,
            vec![("2025-07-01".to_owned(), 3), ("2025-07-02".to_owned(), 5)]
        );

        let devices: DeviceAnalytics = decode_response(
            200,
            r#"{"devices": [{"label": "desktop", "count": 7}], "browsers": []}"#,
        )
        .unwrap();
        assert_eq!(devices.devices[0].count, 7);
        assert!(devices.os.is_empty());

        let logs: Vec<AuditLogEntry> = decode_response(
            200,
            r#"[{"timestamp": "2025-07-01 10:00", "actor": "root", "action_type": "delete_user",
                 "target": null, "description": "Deleted bob"}]"#,
        )
        .unwrap();
        assert_eq!(logs[0].target, None);
        assert_eq!(ActionKind::of(&logs[0].action_type), ActionKind::Delete);
    }

    #[test]
    fn action_kinds() {
        assert_eq!(ActionKind::of("CREATE_USER"), ActionKind::Create);
        assert_eq!(ActionKind::of("assign_role"), ActionKind::Update);
        assert_eq!(ActionKind::of("login"), ActionKind::Login);
        assert_eq!(ActionKind::of("export"), ActionKind::Other);
    }
}
