use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    pagination::{FetchResult, PageQuery},
    utils::CCStr,
};

use super::{Ack, ApiClient, ApiError};

/// Roles known by the backend, from the least to the most privileged.
pub const ROLES: &[&str] = &["viewer", "editor", "admin", "root"];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

fn is_privileged_role(role: &str) -> bool {
    role.eq_ignore_ascii_case("admin") || role.eq_ignore_ascii_case("root")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: CCStr,
    pub email: CCStr,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<CCStr>,
    #[serde(default)]
    pub roles: Vec<CCStr>,
    #[serde(default)]
    pub last_login: Option<CCStr>,
}

impl User {
    pub fn is_privileged(&self) -> bool {
        self.roles.iter().any(|r| is_privileged_role(r))
    }

    pub fn roles_label(&self) -> CCStr {
        if self.roles.is_empty() {
            CCStr::from("none")
        } else {
            CCStr::from(
                self.roles
                    .iter()
                    .map(|r| r.as_ref())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        }
    }
}

/// Whether an operator holding `operator_role` may delete `target`.
///
/// Only admins and roots can delete, and never another admin or root.
pub fn can_delete(operator_role: &str, target: &User) -> bool {
    is_privileged_role(operator_role) && !target.is_privileged()
}

#[derive(Debug, Deserialize)]
struct UserPage {
    total: u64,
    users: Vec<User>,
}

/// Payload of the user creation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl NewUser {
    /// Checks the form before it is sent, returning the first problem found.
    pub fn validate(&self) -> Result<(), CCStr> {
        check_username(&self.username)?;
        check_email(&self.email)?;
        check_password(&self.password)?;
        if !self.role.is_empty() && !ROLES.contains(&self.role.as_str()) {
            return Err(format!("Unknown role '{}'", self.role).into());
        }
        Ok(())
    }
}

pub fn check_username(username: &str) -> Result<(), CCStr> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Username is required".into());
    }
    if !(3..=80).contains(&username.chars().count()) {
        return Err("Username must be between 3 and 80 characters".into());
    }
    Ok(())
}

pub fn check_email(email: &str) -> Result<(), CCStr> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err("Please enter a valid email address".into())
    }
}

pub fn check_password(password: &str) -> Result<(), CCStr> {
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters".into());
    }
    Ok(())
}

/// Payload of the user update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub is_active: bool,
    /// Only sent by privileged operators, others cannot change roles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), CCStr> {
        check_username(&self.username)?;
        check_email(&self.email)?;
        if let Some(role) = self
            .roles
            .iter()
            .flatten()
            .find(|r| !ROLES.contains(&r.as_str()))
        {
            return Err(format!("Unknown role '{role}'").into());
        }
        Ok(())
    }
}

impl From<&User> for UserUpdate {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.to_string(),
            email: user.email.to_string(),
            is_active: user.is_active,
            roles: None,
        }
    }
}

/// Whether an operator holding `operator_role` may change roles.
pub fn can_assign_roles(operator_role: &str) -> bool {
    is_privileged_role(operator_role)
}

/// One session opened by a user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginRecord {
    pub login_time: CCStr,
    pub ip: CCStr,
    pub country: CCStr,
    pub device: CCStr,
    pub os: CCStr,
    pub browser: CCStr,
}

#[derive(Debug, Deserialize)]
struct LoginHistoryPage {
    total: u64,
    data: Vec<LoginRecord>,
}

/// Parameters of the login history endpoint, which pages with `page`/`limit`.
fn login_history_params(query: &PageQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("page".to_owned(), query.page.to_string()),
        ("limit".to_owned(), query.per_page.to_string()),
    ];
    params.extend(
        query
            .filters
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    params
}

impl ApiClient {
    pub async fn list_users(&self, query: &PageQuery) -> Result<FetchResult<User>, ApiError> {
        let page: UserPage = self.get("auth/users", &query.offset_params()).await?;
        Ok(FetchResult::new(page.users, page.total))
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<Ack, ApiError> {
        self.post("auth/users/create", user).await
    }

    pub async fn update_user(&self, user_id: u64, update: &UserUpdate) -> Result<Ack, ApiError> {
        self.put(&format!("auth/users/{user_id}"), update).await
    }

    pub async fn delete_user(&self, user_id: u64) -> Result<Ack, ApiError> {
        self.delete(&format!("auth/users/{user_id}")).await
    }

    pub async fn logout(&self) -> Result<Ack, ApiError> {
        self.post("auth/logout", &serde_json::json!({})).await
    }

    pub async fn login_history(
        &self,
        user_id: u64,
        query: &PageQuery,
    ) -> Result<FetchResult<LoginRecord>, ApiError> {
        let page: LoginHistoryPage = self
            .get(
                &format!("audit/user-login-history/{user_id}"),
                &login_history_params(query),
            )
            .await?;
        Ok(FetchResult::new(page.data, page.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::decode_response, pagination::PageState};

    fn user(roles: &[&str]) -> User {
        User {
            id: 7,
            username: "bob".into(),
            email: "bob@example.org".into(),
            is_active: true,
            created_at: None,
            roles: roles.iter().map(|r| CCStr::from(*r)).collect(),
            last_login: None,
        }
    }

    #[test]
    fn user_page_decodes() {
        let body = r#"{
            "total": 42,
            "users": [
                {"id": 1, "username": "alice", "email": "alice@example.org",
                 "is_active": true, "created_at": "2025-07-01T10:00:00",
                 "roles": ["admin"]},
                {"id": 2, "username": "bob", "email": "bob@example.org",
                 "is_active": false, "created_at": null, "roles": []}
            ]
        }"#;
        let page: UserPage = decode_response(200, body).unwrap();
        assert_eq!(page.total, 42);
        assert_eq!(page.users.len(), 2);
        assert!(page.users[0].is_privileged());
        assert_eq!(page.users[1].roles_label().as_ref(), "none");
    }

    #[test]
    fn page_without_total_is_rejected() {
        let res: Result<UserPage, _> = decode_response(200, r#"{"users": []}"#);
        assert!(matches!(res, Err(ApiError::InvalidResponse(msg)) if msg.contains("total")));
    }

    #[test]
    fn delete_needs_privileged_operator_and_plain_target() {
        assert!(can_delete("admin", &user(&["viewer"])));
        assert!(can_delete("root", &user(&["editor"])));
        assert!(!can_delete("editor", &user(&["viewer"])));
        assert!(!can_delete("root", &user(&["admin"])));
        assert!(!can_delete("admin", &user(&["editor", "root"])));
    }

    #[test]
    fn new_user_validation() {
        let mut form = NewUser {
            username: "carol".into(),
            email: "carol@example.org".into(),
            password: "secret1".into(),
            role: "viewer".into(),
        };
        assert_eq!(form.validate(), Ok(()));

        form.email = "carol@example".into();
        assert!(form.validate().is_err());
        form.email = "carol@example.org".into();

        form.password = "12345".into();
        assert_eq!(
            form.validate(),
            Err(CCStr::from("Password must be at least 6 characters"))
        );
        form.password = "123456".into();

        form.username = "  ".into();
        assert_eq!(form.validate(), Err(CCStr::from("Username is required")));
        form.username = "carol".into();

        form.role = "superuser".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn update_sends_roles_only_when_set() {
        let mut update = UserUpdate::from(&user(&["viewer"]));
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("roles").is_none());

        update.roles = Some(vec!["editor".into()]);
        assert_eq!(update.validate(), Ok(()));
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["roles"], serde_json::json!(["editor"]));

        update.roles = Some(vec!["owner".into()]);
        assert!(update.validate().is_err());
        assert!(can_assign_roles("root"));
        assert!(!can_assign_roles("viewer"));
    }

    #[test]
    fn login_history_uses_page_and_limit() {
        let mut state = PageState::new(10);
        state.set_total(30);
        state.set_filter("device", "mobile").unwrap();
        state.set_page(2);
        assert_eq!(
            login_history_params(&state.query()),
            vec![
                ("page".to_owned(), "2".to_owned()),
                ("limit".to_owned(), "10".to_owned()),
                ("device".to_owned(), "mobile".to_owned()),
            ]
        );

        let body = r#"{"total": 1, "data": [{"login_time": "2 hours ago", "ip": "10.0.0.1",
            "country": "N/A", "device": "desktop", "os": "Linux", "browser": "Firefox"}]}"#;
        let page: LoginHistoryPage = decode_response(200, body).unwrap();
        assert_eq!(page.data[0].browser.as_ref(), "Firefox");
    }
}
