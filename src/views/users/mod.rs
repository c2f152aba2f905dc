mod forms;
mod login_history;

use crate::prelude::*;

use crate::{
    api::{can_delete, User},
    components::{
        badge::{ActiveBadge, RoleBadge},
        data_table::{DataTable, TableRecord, TableSummary},
        delete::ConfirmDeleteModal,
        inputs::{TableSearch, TableSelectFilter},
        svg::{Delete, DrawSvg, History, IconSize, Pencil, Plus},
        timestamp::UITimestamp,
    },
    pagination::{PagerPolicy, TableCommand},
    utils::CCStr,
};

use super::TitledView;

use forms::{AddUserModal, EditUserModal};
use login_history::LoginHistoryModal;

const USERS_PER_PAGE: u64 = 10;

const ROLE_FILTERS: &[(&str, &str)] = &[
    ("", "All roles"),
    ("viewer", "Viewer"),
    ("editor", "Editor"),
    ("admin", "Admin"),
    ("root", "Root"),
];

const STATUS_FILTERS: &[(&str, &str)] = &[
    ("", "Any status"),
    ("active", "Active"),
    ("inactive", "Inactive"),
];

fn filter_options(options: &[(&str, &str)]) -> Vec<(CCStr, CCStr)> {
    options
        .iter()
        .map(|(v, l)| (CCStr::from(*v), CCStr::from(*l)))
        .collect()
}

impl TableRecord for User {
    const HEADERS: &'static [&'static str] = &[
        "#", "Username", "Email", "Role", "Status", "Created", "Actions",
    ];

    fn key(&self) -> CCStr {
        CCStr::from(self.id.to_string())
    }
}

/// Role shown on the badge: the first one, users without any are viewers.
fn primary_role(user: &User) -> CCStr {
    user.roles
        .first()
        .cloned()
        .unwrap_or_else(|| CCStr::from("viewer"))
}

/// Which dialog of the user list is open, and for whom.
#[derive(Debug, Clone, PartialEq)]
enum UserDialog {
    Edit(User),
    Delete(User),
    History(User),
}

/// User management: searchable table with create, edit, delete and login
/// history dialogs.
#[component]
pub fn UsersView() -> Element {
    log::debug!("UsersView reload");

    let api_client_service = state_management::use_api_client_service();
    let table = helper_hooks::use_paginated_table(
        UsersFetcher { api_client_service },
        USERS_PER_PAGE,
        PagerPolicy::default(),
    );

    let mut add_open = use_signal(|| false);
    let mut dialog_open = use_signal(|| false);
    let mut dialog = use_signal(|| None::<UserDialog>);
    let mut deleting = use_signal(|| false);

    let mut open_dialog = move |d: UserDialog| {
        *dialog.write() = Some(d);
        *dialog_open.write() = true;
    };

    let delete_user = move |user_id: u64| async move {
        *deleting.write() = true;
        match state_management::api_call(api_client_service, |client| async move {
            client.delete_user(user_id).await
        })
        .await
        {
            Ok(ack) => {
                log::info!("User {user_id} deleted");
                alert_success(ack.msg.unwrap_or_else(|| CCStr::from("User deleted")));
                *dialog_open.write() = false;
                table.commands.send(TableCommand::Reload);
            }
            Err(e) => alert_error(e),
        }
        *deleting.write() = false;
    };

    let operator_role = use_memo(move || {
        state_management::APPLICATION_CONFIG
            .read()
            .operator_role
            .clone()
    });

    use_drop(|| log::debug!("UsersView Dropped"));

    rsx! {
        TitledView {
            title: CCStr::from("Users"),
            subtitle: CCStr::from("Manage accounts, roles and access."),
            right: rsx! {
                button {
                    class: "btn btn-primary",
                    onclick: move |_| *add_open.write() = true,
                    DrawSvg::<Plus> {}
                    "Add user"
                }
            },
            div { class: "table-toolbar",
                TableSearch {
                    commands: table.commands,
                    filter_key: "search",
                    placeholder: "Search by username or email",
                }
                TableSelectFilter {
                    commands: table.commands,
                    filter_key: "role",
                    options: filter_options(ROLE_FILTERS),
                }
                TableSelectFilter {
                    commands: table.commands,
                    filter_key: "status",
                    options: filter_options(STATUS_FILTERS),
                }
                div { class: "grow" }
                TableSummary::<User> { table, noun: "users" }
            }
            DataTable::<User> {
                table,
                row: move |(number, user): (u64, User)| {
                    let deletable = can_delete(&operator_role.read(), &user);
                    rsx! {
                        td { "{number}" }
                        td { class: "font-bold", {user.username.clone()} }
                        td { {user.email.clone()} }
                        td { title: "{user.roles_label()}",
                            LoadedComponent::<RoleBadge> { input: RoleBadge(primary_role(&user)).into() }
                        }
                        td {
                            LoadedComponent::<ActiveBadge> { input: ActiveBadge(user.is_active).into() }
                        }
                        td {
                            LoadedComponent::<UITimestamp> { input: UITimestamp::new(user.created_at.as_ref()).into() }
                        }
                        td { class: "row-actions",
                            button {
                                class: "btn btn-ghost btn-sm",
                                title: "Login history",
                                onclick: {
                                    let user = user.clone();
                                    move |_| open_dialog(UserDialog::History(user.clone()))
                                },
                                DrawSvg::<History> { size: IconSize::Small }
                            }
                            button {
                                class: "btn btn-ghost btn-sm",
                                title: "Edit",
                                onclick: {
                                    let user = user.clone();
                                    move |_| open_dialog(UserDialog::Edit(user.clone()))
                                },
                                DrawSvg::<Pencil> { size: IconSize::Small }
                            }
                            if deletable {
                                button {
                                    class: "btn btn-ghost btn-sm text-error",
                                    title: "Delete",
                                    onclick: {
                                        let user = user.clone();
                                        move |_| open_dialog(UserDialog::Delete(user.clone()))
                                    },
                                    DrawSvg::<Delete> { size: IconSize::Small }
                                }
                            }
                        }
                    }
                },
            }
        }

        if add_open() {
            AddUserModal { is_open: add_open, commands: table.commands }
        }
        if dialog_open() {
            match dialog() {
                Some(UserDialog::Edit(user)) => rsx! {
                    EditUserModal {
                        key: "{user.id}",
                        is_open: dialog_open,
                        user,
                        commands: table.commands,
                    }
                },
                Some(UserDialog::Delete(user)) => rsx! {
                    ConfirmDeleteModal {
                        key: "{user.id}",
                        is_open: dialog_open,
                        subject: user.username.clone(),
                        deleting,
                        on_confirm: move |_| delete_user(user.id),
                    }
                },
                Some(UserDialog::History(user)) => rsx! {
                    LoginHistoryModal { key: "{user.id}", is_open: dialog_open, user }
                },
                None => rsx! {},
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> User {
        User {
            id: 3,
            username: "dave".into(),
            email: "dave@example.org".into(),
            is_active: true,
            created_at: None,
            roles: roles.iter().map(|r| CCStr::from(*r)).collect(),
            last_login: None,
        }
    }

    #[test]
    fn badge_role_defaults_to_viewer() {
        assert_eq!(primary_role(&user(&[])).as_ref(), "viewer");
        assert_eq!(primary_role(&user(&["editor", "admin"])).as_ref(), "editor");
    }

    #[test]
    fn filters_start_with_a_clearing_option() {
        for options in [ROLE_FILTERS, STATUS_FILTERS] {
            let options = filter_options(options);
            assert_eq!(options[0].0.as_ref(), "");
            assert!(options[1..].iter().all(|(v, _)| !v.is_empty()));
        }
        assert_eq!(User::HEADERS.len(), 7);
    }
}
