use crate::prelude::*;

use crate::{
    api::{can_assign_roles, check_email, check_password, check_username, NewUser, User, UserUpdate, ROLES},
    components::{
        inputs::{InputField, SelectField},
        modal::{CloseModalButton, FormModal},
        svg::{DrawSvg, Plus, Save},
    },
    pagination::TableCommand,
    utils::CCStr,
};

use super::primary_role;

fn role_options() -> Vec<(CCStr, CCStr)> {
    ROLES
        .iter()
        .map(|r| (CCStr::from(*r), CCStr::from(*r)))
        .collect()
}

/// Account creation dialog. The table reloads once the backend accepted it.
#[component]
pub(super) fn AddUserModal(is_open: Signal<bool>, commands: Coroutine<TableCommand>) -> Element {
    log::debug!("AddUserModal reload");

    let api_client_service = state_management::use_api_client_service();

    let username = use_signal(String::new);
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let role = use_signal(|| "viewer".to_owned());
    let mut creating = use_signal(|| false);

    let username_error = use_memo(move || check_username(&username.read()).err());
    let email_error = use_memo(move || check_email(&email.read()).err());
    let password_error = use_memo(move || check_password(&password.read()).err());
    let form_valid = use_memo(move || {
        username_error.read().is_none()
            && email_error.read().is_none()
            && password_error.read().is_none()
    });

    let submit = move |_| async move {
        let new_user = NewUser {
            username: username.read().trim().to_owned(),
            email: email.read().trim().to_owned(),
            password: password(),
            role: role(),
        };
        if let Err(e) = new_user.validate() {
            alert_warn(e);
            return;
        }
        *creating.write() = true;
        let created = new_user.username.clone();
        match state_management::api_call(api_client_service, |client| async move {
            client.create_user(&new_user).await
        })
        .await
        {
            Ok(ack) => {
                log::info!("User '{created}' created");
                alert_success(
                    ack.msg
                        .unwrap_or_else(|| CCStr::from(format!("User '{created}' created"))),
                );
                *is_open.write() = false;
                commands.send(TableCommand::Reload);
            }
            Err(e) => alert_error(e),
        }
        *creating.write() = false;
    };

    rsx! {
        FormModal { is_open, title: CCStr::from("Add user"),
            div { class: "form-grid",
                InputField {
                    title: "Username",
                    value: username,
                    placeholder: "3 to 80 characters",
                    value_error: username_error,
                }
                InputField {
                    title: "Email",
                    value: email,
                    r#type: "email",
                    placeholder: "name@example.org",
                    value_error: email_error,
                }
                InputField {
                    title: "Password",
                    value: password,
                    r#type: "password",
                    placeholder: "At least 6 characters",
                    value_error: password_error,
                }
                SelectField { title: "Role", value: role, options: role_options() }
            }
            div { class: "modal-actions",
                CloseModalButton { signal: is_open }
                button {
                    class: "btn btn-primary",
                    disabled: !form_valid() || creating(),
                    onclick: submit,
                    if creating() {
                        span { class: "loading loading-spinner" }
                    } else {
                        DrawSvg::<Plus> {}
                    }
                    "Create"
                }
            }
        }
    }
}

/// Account edition dialog. Roles can only be changed by privileged operators.
#[component]
pub(super) fn EditUserModal(
    is_open: Signal<bool>,
    user: User,
    commands: Coroutine<TableCommand>,
) -> Element {
    log::debug!("EditUserModal reload");

    let api_client_service = state_management::use_api_client_service();
    let user_id = user.id;
    let initial = use_hook(|| UserUpdate::from(&user));
    let initial_role = use_hook(|| primary_role(&user).to_string());

    let username = use_signal(|| initial.username.clone());
    let email = use_signal(|| initial.email.clone());
    let mut is_active = use_signal(|| initial.is_active);
    let role = use_signal(|| initial_role.clone());
    let mut saving = use_signal(|| false);

    let roles_editable = use_memo(move || {
        can_assign_roles(&state_management::APPLICATION_CONFIG.read().operator_role)
    });

    let username_error = use_memo(move || check_username(&username.read()).err());
    let email_error = use_memo(move || check_email(&email.read()).err());
    let form_valid = use_memo(move || username_error.read().is_none() && email_error.read().is_none());

    let submit = move |_| {
        let initial_role = initial_role.clone();
        async move {
            let update = UserUpdate {
                username: username.read().trim().to_owned(),
                email: email.read().trim().to_owned(),
                is_active: is_active(),
                roles: (roles_editable() && *role.read() != initial_role).then(|| vec![role()]),
            };
            if let Err(e) = update.validate() {
                alert_warn(e);
                return;
            }
            *saving.write() = true;
            match state_management::api_call(api_client_service, |client| async move {
                client.update_user(user_id, &update).await
            })
            .await
            {
                Ok(ack) => {
                    log::info!("User {user_id} updated");
                    alert_success(ack.msg.unwrap_or_else(|| CCStr::from("User updated")));
                    *is_open.write() = false;
                    commands.send(TableCommand::Reload);
                }
                Err(e) => alert_error(e),
            }
            *saving.write() = false;
        }
    };

    rsx! {
        FormModal {
            is_open,
            title: CCStr::from(format!("Edit {}", user.username)),
            div { class: "form-grid",
                InputField {
                    title: "Username",
                    value: username,
                    value_error: username_error,
                }
                InputField {
                    title: "Email",
                    value: email,
                    r#type: "email",
                    value_error: email_error,
                }
                if roles_editable() {
                    SelectField { title: "Role", value: role, options: role_options() }
                }
                label { class: "label toggle-label",
                    input {
                        r#type: "checkbox",
                        class: "toggle",
                        checked: is_active(),
                        onchange: move |evt| *is_active.write() = evt.checked(),
                    }
                    "Active"
                }
            }
            div { class: "modal-actions",
                CloseModalButton { signal: is_open }
                button {
                    class: "btn btn-primary",
                    disabled: !form_valid() || saving(),
                    onclick: submit,
                    if saving() {
                        span { class: "loading loading-spinner" }
                    } else {
                        DrawSvg::<Save> {}
                    }
                    "Save"
                }
            }
        }
    }
}
