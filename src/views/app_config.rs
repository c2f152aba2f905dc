use crate::prelude::*;

use crate::{
    api::ROLES,
    components::{
        inputs::{InputField, SelectField},
        svg::{AlertCircle, DrawSvg, Refresh, Save},
    },
    utils::CCStr,
};

/// Application configuration view component
#[component]
pub fn AppConfigView() -> Element {
    log::debug!("AppConfigView reload");

    use_drop(|| log::debug!("AppConfigView Dropped"));

    rsx! {
        super::TitledView {
            title: CCStr::from("Application Configuration"),
            subtitle: CCStr::from("Backend connection and operator settings."),
            div { class: "config-sections",
                ConnectionConfigSection {}
                StorageConfigSection {}
            }
        }
    }
}

/// Backend connection section
#[component]
fn ConnectionConfigSection() -> Element {
    let config_service = state_management::use_config_service();
    let api_client_service = state_management::use_api_client_service();

    let mut api_base_url = use_signal(String::new);
    let mut api_token = use_signal(String::new);
    let mut request_timeout_secs = use_signal(|| 0u64);
    let mut operator_role = use_signal(String::new);
    let mut updating = use_signal(|| false);
    let mut testing = use_signal(|| false);

    let mut update_form_from_config = move |config: &ApplicationConfig| {
        *api_base_url.write() = config.api_base_url.clone();
        *api_token.write() = config.api_token.clone().unwrap_or_default();
        *request_timeout_secs.write() = config.request_timeout_secs;
        *operator_role.write() = config.operator_role.clone();
    };

    // Initialize the inputs with the current values
    use_effect(move || update_form_from_config(&state_management::APPLICATION_CONFIG.read()));

    let new_config = use_memo(move || {
        let token = api_token.read().trim().to_owned();
        ApplicationConfig {
            api_base_url: api_base_url.read().trim().to_owned(),
            api_token: (!token.is_empty()).then_some(token),
            request_timeout_secs: request_timeout_secs(),
            operator_role: operator_role(),
            ..state_management::APPLICATION_CONFIG.read().clone()
        }
    });

    let url_error = use_memo(move || state_management::check_api_url(&api_base_url.read()).err());
    let timeout_error = use_memo(move || state_management::check_timeout(request_timeout_secs()).err());

    let has_changes = use_memo(move || *new_config.read() != *state_management::APPLICATION_CONFIG.read());
    let is_valid = use_memo(move || new_config.read().validate().is_ok());

    let update_handler = move |_| async move {
        *updating.write() = true;
        match state_management::update_application_config(config_service, new_config()).await {
            Ok(()) => {
                log::info!("Application configuration updated");
                alert_success("Configuration saved");
            }
            Err(e) => {
                log::error!("Failed to update the configuration: {e}");
                alert_error(format!("Failed to update the configuration: {e}"));
            }
        }
        *updating.write() = false;
    };

    let test_handler = move |_| async move {
        *testing.write() = true;
        match state_management::api_call(api_client_service, |client| async move {
            client.metrics().await
        })
        .await
        {
            Ok(_) => alert_success("The backend answered"),
            Err(e) => alert_error(format!("Connection failed: {e}")),
        }
        *testing.write() = false;
    };

    let reset_default_handler = move |_| {
        update_form_from_config(&ApplicationConfig::default());
        alert_info("Default values loaded, save to apply them");
    };
    let reset_current_handler =
        move |_| update_form_from_config(&state_management::APPLICATION_CONFIG.read());

    let role_options = ROLES
        .iter()
        .map(|r| (CCStr::from(*r), CCStr::from(*r)))
        .collect::<Vec<_>>();

    rsx! {
        div { class: "card",
            div { class: "card-body",
                h2 { class: "card-title", "Backend Connection" }
                p { class: "text-muted",
                    "Where the dashboard sends its requests. Environment variables, when set, override these values at startup."
                }

                div { class: "form-grid",
                    InputField {
                        title: "API URL",
                        value: api_base_url,
                        placeholder: "http://127.0.0.1:5000/api/v1/",
                        value_error: url_error,
                    }
                    InputField {
                        title: "Request timeout (seconds)",
                        value: request_timeout_secs,
                        r#type: "number",
                        value_error: timeout_error,
                    }
                    fieldset { class: "fieldset",
                        legend { class: "fieldset-legend", "API token" }
                        input {
                            r#type: "password",
                            class: "input",
                            value: "{api_token}",
                            disabled: updating(),
                            placeholder: "Bearer token, leave empty for none",
                            oninput: move |event| *api_token.write() = event.value(),
                        }
                    }
                    SelectField {
                        title: "Operator role",
                        value: operator_role,
                        options: role_options,
                    }
                }

                if has_changes() {
                    div { class: "alert alert-warning",
                        DrawSvg::<AlertCircle> {}
                        "Saving rebuilds the API client. Open views reload their data."
                    }
                }

                div { class: "card-actions",
                    button {
                        class: "btn btn-outline",
                        disabled: testing(),
                        onclick: test_handler,
                        DrawSvg::<Refresh> {}
                        "Test Connection"
                    }
                    div { class: "grow" }
                    button {
                        class: "btn btn-outline",
                        disabled: updating(),
                        onclick: reset_default_handler,
                        "Reset to Defaults"
                    }
                    button {
                        class: "btn btn-outline",
                        disabled: updating() || !has_changes(),
                        onclick: reset_current_handler,
                        "Reset to Current"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: updating() || !has_changes() || !is_valid(),
                        onclick: update_handler,
                        if updating() {
                            span { class: "loading loading-spinner" }
                            "Updating..."
                        } else {
                            DrawSvg::<Save> {}
                            "Save Configuration"
                        }
                    }
                }
            }
        }
    }
}

/// Where the configuration and local state files live
#[component]
fn StorageConfigSection() -> Element {
    let config_service = state_management::use_config_service();
    let store_dir = use_resource(move || async move {
        let store = state_management::get_store(config_service).await;
        CCStr::from(store.dir().to_string_lossy().to_string())
    });

    rsx! {
        div { class: "card",
            div { class: "card-body",
                h2 { class: "card-title", "Local Storage" }
                p { class: "text-muted",
                    "The configuration, tutorial progress and session identifier are stored in this directory. Set DASHBOARD_CONFIG_DIR to move it."
                }
                div { class: "font-mono",
                    LoadedComponent::<CCStr> { input: store_dir.cloned().into() }
                }
            }
        }
    }
}
