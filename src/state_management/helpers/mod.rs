mod api;
mod config;
mod session;

use dioxus::prelude::*;

use tokio::sync::oneshot;

use crate::{
    api::{ApiClient, ApiError},
    utils::{log_error_ccstr, CCStr},
};

use super::{
    api_client::ApiClientCommand,
    config::{ApplicationConfig, ConfigCommand, ConfigStore},
    progress::{ProgressCommand, TutorialProgress},
    session::SessionCommand,
};

pub use api::*;
pub use config::*;
pub use session::*;

pub fn use_config_service() -> Coroutine<ConfigCommand> {
    use_coroutine_handle()
}

pub fn use_api_client_service() -> Coroutine<ApiClientCommand> {
    use_coroutine_handle()
}

pub fn use_session_service() -> Coroutine<SessionCommand> {
    use_coroutine_handle()
}

pub fn use_progress_service() -> Coroutine<ProgressCommand> {
    use_coroutine_handle()
}
