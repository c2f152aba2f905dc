mod api_client;
mod config;
mod event_bus;
mod helpers;
mod progress;
mod session;
mod theme;

pub fn use_init_services() {
    log::debug!("init_services - start");
    let event_bus_service = event_bus::use_event_bus_service();
    let config_service = config::use_config_service(event_bus_service);
    let api_client_service = api_client::use_api_client_service(event_bus_service, config_service);
    let _ = theme::use_theme_service(event_bus_service, config_service);
    let _ = progress::use_progress_service(config_service);
    let _ = session::use_session_service(config_service, api_client_service);
    log::debug!("init_services - finished");
}

pub mod prelude {
    pub use super::config::ApplicationConfig;
    pub use super::progress::TutorialProgress;
    pub use super::theme::Theme;

    pub mod state_management {
        pub use super::super::api_client::ApiClientCommand;
        pub use super::super::config::{check_api_url, check_timeout, APPLICATION_CONFIG};
        pub use super::super::helpers::*;
        pub use super::super::theme::THEME;
    }
}
