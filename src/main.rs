#![windows_subsystem = "windows"]
mod api;
mod components;
mod helper_hooks;
mod loaded;
mod pagination;
mod state_management;
mod utils;
mod views;

mod prelude {
    pub use super::components::alerts::{alert_error, alert_info, alert_success, alert_warn};
    pub use super::helper_hooks::prelude::*;
    pub use super::loaded::prelude::*;
    pub use super::state_management::prelude::*;
    pub use dioxus::prelude::*;
}

use components::alerts::AlertsContainer;
use prelude::*;

use utils::CCStr;
use views::{
    app_config::AppConfigView, audit::AuditView, dashboard::DashboardView, main_layout::MainLayout,
    tutorial::TutorialView, users::UsersView,
};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[redirect("/", || Route::DashboardView {})]
    #[layout(MainLayout)]
        #[route("/dashboard")]
        DashboardView {},
        #[route("/audit")]
        AuditView {},
        #[route("/users")]
        UsersView {},
        #[route("/tutorials/:topic/:subtopic")]
        TutorialView { topic: CCStr, subtopic: CCStr },
        #[route("/config")]
        AppConfigView {},
    #[end_layout]
    #[route("/:..route")]
    PageNotFound { route: Vec<String> },
}

static TITLE: &str = "Admin Dashboard";

#[allow(non_snake_case)]
fn App() -> Element {
    log::debug!("App reload");

    crate::state_management::use_init_services();

    use_drop(|| log::debug!("App Dropped"));

    rsx! {
        document::Title { "{TITLE}" }
        document::Stylesheet { href: asset!("/assets/dashboard.css") }

        div {
            id: "app",
            class: if matches!(prelude::state_management::THEME(), Theme::Dark) { "dark" },
            AlertsContainer {}
            Router::<Route> {}
        }
    }
}

#[component]
fn PageNotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        div { class: "not-found",
            h1 { "Page not found" }
            p { "The page you requested doesn't exist." }
            pre { class: "text-error", "attempted to navigate to: /{path}" }
            Link { class: "btn btn-primary", to: Route::DashboardView {}, "Back to the dashboard" }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    log::info!("starting app");

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, WindowBuilder};
        LaunchBuilder::desktop()
            .with_cfg(
                Config::new().with_menu(None).with_window(
                    WindowBuilder::new()
                        .with_title(TITLE)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1600, 1000))
                        .with_resizable(true),
                ),
            )
            .launch(App)
    }
    #[cfg(not(feature = "desktop"))]
    dioxus::launch(App)
}
