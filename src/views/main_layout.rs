use crate::prelude::*;

use crate::{
    api::SidebarTopic,
    components::svg::{BookOpen, ChevronDown, DrawSvg, IconSize, Logout, Moon, Sun},
    utils::CCStr,
    Route,
};

#[component]
pub fn MainLayout() -> Element {
    log::debug!("MainLayout reload");

    use_drop(|| log::debug!("MainLayout Dropped"));

    rsx! {
        div { class: "layout",
            Sidebar {}
            div { class: "layout-main",
                header { class: "navbar", NavBar {} }
                main { class: "content", Outlet::<Route> {} }
            }
        }
    }
}

#[component]
fn NavBar() -> Element {
    rsx! {
        nav { class: "navbar-inner",
            div { class: "navbar-brand", "Admin Dashboard" }
            div { class: "grow" }
            DarkModeToggle {}
            LogoutButton {}
        }
    }
}

#[component]
fn Sidebar() -> Element {
    log::debug!("Sidebar reload");

    let topics = helper_hooks::use_api_resource(|client| async move { client.sidebar_topics().await });
    let current_route = use_route::<Route>();
    let active_subtopic = match &current_route {
        Route::TutorialView { subtopic, .. } => Some(subtopic.clone()),
        _ => None,
    };

    use_drop(|| log::debug!("Sidebar Dropped"));

    rsx! {
        aside { class: "sidebar",
            ul { class: "menu",
                NavLink { route: Route::DashboardView {}, "Dashboard" }
                NavLink { route: Route::AuditView {}, "Audit" }
                NavLink { route: Route::UsersView {}, "Users" }
                NavLink { route: Route::AppConfigView {}, "Configuration" }
            }
            div { class: "menu-title",
                DrawSvg::<BookOpen> { size: IconSize::Small }
                "Tutorials"
            }
            match &*topics.read() {
                None => rsx! {
                    StaticLoadedComponent { input: LoadedComponentInput::Loading, "Loading topics" }
                },
                Some(Err(e)) => rsx! {
                    div { class: "menu-error text-error", {e.clone()} }
                },
                Some(Ok(topics)) => rsx! {
                    ul { class: "menu",
                        for topic in topics.iter() {
                            SidebarTopicEntry {
                                key: "{topic.id}",
                                topic: topic.clone(),
                                active_subtopic: active_subtopic.clone(),
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn SidebarTopicEntry(topic: SidebarTopic, active_subtopic: Option<CCStr>) -> Element {
    let topic_slug = topic.route_slug();

    if let Some(only) = topic.direct_link() {
        return rsx! {
            NavLink {
                route: Route::TutorialView {
                    topic: topic_slug,
                    subtopic: only.slug.clone(),
                },
                {topic.title.clone()}
            }
        };
    }

    let expanded = active_subtopic
        .as_deref()
        .is_some_and(|slug| topic.contains(slug));

    rsx! {
        li {
            details { open: expanded,
                summary { class: "menu-topic",
                    {topic.title.clone()}
                    DrawSvg::<ChevronDown> { size: IconSize::Small }
                }
                ul {
                    for sub in topic.subtopics.iter() {
                        NavLink {
                            key: "{sub.slug}",
                            route: Route::TutorialView {
                                topic: topic_slug.clone(),
                                subtopic: sub.slug.clone(),
                            },
                            {sub.title.clone()}
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NavLink(route: Route, children: Element) -> Element {
    rsx! {
        li {
            Link { class: "menu-link", active_class: "active", to: route, {children} }
        }
    }
}

#[component]
fn DarkModeToggle() -> Element {
    rsx! {
        button {
            class: "btn btn-ghost btn-circle",
            title: "Toggle dark mode",
            onclick: move |_| {
                let toggled = state_management::THEME().toggled();
                *state_management::THEME.write() = toggled;
            },
            match state_management::THEME() {
                Theme::Dark => rsx! {
                    DrawSvg::<Sun> {}
                },
                Theme::Light => rsx! {
                    DrawSvg::<Moon> {}
                },
            }
        }
    }
}

#[component]
fn LogoutButton() -> Element {
    let api_client_service = state_management::use_api_client_service();
    let session_service = state_management::use_session_service();
    let mut logging_out = use_signal(|| false);

    let logout = move |_| async move {
        *logging_out.write() = true;
        state_management::end_session(session_service);
        match state_management::api_call(api_client_service, |client| async move {
            client.logout().await
        })
        .await
        {
            Ok(ack) => {
                alert_success(ack.msg.unwrap_or_else(|| CCStr::from("Logged out")));
                navigator().push(Route::DashboardView {});
            }
            Err(e) => alert_error(e),
        }
        *logging_out.write() = false;
    };

    rsx! {
        button {
            class: "btn btn-outline btn-sm",
            disabled: logging_out(),
            onclick: logout,
            DrawSvg::<Logout> { size: IconSize::Small }
            "Logout"
        }
    }
}
