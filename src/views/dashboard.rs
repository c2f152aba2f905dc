use crate::prelude::*;

use crate::{
    api::{EngagementRate, EngagementSummary, ViewsRange},
    components::{
        inputs::SelectField,
        misc::{BarList, StatCard},
    },
    utils::{percent, CCStr},
};

use super::{Panel, TitledView};

/// Engagement dashboard: headline metrics, visitor engagement and page views.
#[component]
pub fn DashboardView() -> Element {
    log::debug!("DashboardView reload");

    let metrics = helper_hooks::use_api_resource(|client| async move { client.metrics().await });

    use_drop(|| log::debug!("DashboardView Dropped"));

    rsx! {
        TitledView {
            title: CCStr::from("Dashboard"),
            subtitle: CCStr::from("Platform activity at a glance."),
            div { class: "card-grid",
                StatCard {
                    title: "Users",
                    value: LoadedComponentInput::from_resource(&metrics, |m| m.users),
                }
                StatCard {
                    title: "Views today",
                    value: LoadedComponentInput::from_resource(&metrics, |m| m.views_today),
                }
                StatCard {
                    title: "Topic contents",
                    value: LoadedComponentInput::from_resource(&metrics, |m| m.topic_contents),
                }
                StatCard {
                    title: "Blog posts",
                    value: LoadedComponentInput::from_resource(&metrics, |m| m.blog_posts),
                }
            }
            div { class: "panel-grid",
                EngagementSummaryPanel {}
                EngagementRatePanel {}
                PageViewsPanel {}
            }
        }
    }
}

/// Engagement summary as one element: every value follows the same loading state.
#[derive(Debug, Clone, PartialEq)]
struct EngagementFacts {
    unique_visitors: u64,
    peak_hour: CCStr,
    peak_day: CCStr,
}

impl From<&EngagementSummary> for EngagementFacts {
    fn from(summary: &EngagementSummary) -> Self {
        let or_na = |v: &Option<CCStr>| v.clone().unwrap_or_else(|| CCStr::from("N/A"));
        Self {
            unique_visitors: summary.unique_visitors,
            peak_hour: or_na(&summary.peak_hour_range),
            peak_day: or_na(&summary.peak_day),
        }
    }
}

impl LoadedElement for EngagementFacts {
    type Loader = TransparentLoader;

    fn element<M: LoadedComponentInputMapper>(self, m: M) -> Element {
        rsx! {
            dl { class: "kv-list",
                dt { "Unique visitors" }
                dd {
                    LoadedComponent { input: m.map(self.unique_visitors) }
                }
                dt { "Peak hour" }
                dd {
                    LoadedComponent { input: m.map(self.peak_hour) }
                }
                dt { "Peak day" }
                dd {
                    LoadedComponent { input: m.map(self.peak_day) }
                }
            }
        }
    }

    fn place_holder() -> Self {
        Self {
            unique_visitors: 1234,
            peak_hour: "00:00 - 01:00".into(),
            peak_day: "Wednesday".into(),
        }
    }
}

#[component]
fn EngagementSummaryPanel() -> Element {
    let summary =
        helper_hooks::use_api_resource(|client| async move { client.engagement_summary().await });

    rsx! {
        Panel { title: "Engagement summary",
            LoadedComponent::<EngagementFacts> { input: LoadedComponentInput::from_resource(&summary, |s| EngagementFacts::from(s)) }
        }
    }
}

/// Share of visitors that engaged, clamped to `0..=100`.
fn rate_percent(rate: &EngagementRate) -> u8 {
    if rate.total_visitors > 0 {
        percent(rate.engaged_visitors, rate.total_visitors)
    } else {
        rate.engagement_rate_percent.clamp(0.0, 100.0).round() as u8
    }
}

#[component]
fn EngagementRatePanel() -> Element {
    let rate = helper_hooks::use_api_resource(|client| async move { client.engagement_rate().await });

    rsx! {
        Panel { title: "Engagement rate",
            match &*rate.read() {
                Some(Ok(rate)) => rsx! {
                    RateBar { rate: rate.clone() }
                },
                Some(Err(e)) => rsx! {
                    div { class: "text-error", {e.clone()} }
                },
                None => rsx! {
                    LoadedComponent::<u8> { input: LoadedComponentInput::Loading }
                },
            }
        }
    }
}

#[component]
fn RateBar(rate: EngagementRate) -> Element {
    let pct = rate_percent(&rate);
    rsx! {
        div { class: "rate-value", "{pct}%" }
        div { class: "bar-track",
            span { class: "bar-fill", style: "width: {pct}%" }
        }
        div { class: "text-muted",
            "{rate.engaged_visitors} engaged out of {rate.total_visitors} visitors"
        }
    }
}

#[component]
fn PageViewsPanel() -> Element {
    let range_value = use_signal(|| ViewsRange::default().as_str().to_owned());
    let range = use_memo(move || ViewsRange::from_value(&range_value.read()).unwrap_or_default());
    let api_client_service = state_management::use_api_client_service();

    let views = use_resource(move || async move {
        let range = range();
        state_management::api_call(api_client_service, |client| async move {
            client.page_views(range).await
        })
        .await
    });

    let options = ViewsRange::ALL
        .iter()
        .map(|r| (CCStr::from(r.as_str()), CCStr::from(r.label())))
        .collect::<Vec<_>>();

    rsx! {
        Panel { title: "Page views", class: "panel-wide",
            SelectField { value: range_value, options }
            match &*views.read() {
                Some(Ok(views)) => rsx! {
                    BarList {
                        entries: views.iter().map(|v| (v.title.clone(), v.views)).collect::<Vec<_>>(),
                    }
                },
                Some(Err(e)) => rsx! {
                    div { class: "text-error", {e.clone()} }
                },
                None => rsx! {
                    LoadedComponent::<Vec<CCStr>> { input: LoadedComponentInput::Loading }
                },
            }
        }
    }
}
