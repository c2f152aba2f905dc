use crate::prelude::*;

use crate::{
    api::{ActionKind, AuditLogEntry, AuditSummary, DeviceAnalytics, InactiveUser, LabelCount},
    components::{
        badge::{ActionBadge, RoleBadge},
        data_table::{DataTable, TableRecord},
        misc::BarList,
        timestamp::UITimestamp,
    },
    pagination::PagerPolicy,
    utils::CCStr,
};

use super::{Panel, TitledView};

const INACTIVE_PER_PAGE: u64 = 20;
const INACTIVE_PAGER: PagerPolicy = PagerPolicy::hide_at_or_below(5);

/// Action types always shown on the summary cards, even without entries.
const SUMMARY_ACTIONS: &[&str] = &["create", "update", "delete", "login"];

impl TableRecord for InactiveUser {
    const HEADERS: &'static [&'static str] = &["#", "Username", "Role", "Last seen"];

    fn key(&self) -> CCStr {
        CCStr::from(self.user_id.to_string())
    }
}

/// Cards of the summary, one per action family, in a stable order.
fn summary_cards(summary: &AuditSummary) -> Vec<(CCStr, u64, ActionKind)> {
    let mut cards: Vec<(CCStr, u64, ActionKind)> = SUMMARY_ACTIONS
        .iter()
        .map(|a| {
            let count = summary
                .iter()
                .filter(|(k, _)| k.eq_ignore_ascii_case(a))
                .map(|(_, v)| *v)
                .sum();
            (CCStr::from(*a), count, ActionKind::of(a))
        })
        .collect();
    cards.extend(
        summary
            .iter()
            .filter(|(k, _)| !SUMMARY_ACTIONS.iter().any(|a| k.eq_ignore_ascii_case(a)))
            .map(|(k, v)| (k.clone(), *v, ActionKind::of(k))),
    );
    cards
}

fn label_entries(counts: &[LabelCount]) -> Vec<(CCStr, u64)> {
    counts.iter().map(|c| (c.label.clone(), c.count)).collect()
}

/// Audit dashboard: action summary, inactive users and activity breakdowns.
#[component]
pub fn AuditView() -> Element {
    log::debug!("AuditView reload");

    use_drop(|| log::debug!("AuditView Dropped"));

    rsx! {
        TitledView {
            title: CCStr::from("Audit"),
            subtitle: CCStr::from("Who did what, and who has gone quiet."),
            SummaryCards {}
            div { class: "panel-grid",
                InactiveUsersPanel {}
                RecentLogsPanel {}
                BreakdownPanels {}
                DevicePanels {}
            }
        }
    }
}

#[component]
fn SummaryCards() -> Element {
    let summary = helper_hooks::use_api_resource(|client| async move { client.audit_summary().await });

    rsx! {
        div { class: "card-grid",
            match &*summary.read() {
                Some(Ok(summary)) => rsx! {
                    for (action , count , kind) in summary_cards(summary) {
                        div { key: "{action}", class: "card stat-card {kind.css_class()}",
                            div { class: "stat-title", {action.clone()} }
                            div { class: "stat-value", "{count}" }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    div { class: "text-error", {e.clone()} }
                },
                None => rsx! {
                    for action in SUMMARY_ACTIONS.iter() {
                        div { key: "{action}", class: "card stat-card",
                            div { class: "stat-title", {*action} }
                            div { class: "stat-value",
                                LoadedComponent::<u64> { input: LoadedComponentInput::Loading }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn InactiveUsersPanel() -> Element {
    let api_client_service = state_management::use_api_client_service();
    let table = helper_hooks::use_paginated_table(
        InactiveUsersFetcher { api_client_service },
        INACTIVE_PER_PAGE,
        INACTIVE_PAGER,
    );

    rsx! {
        Panel { title: "Inactive users", class: "panel-wide",
            DataTable::<InactiveUser> {
                table,
                row: move |(number, user): (u64, InactiveUser)| rsx! {
                    td { "{number}" }
                    td { {user.username.clone()} }
                    td {
                        LoadedComponent::<RoleBadge> { input: RoleBadge(user.role.clone()).into() }
                    }
                    td {
                        LoadedComponent::<UITimestamp> { input: UITimestamp::new(Some(&user.last_seen)).into() }
                    }
                },
            }
        }
    }
}

#[component]
fn RecentLogsPanel() -> Element {
    let logs = helper_hooks::use_api_resource(|client| async move { client.recent_audit_logs().await });

    rsx! {
        Panel { title: "Recent activity", class: "panel-wide",
            table { class: "table",
                thead {
                    tr {
                        th { "When" }
                        th { "Actor" }
                        th { "Action" }
                        th { "Target" }
                        th { "Details" }
                    }
                }
                tbody {
                    match &*logs.read() {
                        Some(Ok(logs)) if logs.is_empty() => rsx! {
                            tr {
                                td { colspan: "5", class: "table-message", {crate::pagination::NO_RECORDS} }
                            }
                        },
                        Some(Ok(logs)) => rsx! {
                            for (i , entry) in logs.iter().enumerate() {
                                AuditLogLine { key: "{i}", entry: entry.clone() }
                            }
                        },
                        Some(Err(e)) => rsx! {
                            tr {
                                td { colspan: "5", class: "table-message text-error", {e.clone()} }
                            }
                        },
                        None => rsx! {
                            tr {
                                td { colspan: "5",
                                    StaticLoadedComponent { input: LoadedComponentInput::Loading, "Loading..." }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn AuditLogLine(entry: AuditLogEntry) -> Element {
    rsx! {
        tr {
            td {
                LoadedComponent::<UITimestamp> { input: UITimestamp::new(Some(&entry.timestamp)).into() }
            }
            td { {entry.actor.clone()} }
            td {
                LoadedComponent::<ActionBadge> { input: ActionBadge(entry.action_type.clone()).into() }
            }
            td { {entry.target.clone().unwrap_or_default()} }
            td { {entry.description.clone().unwrap_or_default()} }
        }
    }
}

type Bars = Option<Result<Vec<(CCStr, u64)>, CCStr>>;

/// Bar entries of a list resource, `None` while it loads.
fn bars<T: 'static>(resource: &FResource<Vec<T>>, f: impl Fn(&T) -> (CCStr, u64)) -> Bars {
    resource.read().as_ref().map(|r| {
        r.as_ref()
            .map(|v| v.iter().map(&f).collect())
            .map_err(Clone::clone)
    })
}

#[component]
fn BreakdownPanels() -> Element {
    let top_admins = helper_hooks::use_api_resource(|client| async move { client.top_admins().await });
    let geo = helper_hooks::use_api_resource(|client| async move { client.geo_logins().await });
    let actions =
        helper_hooks::use_api_resource(|client| async move { client.frequent_actions().await });
    let weekly = helper_hooks::use_api_resource(|client| async move { client.weekly_activity().await });
    let trend = helper_hooks::use_api_resource(|client| async move { client.login_trend().await });

    let trend_bars: Bars = trend.read().as_ref().map(|r| {
        r.as_ref()
            .map(|t| t.points().map(|(label, count)| (label.clone(), count)).collect())
            .map_err(Clone::clone)
    });

    rsx! {
        BarPanel {
            title: "Top admins",
            entries: bars(&top_admins, |a| (a.username.clone(), a.total)),
        }
        BarPanel {
            title: "Logins by country",
            entries: bars(&geo, |c| (c.country.clone(), c.count)),
        }
        BarPanel {
            title: "Frequent actions",
            entries: bars(&actions, |a| (a.action.clone(), a.count)),
        }
        BarPanel {
            title: "Weekly activity",
            entries: bars(&weekly, |w| (w.week.clone(), w.count)),
        }
        BarPanel { title: "Daily logins", entries: trend_bars }
    }
}

#[component]
fn DevicePanels() -> Element {
    let devices =
        helper_hooks::use_api_resource(|client| async move { client.device_analytics().await });
    let part = |f: fn(&DeviceAnalytics) -> &[LabelCount]| -> Bars {
        devices.read().as_ref().map(|r| {
            r.as_ref()
                .map(|d| label_entries(f(d)))
                .map_err(Clone::clone)
        })
    };

    rsx! {
        BarPanel { title: "Devices", entries: part(|d| &d.devices) }
        BarPanel { title: "Browsers", entries: part(|d| &d.browsers) }
        BarPanel { title: "Operating systems", entries: part(|d| &d.os) }
    }
}

/// Panel holding a [BarList] fed by a fallible, possibly pending, source.
#[component]
fn BarPanel(title: &'static str, entries: Bars) -> Element {
    rsx! {
        Panel { title,
            match entries {
                Some(Ok(entries)) => rsx! {
                    BarList { entries }
                },
                Some(Err(e)) => rsx! {
                    div { class: "text-error", {e} }
                },
                None => rsx! {
                    LoadedComponent::<Vec<CCStr>> { input: LoadedComponentInput::Loading }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_keeps_known_actions_first() {
        let summary: AuditSummary = [
            (CCStr::from("export"), 2),
            (CCStr::from("login"), 10),
            (CCStr::from("Delete"), 1),
        ]
        .into_iter()
        .collect();
        let cards = summary_cards(&summary);
        let flat: Vec<(&str, u64)> = cards.iter().map(|(a, c, _)| (a.as_ref(), *c)).collect();
        assert_eq!(
            flat,
            vec![("create", 0), ("update", 0), ("delete", 1), ("login", 10), ("export", 2)]
        );
        assert_eq!(cards[2].2, ActionKind::Delete);
        assert_eq!(cards[4].2, ActionKind::Other);
    }
}
