use crate::prelude::*;

use crate::{
    api::{LoginRecord, User},
    components::{
        data_table::{DataTable, TableRecord, TableSummary},
        inputs::{TableSearch, TableSelectFilter},
        modal::InfoModal,
    },
    pagination::PagerPolicy,
    utils::CCStr,
};

const HISTORY_PER_PAGE: u64 = 10;

const DEVICE_FILTERS: &[(&str, &str)] = &[
    ("", "All devices"),
    ("desktop", "Desktop"),
    ("mobile", "Mobile"),
    ("tablet", "Tablet"),
];

impl TableRecord for LoginRecord {
    const HEADERS: &'static [&'static str] =
        &["#", "When", "IP", "Country", "Device", "OS", "Browser"];

    fn key(&self) -> CCStr {
        CCStr::from(format!("{}|{}|{}", self.login_time, self.ip, self.browser))
    }
}

/// Sessions opened by `user`, newest first.
#[component]
pub fn LoginHistoryModal(is_open: Signal<bool>, user: User) -> Element {
    log::debug!("LoginHistoryModal reload");

    let api_client_service = state_management::use_api_client_service();
    let table = helper_hooks::use_paginated_table(
        LoginHistoryFetcher {
            api_client_service,
            user_id: user.id,
        },
        HISTORY_PER_PAGE,
        PagerPolicy::default(),
    );

    let device_options = DEVICE_FILTERS
        .iter()
        .map(|(v, l)| (CCStr::from(*v), CCStr::from(*l)))
        .collect::<Vec<_>>();

    use_drop(|| log::debug!("LoginHistoryModal Dropped"));

    rsx! {
        InfoModal {
            is_open,
            title: CCStr::from(format!("Login history of {}", user.username)),
            div { class: "table-toolbar",
                TableSearch {
                    commands: table.commands,
                    filter_key: "search",
                    placeholder: "Search IP, country or browser",
                }
                TableSelectFilter {
                    commands: table.commands,
                    filter_key: "device",
                    options: device_options,
                }
                div { class: "grow" }
                TableSummary::<LoginRecord> { table, noun: "logins" }
            }
            DataTable::<LoginRecord> {
                table,
                row: move |(number, login): (u64, LoginRecord)| rsx! {
                    td { "{number}" }
                    td { {login.login_time.clone()} }
                    td { class: "font-mono", {login.ip.clone()} }
                    td { {login.country.clone()} }
                    td { {login.device.clone()} }
                    td { {login.os.clone()} }
                    td { {login.browser.clone()} }
                },
            }
        }
    }
}
