use crate::prelude::*;

use std::time::Duration;

use crate::{
    components::svg::{DrawSvg, IconSize, Magnify},
    pagination::TableCommand,
    utils::{timestamp_now, CCStr},
};

/// Text input bound to `value`, showing `value_error` once the user paused
/// typing or left the field.
#[component]
pub fn InputField<T: 'static + Clone + PartialEq + core::fmt::Display + core::str::FromStr>(
    title: Option<&'static str>,
    value: Signal<T>,
    r#type: Option<&'static str>,
    placeholder: Option<&'static str>,
    value_error: ReadOnlySignal<Option<CCStr>>,
) -> Element {
    let (error_display, mut signal_activity, onfocusout) = use_future_error_feedback(value_error);

    rsx! {
        fieldset { class: "fieldset",
            if let Some(title) = title {
                legend { class: "fieldset-legend", {title} }
            }
            input {
                r#type: r#type.unwrap_or("text"),
                class: "input",
                class: if error_display().is_some() { "input-error" },
                placeholder,
                value: "{value.read()}",
                oninput: move |evt| {
                    signal_activity();
                    if let Ok(v) = evt.parsed() {
                        value.set(v)
                    }
                },
                onfocusout,
            }
            div {
                class: "fieldset-label text-error",
                class: if error_display().is_none() { "invisible" },
                if let Some(e) = error_display() {
                    {e}
                } else {
                    "ph"
                }
            }
        }
    }
}

/// Drop-down bound to `value`. `options` are `(value, label)` pairs.
#[component]
pub fn SelectField(
    title: Option<&'static str>,
    value: Signal<String>,
    options: Vec<(CCStr, CCStr)>,
) -> Element {
    rsx! {
        fieldset { class: "fieldset",
            if let Some(title) = title {
                legend { class: "fieldset-legend", {title} }
            }
            select {
                class: "select",
                value: "{value.read()}",
                onchange: move |evt| value.set(evt.value()),
                for (v , label) in options {
                    option {
                        key: "{v}",
                        value: "{v}",
                        selected: *value.read() == *v,
                        {label}
                    }
                }
            }
        }
    }
}

/// Search box feeding the `filter_key` filter of a table.
///
/// Every keystroke is forwarded; the table debounces them.
#[component]
pub fn TableSearch(
    commands: Coroutine<TableCommand>,
    filter_key: &'static str,
    placeholder: &'static str,
) -> Element {
    rsx! {
        label { class: "input table-search",
            DrawSvg::<Magnify> { size: IconSize::Small }
            input {
                r#type: "search",
                placeholder,
                oninput: move |evt| commands.send(TableCommand::filter(filter_key, evt.value())),
            }
        }
    }
}

/// Drop-down feeding the `filter_key` filter of a table. An empty option
/// value clears the filter.
#[component]
pub fn TableSelectFilter(
    commands: Coroutine<TableCommand>,
    filter_key: &'static str,
    options: Vec<(CCStr, CCStr)>,
) -> Element {
    rsx! {
        select {
            class: "select",
            onchange: move |evt| commands.send(TableCommand::filter(filter_key, evt.value())),
            for (v , label) in options {
                option { key: "{v}", value: "{v}", {label} }
            }
        }
    }
}

pub fn use_future_error_feedback(
    value_error: ReadOnlySignal<Option<CCStr>>,
) -> (
    Memo<Option<CCStr>>,
    impl FnMut() + Copy,
    impl FnMut(Event<FocusData>) + Copy,
) {
    let (feed_back_active, signal_activity, onfocusout) = use_future_feedback_with_delay(2);
    let error_display = use_memo(move || feed_back_active().then(|| value_error()).flatten());
    (error_display, signal_activity, onfocusout)
}

/// Turns on after `delay_sec` seconds without activity, or right away when
/// the field loses focus. Any new activity turns it off again.
pub fn use_future_feedback_with_delay(
    delay_sec: u64,
) -> (
    Memo<bool>,
    impl FnMut() + Copy,
    impl FnMut(Event<FocusData>) + Copy,
) {
    let mut last_activity_ts = use_signal(|| None);
    let mut timed_feedback = use_signal(|| false);
    let mut immediate_feedback = use_signal(|| false);
    use_future(move || async move {
        loop {
            if last_activity_ts().is_some_and(|ts| ts + delay_sec < timestamp_now())
                && !timed_feedback()
            {
                *timed_feedback.write() = true;
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    });

    let feed_back_active = use_memo(move || timed_feedback() || immediate_feedback());
    let signal_activity = move || {
        *last_activity_ts.write() = Some(timestamp_now());
        if immediate_feedback() {
            *immediate_feedback.write() = false;
        }
        if timed_feedback() {
            *timed_feedback.write() = false;
        }
    };
    let onfocusout = move |_| *immediate_feedback.write() = true;
    (feed_back_active, signal_activity, onfocusout)
}
