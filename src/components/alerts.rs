use crate::prelude::*;

use uuid::Uuid;

use std::collections::VecDeque;
use std::time::Duration;

use crate::components::svg::{AlertCircle, Close, DrawSvg, IconSize};
use crate::utils::CCStr;

static ALERTS: GlobalSignal<VecDeque<Alert>> = Signal::global(VecDeque::new);

/// Maximum number of alerts to display at once
const MAX_ALERTS: usize = 10;

const DEFAULT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertClass {
    Success,
    Warn,
    Error,
    Info,
}
impl core::fmt::Display for AlertClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Success => "alert-success",
            Self::Warn => "alert-warning",
            Self::Error => "alert-error",
            Self::Info => "alert-info",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    uuid: Uuid,
    alert_class: AlertClass,
    title: CCStr,
    message: CCStr,
    timeout_ms: u64,
}
impl Alert {
    fn new(alert_class: AlertClass, title: &'static str, message: impl Into<CCStr>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            alert_class,
            title: title.into(),
            message: message.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
    pub fn success(message: impl Into<CCStr>) -> Self {
        Self::new(AlertClass::Success, "Success", message)
    }
    pub fn warn(message: impl Into<CCStr>) -> Self {
        Self::new(AlertClass::Warn, "Warning", message)
    }
    pub fn error(message: impl Into<CCStr>) -> Self {
        Self::new(AlertClass::Error, "Error", message)
    }
    pub fn info(message: impl Into<CCStr>) -> Self {
        Self::new(AlertClass::Info, "Info", message)
    }
}

/// Queues `alert`, dropping the oldest ones past [MAX_ALERTS].
fn push_alert(alerts: &mut VecDeque<Alert>, alert: Alert) {
    while alerts.len() >= MAX_ALERTS {
        alerts.pop_front();
    }
    alerts.push_back(alert);
}

pub fn add_alert(alert: Alert) {
    push_alert(&mut ALERTS.write(), alert);
}

pub fn alert_success(message: impl Into<CCStr>) {
    add_alert(Alert::success(message));
}

pub fn alert_error(message: impl Into<CCStr>) {
    add_alert(Alert::error(message));
}

pub fn alert_warn(message: impl Into<CCStr>) {
    add_alert(Alert::warn(message));
}

pub fn alert_info(message: impl Into<CCStr>) {
    add_alert(Alert::info(message));
}

#[component]
pub fn AlertsContainer() -> Element {
    rsx! {
        div { class: "alerts-container",
            for alert in ALERTS().iter() {
                AlertDisplay { key: "{alert.uuid}", alert: alert.clone() }
            }
        }
    }
}

#[component]
fn AlertDisplay(alert: Alert) -> Element {
    log::debug!("AlertDisplay Rendered: {alert:?}");
    fn close_alert(uuid: Uuid) {
        ALERTS.write().retain(|a| a.uuid != uuid);
    }

    // Auto-dismiss, cancelled with the component
    use_future(move || async move {
        tokio::time::sleep(Duration::from_millis(alert.timeout_ms)).await;
        log::debug!("Closing alert: {}", alert.uuid);
        close_alert(alert.uuid);
    });

    use_drop(move || log::debug!("AlertDisplay Dropped: {}", alert.uuid));

    rsx! {
        div { role: "alert", class: "alert {alert.alert_class}",
            div { class: "alert-title",
                DrawSvg::<AlertCircle> { size: IconSize::Small }
                b { "{alert.title}" }
            }
            span { class: "alert-message", "{alert.message}" }
            button {
                class: "btn btn-circle btn-ghost btn-xs",
                onclick: move |_| close_alert(alert.uuid),
                DrawSvg::<Close> { size: IconSize::Small }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_alerts_are_dropped_past_the_limit() {
        let mut alerts = VecDeque::new();
        for i in 0..MAX_ALERTS + 3 {
            push_alert(&mut alerts, Alert::info(format!("alert {i}")));
        }
        assert_eq!(alerts.len(), MAX_ALERTS);
        assert_eq!(alerts.front().map(|a| a.message.as_ref()), Some("alert 3"));
        assert_eq!(
            alerts.back().map(|a| a.message.to_string()),
            Some(format!("alert {}", MAX_ALERTS + 2))
        );
    }

    #[test]
    fn alert_classes_map_to_css() {
        assert_eq!(Alert::error("x").alert_class.to_string(), "alert-error");
        assert_eq!(Alert::warn("x").alert_class.to_string(), "alert-warning");
        assert_eq!(Alert::success("x").title.as_ref(), "Success");
    }
}
