use dioxus::prelude::*;

use futures_util::stream::StreamExt;
use serde::{Deserialize, Serialize};

use crate::prelude::alert_error;

use super::{
    config::{ConfigCommand, ConfigReloadEvent},
    event_bus::{subscribe_event, EventBus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub static THEME: GlobalSignal<Theme> = Signal::global(|| Theme::Dark);

#[derive(Debug)]
pub(super) enum ThemeCommand {
    /// Internal trigger a save into the config
    Persist { theme: Theme },
    /// Internal trigger a refresh from the config
    Refresh,
}

/// Theme service coroutine
pub(super) fn use_theme_service(
    event_bus: EventBus,
    config_service: Coroutine<ConfigCommand>,
) -> Coroutine<ThemeCommand> {
    let service_handle = use_coroutine(move |mut rx: UnboundedReceiver<ThemeCommand>| async move {
        log::info!("theme_service (coroutine) - start");

        let mut cached_value = super::helpers::get_config(config_service).await.theme;
        *THEME.write() = cached_value;

        // The effect below runs once before the stored theme is known
        let mut discard_next_persist = true;

        while let Some(cmd) = rx.next().await {
            log::debug!("theme_service (coroutine) - Processing command {cmd:?}...");

            match cmd {
                ThemeCommand::Persist { theme } => {
                    if discard_next_persist {
                        log::debug!("theme_service (coroutine) - Ignoring first Persist cmd.");
                        discard_next_persist = false;
                        continue;
                    }
                    if theme == cached_value {
                        log::debug!("theme_service (coroutine) - Ignoring Persist cmd: already saved.");
                        continue;
                    }
                    log::debug!("theme_service (coroutine) - Theme changed, persisting...");
                    cached_value = theme;
                    let mut config = super::helpers::get_config(config_service).await;
                    config.theme = theme;
                    if let Err(msg) =
                        super::helpers::update_application_config(config_service, config).await
                    {
                        alert_error(msg);
                    }
                }
                ThemeCommand::Refresh => {
                    cached_value = super::helpers::get_config(config_service).await.theme;
                    if *THEME.peek() != cached_value {
                        *THEME.write() = cached_value;
                    }
                }
            }

            log::debug!("theme_service (coroutine) - Command processed");
        }
    });
    subscribe_event(event_bus, move |_event: ConfigReloadEvent| {
        service_handle.send(ThemeCommand::Refresh);
    });
    use_effect(move || {
        service_handle.send(ThemeCommand::Persist { theme: THEME() });
    });
    service_handle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggles_and_serializes_lowercase() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    }
}
