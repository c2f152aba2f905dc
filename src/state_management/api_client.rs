use dioxus::prelude::*;

use futures_util::stream::StreamExt;
use tokio::sync::oneshot;

use crate::api::{ApiClient, ApiError};

use super::{
    config::{ApplicationConfig, ConfigCommand, ConfigReloadEvent},
    event_bus::{subscribe_event, EventBus},
};

#[derive(Debug)]
pub enum ApiClientCommand {
    GetClient {
        result: oneshot::Sender<Result<ApiClient, ApiError>>,
    },
    /// Internal trigger a rebuild from the config
    Rebuild,
}

pub(super) fn use_api_client_service(
    event_bus: EventBus,
    config_service: Coroutine<ConfigCommand>,
) -> Coroutine<ApiClientCommand> {
    let service_handle = use_coroutine(
        move |mut rx: UnboundedReceiver<ApiClientCommand>| async move {
            log::info!("api_client_service (coroutine) - start");

            let mut client = build_client(&super::helpers::get_config(config_service).await);

            while let Some(cmd) = rx.next().await {
                log::debug!("api_client_service (coroutine) - Processing command {cmd:?}...");
                match cmd {
                    ApiClientCommand::GetClient { result } => {
                        let _ = result.send(client.clone());
                    }
                    ApiClientCommand::Rebuild => {
                        client = build_client(&super::helpers::get_config(config_service).await);
                    }
                }
                log::debug!("api_client_service (coroutine) - Command processed");
            }
        },
    );
    subscribe_event(event_bus, move |_event: ConfigReloadEvent| {
        service_handle.send(ApiClientCommand::Rebuild);
    });
    service_handle
}

fn build_client(config: &ApplicationConfig) -> Result<ApiClient, ApiError> {
    let client = ApiClient::new(
        &config.api_base_url,
        config.api_token.as_deref(),
        config.timeout(),
    );
    match &client {
        Ok(client) => log::info!("API client targets {}", client.base_url()),
        Err(e) => log::error!("Could not build the API client: {e}"),
    }
    client
}
