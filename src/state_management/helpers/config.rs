use super::*;

pub async fn get_config(config_service: Coroutine<ConfigCommand>) -> ApplicationConfig {
    log::debug!("get_config - start");
    let (result, rx) = oneshot::channel();
    config_service.send(ConfigCommand::GetConfig { result });
    let config = rx.await.unwrap_or_else(|_| {
        log::error!("config_service unavailable, using the default configuration");
        ApplicationConfig::default()
    });
    log::debug!("get_config - finished");
    config
}

pub async fn get_store(config_service: Coroutine<ConfigCommand>) -> ConfigStore {
    log::debug!("get_store - start");
    let (result, rx) = oneshot::channel();
    config_service.send(ConfigCommand::GetStore { result });
    let store = rx.await.unwrap_or_else(|_| {
        log::error!("config_service unavailable, using the default store location");
        ConfigStore::from_env()
    });
    log::debug!("get_store - finished");
    store
}

pub async fn update_application_config(
    config_service: Coroutine<ConfigCommand>,
    config: ApplicationConfig,
) -> Result<(), CCStr> {
    log::debug!("update_application_config - start");
    let (result, rx) = oneshot::channel();
    config_service.send(ConfigCommand::UpdateConfig { config, result });
    let result = rx
        .await
        .map_err(|_| CCStr::from("config_service unavailable"))
        .and_then(|r| r);
    log::debug!("update_application_config - finished");
    result
}

/// Records a tutorial visit and returns the updated progress.
pub async fn visit_subtopic(
    progress_service: Coroutine<ProgressCommand>,
    topic: CCStr,
    subtopic: CCStr,
) -> TutorialProgress {
    log::debug!("visit_subtopic - start");
    let (result, rx) = oneshot::channel();
    progress_service.send(ProgressCommand::Visit {
        topic,
        subtopic,
        result,
    });
    let progress = rx.await.unwrap_or_default();
    log::debug!("visit_subtopic - finished");
    progress
}
