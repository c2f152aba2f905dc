use std::future::Future;

use super::*;

pub async fn get_api_client(
    api_client_service: Coroutine<ApiClientCommand>,
) -> Result<ApiClient, ApiError> {
    log::debug!("get_api_client - start");
    let (result, rx) = oneshot::channel();
    api_client_service.send(ApiClientCommand::GetClient { result });
    let client = rx
        .await
        .map_err(|_| ApiError::Network("API client service unavailable".into()))
        .and_then(|r| r);
    log::debug!("get_api_client - finished");
    client
}

/// Runs `f` with the current client, logging and stringifying any failure.
pub async fn api_call<T, F, Fut>(
    api_client_service: Coroutine<ApiClientCommand>,
    f: F,
) -> Result<T, CCStr>
where
    F: FnOnce(ApiClient) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let client = get_api_client(api_client_service)
        .await
        .map_err(log_error_ccstr)?;
    f(client).await.map_err(|e| {
        if e.is_unauthorized() {
            log::warn!("The backend rejected the credentials, check the API token");
        }
        log_error_ccstr(e)
    })
}
