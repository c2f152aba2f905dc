use std::{future::Future, rc::Rc};

use crate::prelude::*;

use crate::{
    api::{ApiClient, ApiError},
    utils::CCStr,
};

/// A resource whose failures were already logged and stringified.
pub type FResource<T> = Resource<Result<T, CCStr>>;

/// Backend connection settings, changing only when one of them does.
pub(super) fn use_connection_settings() -> Memo<(String, Option<String>, u64)> {
    use_memo(|| {
        let config = state_management::APPLICATION_CONFIG.read();
        (
            config.api_base_url.clone(),
            config.api_token.clone(),
            config.request_timeout_secs,
        )
    })
}

/// Runs `f` with the current API client once, and again whenever a signal
/// it reads or the backend connection settings change.
pub fn use_api_resource<T, F, Fut>(f: F) -> FResource<T>
where
    T: 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let api_client_service = state_management::use_api_client_service();
    let f = use_hook(|| Rc::new(f));
    let connection = use_connection_settings();
    use_resource(move || {
        connection.read();
        let f = f.clone();
        async move { state_management::api_call(api_client_service, |client| f(client)).await }
    })
}
