use std::future::Future;

use dioxus::prelude::*;

use crate::{
    api::{InactiveUser, LoginRecord, User},
    pagination::{DataFetcher, FetchResult, PageQuery, TableError},
    state_management::prelude::state_management::{get_api_client, ApiClientCommand},
};

/// Pages of the user list.
#[derive(Clone, Copy)]
pub struct UsersFetcher {
    pub api_client_service: Coroutine<ApiClientCommand>,
}

impl DataFetcher for UsersFetcher {
    type Record = User;

    fn fetch(
        &self,
        query: PageQuery,
    ) -> impl Future<Output = Result<FetchResult<User>, TableError>> + 'static {
        let service = self.api_client_service;
        async move {
            let client = get_api_client(service).await?;
            Ok(client.list_users(&query).await?)
        }
    }
}

/// Pages of the logins of one user, newest first.
#[derive(Clone, Copy)]
pub struct LoginHistoryFetcher {
    pub api_client_service: Coroutine<ApiClientCommand>,
    pub user_id: u64,
}

impl DataFetcher for LoginHistoryFetcher {
    type Record = LoginRecord;

    fn fetch(
        &self,
        query: PageQuery,
    ) -> impl Future<Output = Result<FetchResult<LoginRecord>, TableError>> + 'static {
        let service = self.api_client_service;
        let user_id = self.user_id;
        async move {
            let client = get_api_client(service).await?;
            Ok(client.login_history(user_id, &query).await?)
        }
    }
}

/// Pages of the users without recent activity.
#[derive(Clone, Copy)]
pub struct InactiveUsersFetcher {
    pub api_client_service: Coroutine<ApiClientCommand>,
}

impl DataFetcher for InactiveUsersFetcher {
    type Record = InactiveUser;

    fn fetch(
        &self,
        query: PageQuery,
    ) -> impl Future<Output = Result<FetchResult<InactiveUser>, TableError>> + 'static {
        let service = self.api_client_service;
        async move {
            let client = get_api_client(service).await?;
            Ok(client.inactive_users(&query).await?)
        }
    }
}
