use std::{cell::RefCell, rc::Rc};

use dioxus::prelude::*;

use futures_util::stream::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::{
    api::{ApiClient, SessionEnd, SessionStart, SubtopicView},
    utils::CCStr,
};

use super::{api_client::ApiClientCommand, config::ConfigCommand};

const SESSION_FILE: &str = "session.json";

/// Identifier of this installation, reused across launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionFile {
    session_id: CCStr,
}

/// Returns the stored session id, or a fresh one flagged as new.
fn resolve_session_id(stored: Option<SessionFile>) -> (CCStr, bool) {
    match stored {
        Some(SessionFile { session_id }) if !session_id.trim().is_empty() => (session_id, false),
        _ => (CCStr::from(uuid::Uuid::new_v4().to_string()), true),
    }
}

fn device_type() -> &'static str {
    if cfg!(feature = "mobile") {
        "mobile"
    } else {
        "desktop"
    }
}

/// What is needed to close the session once the app goes away.
#[derive(Debug, Clone)]
struct OpenSession {
    client: ApiClient,
    session_id: CCStr,
    started: Instant,
}

impl OpenSession {
    async fn end(self) {
        let beacon = SessionEnd {
            session_id: self.session_id,
            time_spent: self.started.elapsed().as_secs(),
        };
        if let Err(e) = self.client.session_end(&beacon).await {
            log::warn!("Failed to end session: {e}");
        }
    }
}

#[derive(Debug)]
pub enum SessionCommand {
    SubtopicView { subtopic_id: u64 },
    End,
}

pub(super) fn use_session_service(
    config_service: Coroutine<ConfigCommand>,
    api_client_service: Coroutine<ApiClientCommand>,
) -> Coroutine<SessionCommand> {
    let open_session: Rc<RefCell<Option<OpenSession>>> = use_hook(|| Rc::new(RefCell::new(None)));

    let service_handle = use_coroutine({
        let open_session = open_session.clone();
        move |mut rx: UnboundedReceiver<SessionCommand>| {
            let open_session = open_session.clone();
            async move {
                log::info!("session_service (coroutine) - start");

                let store = super::helpers::get_store(config_service).await;
                let stored = store.load::<SessionFile>(SESSION_FILE).unwrap_or_else(|e| {
                    log::warn!("Could not read the session file: {e}");
                    None
                });
                let (session_id, is_new) = resolve_session_id(stored);
                if is_new {
                    if let Err(e) = store.save(
                        SESSION_FILE,
                        &SessionFile {
                            session_id: session_id.clone(),
                        },
                    ) {
                        log::warn!("Could not save the session file: {e}");
                    }
                }

                let client = super::helpers::get_api_client(api_client_service).await;
                if let Ok(client) = &client {
                    let beacon = SessionStart {
                        session_id: session_id.clone(),
                        device_type: device_type().into(),
                        country: CCStr::default(),
                    };
                    match client.session_start(&beacon).await {
                        Ok(_) => {
                            *open_session.borrow_mut() = Some(OpenSession {
                                client: client.clone(),
                                session_id: session_id.clone(),
                                started: Instant::now(),
                            });
                        }
                        Err(e) => log::warn!("Failed to start session: {e}"),
                    }
                }

                while let Some(cmd) = rx.next().await {
                    log::debug!("session_service (coroutine) - Processing command {cmd:?}...");
                    match cmd {
                        SessionCommand::SubtopicView { subtopic_id } => {
                            let Ok(client) = super::helpers::get_api_client(api_client_service).await
                            else {
                                continue;
                            };
                            let beacon = SubtopicView {
                                session_id: session_id.clone(),
                                subtopic_id,
                                time_spent_seconds: None,
                                scroll_depth_percent: None,
                            };
                            if let Err(e) = client.subtopic_view(&beacon).await {
                                log::warn!("Failed to record subtopic view: {e}");
                            }
                        }
                        SessionCommand::End => {
                            let session = open_session.borrow_mut().take();
                            if let Some(session) = session {
                                session.end().await;
                            }
                        }
                    }
                    log::debug!("session_service (coroutine) - Command processed");
                }
            }
        }
    });

    use_drop(move || {
        if let Some(session) = open_session.borrow_mut().take() {
            log::debug!("session_service - closing session on drop");
            spawn_forever(session.end());
        }
    });

    service_handle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_session_id_is_reused() {
        let stored = SessionFile {
            session_id: "3f1c".into(),
        };
        assert_eq!(resolve_session_id(Some(stored)), (CCStr::from("3f1c"), false));
    }

    #[test]
    fn missing_or_blank_session_id_is_regenerated() {
        let (id, is_new) = resolve_session_id(None);
        assert!(is_new);
        assert!(uuid::Uuid::parse_str(&id).is_ok());

        let (_, is_new) = resolve_session_id(Some(SessionFile {
            session_id: " ".into(),
        }));
        assert!(is_new);
    }
}
