use std::collections::{BTreeMap, BTreeSet};

use dioxus::prelude::*;

use futures_util::stream::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::utils::{percent, CCStr};

use super::config::ConfigCommand;

const PROGRESS_FILE: &str = "progress.json";

/// Tutorial pages already opened, per topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialProgress {
    visited: BTreeMap<String, BTreeSet<String>>,
    last_visited: Option<(String, String)>,
}

impl TutorialProgress {
    /// Marks a subtopic as visited. Returns `true` if it was not already.
    pub fn record(&mut self, topic: &str, subtopic: &str) -> bool {
        self.last_visited = Some((topic.to_owned(), subtopic.to_owned()));
        self.visited
            .entry(topic.to_owned())
            .or_default()
            .insert(subtopic.to_owned())
    }

    pub fn last_visited(&self) -> Option<(&str, &str)> {
        self.last_visited
            .as_ref()
            .map(|(t, s)| (t.as_str(), s.as_str()))
    }

    /// Share of `all_subtopics` visited under any topic.
    pub fn percent(&self, all_subtopics: &[CCStr]) -> u8 {
        let known: BTreeSet<&str> = all_subtopics.iter().map(|s| s.as_ref()).collect();
        let done = self
            .visited
            .values()
            .flatten()
            .map(String::as_str)
            .filter(|slug| known.contains(slug))
            .collect::<BTreeSet<_>>()
            .len();
        percent(done as u64, known.len() as u64)
    }
}

#[derive(Debug)]
pub enum ProgressCommand {
    Visit {
        topic: CCStr,
        subtopic: CCStr,
        result: oneshot::Sender<TutorialProgress>,
    },
}

pub(super) fn use_progress_service(
    config_service: Coroutine<ConfigCommand>,
) -> Coroutine<ProgressCommand> {
    use_coroutine(
        move |mut rx: UnboundedReceiver<ProgressCommand>| async move {
            log::info!("progress_service (coroutine) - start");

            let store = super::helpers::get_store(config_service).await;
            let mut progress: TutorialProgress = match store.load(PROGRESS_FILE) {
                Ok(progress) => progress.unwrap_or_default(),
                Err(e) => {
                    log::error!("Could not load the tutorial progress: {e}");
                    TutorialProgress::default()
                }
            };

            while let Some(cmd) = rx.next().await {
                log::debug!("progress_service (coroutine) - Processing command {cmd:?}...");
                match cmd {
                    ProgressCommand::Visit {
                        topic,
                        subtopic,
                        result,
                    } => {
                        progress.record(&topic, &subtopic);
                        if let Err(e) = store.save(PROGRESS_FILE, &progress) {
                            log::warn!("Could not save the tutorial progress: {e}");
                        }
                        let _ = result.send(progress.clone());
                    }
                }
                log::debug!("progress_service (coroutine) - Command processed");
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs(list: &[&str]) -> Vec<CCStr> {
        list.iter().map(|s| CCStr::from(*s)).collect()
    }

    #[test]
    fn percent_counts_unique_known_subtopics() {
        let mut progress = TutorialProgress::default();
        let all = slugs(&["intro", "variables", "loops", "functions"]);
        assert_eq!(progress.percent(&all), 0);

        assert!(progress.record("python", "intro"));
        assert!(!progress.record("python", "intro"));
        assert!(progress.record("basics", "loops"));
        progress.record("python", "unrelated");
        assert_eq!(progress.percent(&all), 50);
        assert_eq!(progress.last_visited(), Some(("python", "unrelated")));

        assert_eq!(progress.percent(&[]), 0);
    }

    #[test]
    fn persisted_form_is_stable() {
        let mut progress = TutorialProgress::default();
        progress.record("python", "intro");
        let json = serde_json::to_string(&progress).unwrap();
        let back: TutorialProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
        let empty: TutorialProgress = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, TutorialProgress::default());
    }
}
