use crate::prelude::*;

use crate::{
    api::Subtopic,
    components::svg::{ChevronRight, DrawSvg, IconSize},
    utils::CCStr,
    Route,
};

/// A loaded lesson and the share of the tutorial visited so far.
#[derive(Debug, Clone, PartialEq)]
struct Lesson {
    subtopic: Subtopic,
    progress: u8,
}

/// Tutorial page, recorded as visited once loaded.
#[component]
pub fn TutorialView(topic: ReadOnlySignal<CCStr>, subtopic: ReadOnlySignal<CCStr>) -> Element {
    log::debug!("TutorialView reload");

    let api_client_service = state_management::use_api_client_service();
    let progress_service = state_management::use_progress_service();
    let session_service = state_management::use_session_service();

    let lesson = use_resource(move || async move {
        let (topic, slug) = (topic(), subtopic());
        let subtopic = state_management::api_call(api_client_service, {
            let (topic, slug) = (topic.clone(), slug.clone());
            move |client| async move { client.subtopic(&topic, &slug).await }
        })
        .await?;

        let progress = state_management::visit_subtopic(progress_service, topic, slug).await;
        if let Some(id) = subtopic.id {
            state_management::record_subtopic_view(session_service, id);
        }
        Ok::<_, CCStr>(Lesson {
            progress: progress.percent(&subtopic.all_subtopics),
            subtopic,
        })
    });

    use_drop(|| log::debug!("TutorialView Dropped"));

    rsx! {
        match &*lesson.read() {
            None => rsx! {
                div { class: "tutorial",
                    StaticLoadedComponent { input: LoadedComponentInput::Loading,
                        h1 { "Loading lesson" }
                    }
                    LoadedComponent::<Vec<CCStr>> { input: LoadedComponentInput::Loading }
                }
            },
            Some(Err(e)) => rsx! {
                div { class: "tutorial",
                    h1 { "Lesson unavailable" }
                    div { class: "alert alert-error", {e.clone()} }
                }
            },
            Some(Ok(lesson)) => rsx! {
                LessonPage { topic: topic(), lesson: lesson.clone() }
            },
        }
    }
}

#[component]
fn LessonPage(topic: CCStr, lesson: Lesson) -> Element {
    let Lesson { subtopic, progress } = lesson;

    rsx! {
        article { class: "tutorial",
            div { class: "tutorial-progress",
                span { class: "text-muted", "Tutorial progress {progress}%" }
                div { class: "bar-track",
                    span { class: "bar-fill", style: "width: {progress}%" }
                }
            }
            h1 { {subtopic.title.clone()} }
            div {
                class: "tutorial-content",
                dangerous_inner_html: "{subtopic.content}",
            }
            if let Some(next) = subtopic.next_subtopic_slug.clone() {
                div { class: "tutorial-next",
                    Link {
                        class: "btn btn-primary",
                        to: Route::TutorialView {
                            topic,
                            subtopic: next,
                        },
                        "Next lesson"
                        DrawSvg::<ChevronRight> { size: IconSize::Small }
                    }
                }
            }
        }
    }
}
