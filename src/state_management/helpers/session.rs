use super::*;

pub fn record_subtopic_view(session_service: Coroutine<SessionCommand>, subtopic_id: u64) {
    log::debug!("record_subtopic_view - {subtopic_id}");
    session_service.send(SessionCommand::SubtopicView { subtopic_id });
}

pub fn end_session(session_service: Coroutine<SessionCommand>) {
    log::debug!("end_session");
    session_service.send(SessionCommand::End);
}
