//! Panel controller: turns form submissions into API requests and applies
//! their completions to the view model.
//!
//! Every operation has two halves. The *begin* half reads the view model and
//! returns a [`PendingRequest`]; the caller sends it however it likes and
//! later hands the finished [`ApiResponse`] to [`PanelController::complete`]
//! together with the [`Ticket`] it got back. Nothing here awaits.
//!
//! Thread operations carry a per-thread token. Starting a new operation on a
//! thread supersedes the previous token, and deleting a thread drops it, so a
//! completion that arrives late is recognised as stale and ignored.

use crate::api::{self, ApiRequest, ApiResponse, Outcome, STATUS_OK};
use crate::config::*;
use crate::error::PanelError;
use crate::model::{ConfigForm, Thread, ThreadBook, ThreadDraft, ThreadId, UserForm};
use crate::notify::Notifier;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Completion context of one in-flight request.
#[derive(Debug, Clone, PartialEq)]
pub enum Ticket {
    Config,
    User,
    EditThread {
        id: ThreadId,
        token: u64,
        name: String,
    },
    DeleteThread {
        id: ThreadId,
        token: u64,
    },
    CreateThread {
        thread: Thread,
        token: u64,
    },
    LastRequest,
}

/// A request ready to send plus the ticket to complete it with.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub request: ApiRequest,
    pub ticket: Ticket,
}

#[derive(Debug, Default)]
pub struct PanelController {
    threads: ThreadBook,
    tokens: HashMap<ThreadId, u64>,
    next_token: u64,
    last_request: Option<String>,
}

impl PanelController {
    pub fn new(threads: ThreadBook) -> Self {
        PanelController {
            threads,
            ..PanelController::default()
        }
    }

    pub fn threads(&self) -> &ThreadBook {
        &self.threads
    }

    /// Raw text of the bumper's last forum request, once loaded.
    pub fn last_request(&self) -> Option<&str> {
        self.last_request.as_deref()
    }

    pub fn select_thread(&mut self, id: &ThreadId) -> bool {
        self.threads.select(id)
    }

    /// Replace the editable fields of a thread panel.
    pub fn set_draft(&mut self, id: &ThreadId, draft: ThreadDraft) -> bool {
        match self.threads.get_mut(id) {
            Some(entry) => {
                entry.draft = draft;
                true
            }
            None => false,
        }
    }

    pub fn update_configuration(&mut self, form: &ConfigForm) -> PendingRequest {
        PendingRequest {
            request: api::config_request(form),
            ticket: Ticket::Config,
        }
    }

    pub fn update_user(&mut self, form: &UserForm) -> PendingRequest {
        PendingRequest {
            request: api::user_request(form),
            ticket: Ticket::User,
        }
    }

    pub fn edit_thread(&mut self) -> Result<PendingRequest, PanelError> {
        let entry = self.threads.selected().ok_or(PanelError::NoSelection)?;
        let id = entry.id.clone();
        let request = api::edit_thread_request(&id, &entry.draft);
        let name = entry.draft.name.clone();
        let token = self.issue_token(&id);
        Ok(PendingRequest {
            request,
            ticket: Ticket::EditThread { id, token, name },
        })
    }

    pub fn delete_thread(&mut self) -> Result<PendingRequest, PanelError> {
        let id = self
            .threads
            .selected_id()
            .cloned()
            .ok_or(PanelError::NoSelection)?;
        let request = api::delete_thread_request(&id);
        let token = self.issue_token(&id);
        Ok(PendingRequest {
            request,
            ticket: Ticket::DeleteThread { id, token },
        })
    }

    pub fn create_thread(&mut self, thread: Thread) -> Result<PendingRequest, PanelError> {
        if self.threads.contains(&thread.id) {
            return Err(PanelError::DuplicateThread(thread.id));
        }
        let draft = ThreadDraft {
            name: thread.name.clone(),
            message: thread.message.clone(),
        };
        let request = api::create_thread_request(&thread.id, &draft);
        let token = self.issue_token(&thread.id);
        Ok(PendingRequest {
            request,
            ticket: Ticket::CreateThread { thread, token },
        })
    }

    pub fn load_last_request(&mut self) -> PendingRequest {
        PendingRequest {
            request: api::last_request_request(),
            ticket: Ticket::LastRequest,
        }
    }

    fn issue_token(&mut self, id: &ThreadId) -> u64 {
        self.next_token += 1;
        self.tokens.insert(id.clone(), self.next_token);
        self.next_token
    }

    fn is_current(&self, id: &ThreadId, token: u64) -> bool {
        self.tokens.get(id) == Some(&token)
    }

    fn is_stale(&self, ticket: &Ticket) -> bool {
        match ticket {
            Ticket::EditThread { id, token, .. } | Ticket::DeleteThread { id, token } => {
                !self.is_current(id, *token)
            }
            Ticket::CreateThread { thread, token } => !self.is_current(&thread.id, *token),
            _ => false,
        }
    }

    /// Apply a completed response. Stale thread completions are dropped
    /// without touching the view model or the notifier.
    pub fn complete<N: Notifier>(
        &mut self,
        ticket: Ticket,
        response: &ApiResponse,
        notifier: &mut N,
    ) -> Result<(), PanelError> {
        if self.is_stale(&ticket) {
            debug!("Ignoring stale completion for {:?}", ticket);
            return Ok(());
        }

        match ticket {
            Ticket::Config => {
                let outcome = api::classify_validated(response)?;
                report(outcome, MSG_CONFIG_UPDATED, MSG_CONFIG_FAILED, notifier);
            }
            Ticket::User => {
                let outcome = api::classify_validated(response)?;
                report(outcome, MSG_USER_UPDATED, MSG_USER_FAILED, notifier);
            }
            Ticket::EditThread { id, name, .. } => match api::classify_binary(response) {
                Outcome::Success => {
                    self.threads.set_label(&id, name);
                    info!("Thread {} updated", id);
                    notifier.notify(MSG_THREAD_UPDATED);
                }
                outcome => report(outcome, "", MSG_THREAD_UPDATE_FAILED, notifier),
            },
            Ticket::DeleteThread { id, .. } => match api::classify_binary(response) {
                Outcome::Success => {
                    self.threads.hide_all_panels();
                    self.threads.remove(&id);
                    self.tokens.remove(&id);
                    info!("Thread {} deleted", id);
                    notifier.notify(MSG_THREAD_DELETED);
                }
                outcome => report(outcome, "", MSG_THREAD_DELETE_FAILED, notifier),
            },
            Ticket::CreateThread { thread, .. } => match api::classify_binary(response) {
                Outcome::Success => {
                    let id = thread.id.clone();
                    if !self.threads.insert(thread) {
                        warn!("Thread {} was added twice", id);
                    }
                    self.threads.select(&id);
                    info!("Thread {} added", id);
                    notifier.notify(MSG_THREAD_CREATED);
                }
                outcome => {
                    self.tokens.remove(&thread.id);
                    report(outcome, "", MSG_THREAD_CREATE_FAILED, notifier)
                }
            },
            Ticket::LastRequest => {
                if response.status == STATUS_OK {
                    self.last_request = Some(response.body.clone());
                } else {
                    let message = api::error_message(response)
                        .unwrap_or_else(|| MSG_LAST_REQUEST_FAILED.to_string());
                    notifier.notify(&message);
                }
            }
        }
        Ok(())
    }

    /// The request never produced a response.
    pub fn fail<N: Notifier>(&mut self, ticket: Ticket, error: &PanelError, notifier: &mut N) {
        if self.is_stale(&ticket) {
            debug!("Ignoring stale failure for {:?}", ticket);
            return;
        }
        notifier.notify(MSG_UNREACHABLE);
        notifier.diagnose(&error.to_string());
    }
}

fn report<N: Notifier>(outcome: Outcome, success: &str, failure: &str, notifier: &mut N) {
    match outcome {
        Outcome::Success => notifier.notify(success),
        Outcome::Rejected(message) => notifier.notify(&message),
        Outcome::Failed(raw_body) => {
            notifier.notify(failure);
            notifier.diagnose(&raw_body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Outbox;

    fn thread(id: &str, name: &str) -> Thread {
        Thread {
            id: ThreadId::new(id),
            name: name.to_string(),
            message: "bump".to_string(),
        }
    }

    fn controller() -> PanelController {
        PanelController::new(ThreadBook::from_threads(vec![
            thread("41", "First"),
            thread("42", "Second"),
        ]))
    }

    fn ok() -> ApiResponse {
        ApiResponse::new(200, r#"{"success": true, "message": "done"}"#)
    }

    #[test]
    fn every_operation_reports_success_without_diagnostics() {
        let mut ctl = controller();
        let mut rec = Outbox::default();

        let cfg = ctl.update_configuration(&ConfigForm::default());
        ctl.complete(cfg.ticket, &ok(), &mut rec).unwrap();
        let user = ctl.update_user(&UserForm::default());
        ctl.complete(user.ticket, &ok(), &mut rec).unwrap();
        let edit = ctl.edit_thread().unwrap();
        ctl.complete(edit.ticket, &ok(), &mut rec).unwrap();
        let delete = ctl.delete_thread().unwrap();
        ctl.complete(delete.ticket, &ok(), &mut rec).unwrap();

        assert_eq!(
            rec.messages,
            [
                MSG_CONFIG_UPDATED,
                MSG_USER_UPDATED,
                MSG_THREAD_UPDATED,
                MSG_THREAD_DELETED
            ]
        );
        assert!(rec.diagnostics.is_empty());
    }

    #[test]
    fn config_400_shows_server_error_verbatim() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let pending = ctl.update_configuration(&ConfigForm {
            bump_delay: "-1".into(),
            ..ConfigForm::default()
        });
        assert_eq!(pending.request.field("bump_delay"), Some("-1"));

        let resp = ApiResponse::new(400, r#"{"error":"bump_delay must be positive"}"#);
        ctl.complete(pending.ticket, &resp, &mut rec).unwrap();
        assert_eq!(rec.messages, ["bump_delay must be positive"]);
        assert!(rec.diagnostics.is_empty());
    }

    #[test]
    fn user_unexpected_status_logs_raw_body_once() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let pending = ctl.update_user(&UserForm::default());
        let body = r#"{"success": false, "error": "boom"}"#;
        ctl.complete(pending.ticket, &ApiResponse::new(500, body), &mut rec)
            .unwrap();
        assert_eq!(rec.messages, [MSG_USER_FAILED]);
        assert_eq!(rec.diagnostics, [body]);
    }

    #[test]
    fn malformed_config_body_is_an_error() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let pending = ctl.update_configuration(&ConfigForm::default());
        let result = ctl.complete(pending.ticket, &ApiResponse::new(502, "Bad Gateway"), &mut rec);
        assert!(matches!(result, Err(PanelError::MalformedBody { status: 502, .. })));
        assert!(rec.messages.is_empty());
    }

    #[test]
    fn edit_success_relabels_option_and_keeps_panel() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let id = ThreadId::new("42");
        assert!(ctl.select_thread(&id));
        ctl.set_draft(
            &id,
            ThreadDraft {
                name: "NewName".into(),
                message: "fresh bump".into(),
            },
        );

        let pending = ctl.edit_thread().unwrap();
        assert_eq!(pending.request.field("thread"), Some("42"));
        assert_eq!(pending.request.field("message"), Some("fresh bump"));
        ctl.complete(pending.ticket, &ok(), &mut rec).unwrap();

        let entry = ctl.threads().get(&id).unwrap();
        assert_eq!(entry.label, "NewName");
        assert!(ctl.threads().is_panel_visible(&id));
        assert_eq!(rec.messages, ["Successfully updated the thread"]);
    }

    #[test]
    fn edit_failure_keeps_label_even_on_400() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let id = ThreadId::new("41");
        ctl.set_draft(
            &id,
            ThreadDraft {
                name: "Other".into(),
                message: String::new(),
            },
        );
        let pending = ctl.edit_thread().unwrap();
        let body = r#"{"success": false, "error": "Thread does not exist"}"#;
        ctl.complete(pending.ticket, &ApiResponse::new(400, body), &mut rec)
            .unwrap();
        assert_eq!(ctl.threads().get(&id).unwrap().label, "First");
        assert_eq!(rec.messages, [MSG_THREAD_UPDATE_FAILED]);
        assert_eq!(rec.diagnostics, [body]);
    }

    #[test]
    fn delete_success_removes_entry_and_hides_panels() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let id = ThreadId::new("42");
        ctl.select_thread(&id);
        let pending = ctl.delete_thread().unwrap();
        ctl.complete(pending.ticket, &ok(), &mut rec).unwrap();

        assert!(!ctl.threads().contains(&id));
        assert_eq!(ctl.threads().len(), 1);
        assert_eq!(ctl.threads().visible_panel(), None);
        assert_eq!(rec.messages, [MSG_THREAD_DELETED]);
    }

    #[test]
    fn delete_failure_leaves_thread_in_place() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let pending = ctl.delete_thread().unwrap();
        ctl.complete(pending.ticket, &ApiResponse::new(500, "oops"), &mut rec)
            .unwrap();
        assert_eq!(ctl.threads().len(), 2);
        assert_eq!(rec.messages, [MSG_THREAD_DELETE_FAILED]);
        assert_eq!(rec.diagnostics, ["oops"]);
    }

    #[test]
    fn edit_completion_after_delete_is_ignored() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let edit = ctl.edit_thread().unwrap();
        let delete = ctl.delete_thread().unwrap();

        ctl.complete(delete.ticket, &ok(), &mut rec).unwrap();
        ctl.complete(edit.ticket, &ok(), &mut rec).unwrap();

        assert_eq!(rec.messages, [MSG_THREAD_DELETED]);
        assert!(!ctl.threads().contains(&ThreadId::new("41")));
    }

    #[test]
    fn superseded_edit_does_not_overwrite_label() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let id = ThreadId::new("41");
        ctl.set_draft(&id, ThreadDraft { name: "One".into(), message: String::new() });
        let first = ctl.edit_thread().unwrap();
        ctl.set_draft(&id, ThreadDraft { name: "Two".into(), message: String::new() });
        let second = ctl.edit_thread().unwrap();

        ctl.complete(second.ticket, &ok(), &mut rec).unwrap();
        ctl.complete(first.ticket, &ok(), &mut rec).unwrap();

        assert_eq!(ctl.threads().get(&id).unwrap().label, "Two");
        assert_eq!(rec.messages.len(), 1);
    }

    #[test]
    fn no_selection_issues_no_request() {
        let mut ctl = PanelController::new(ThreadBook::default());
        assert!(matches!(ctl.edit_thread(), Err(PanelError::NoSelection)));
        assert!(matches!(ctl.delete_thread(), Err(PanelError::NoSelection)));
    }

    #[test]
    fn create_appends_and_selects_on_success() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let pending = ctl.create_thread(thread("99", "Brand new")).unwrap();
        assert_eq!(pending.request.field("method"), Some("create"));
        assert!(!ctl.threads().contains(&ThreadId::new("99")));

        ctl.complete(pending.ticket, &ok(), &mut rec).unwrap();
        let selected = ctl.threads().selected().unwrap();
        assert_eq!(selected.id, ThreadId::new("99"));
        assert_eq!(selected.label, "Brand new");
        assert_eq!(rec.messages, [MSG_THREAD_CREATED]);
    }

    #[test]
    fn failed_create_forgets_its_token() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let pending = ctl.create_thread(thread("77", "Rejected")).unwrap();
        assert!(ctl.tokens.contains_key(&ThreadId::new("77")));

        let body = r#"{"success": false, "error": "Invalid method"}"#;
        ctl.complete(pending.ticket, &ApiResponse::new(400, body), &mut rec)
            .unwrap();
        assert!(!ctl.tokens.contains_key(&ThreadId::new("77")));
        assert!(!ctl.threads().contains(&ThreadId::new("77")));
        assert_eq!(rec.messages, [MSG_THREAD_CREATE_FAILED]);
        assert_eq!(rec.diagnostics, [body]);
    }

    #[test]
    fn create_rejects_known_id_locally() {
        let mut ctl = controller();
        assert!(matches!(
            ctl.create_thread(thread("41", "dup")),
            Err(PanelError::DuplicateThread(_))
        ));
    }

    #[test]
    fn transport_failure_reports_unreachable() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let pending = ctl.update_user(&UserForm::default());
        let err = PanelError::Transport("connection refused".into());
        ctl.fail(pending.ticket, &err, &mut rec);
        assert_eq!(rec.messages, [MSG_UNREACHABLE]);
        assert_eq!(rec.diagnostics.len(), 1);
    }

    #[test]
    fn last_request_text_is_kept_or_error_shown() {
        let mut ctl = controller();
        let mut rec = Outbox::default();
        let pending = ctl.load_last_request();
        ctl.complete(pending.ticket, &ApiResponse::new(200, "<html>forum</html>"), &mut rec)
            .unwrap();
        assert_eq!(ctl.last_request(), Some("<html>forum</html>"));

        let pending = ctl.load_last_request();
        let resp = ApiResponse::new(400, r#"{"success": false, "error": "No request has been made"}"#);
        ctl.complete(pending.ticket, &resp, &mut rec).unwrap();
        assert_eq!(rec.messages, ["No request has been made"]);
    }
}
