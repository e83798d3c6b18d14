//! Terminal front end state and event handling

use crate::platform;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formgate::{
    FieldId, FileRef, FormController, Html, PreviewDocument, ReviewedAnswer, StatusKind,
    SubmitError, UiCommand,
};
use serde_json::Value;
use std::collections::VecDeque;
use tokio::sync::mpsc;

type UploadResult = Result<Value, SubmitError>;

/// Main application struct
pub struct App {
    /// Form state and submission pipeline
    pub controller: FormController,
    /// Field with keyboard focus
    pub focus: FieldId,
    /// Comma-separated paths typed into the file input
    pub files_input: String,
    /// Warning region content
    pub warning: Option<Html>,
    /// Whether the fields after the reviewed answer are shown
    pub dependent_visible: bool,
    /// Status region content
    pub status: Option<(StatusKind, Html)>,
    /// Vertical scroll of the status region
    pub status_scroll: u16,
    /// Pending alerts, oldest first
    pub alerts: VecDeque<Html>,
    /// Open preview overlay
    pub preview: Option<PreviewDocument>,
    /// Whether the app should quit
    quit: bool,
    response_tx: mpsc::UnboundedSender<UploadResult>,
    response_rx: mpsc::UnboundedReceiver<UploadResult>,
}

impl App {
    /// Create a new App around a controller and apply its initial display state
    pub fn new(controller: FormController) -> Self {
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            controller,
            focus: FieldId::default(),
            files_input: String::new(),
            warning: None,
            dependent_visible: true,
            status: None,
            status_scroll: 0,
            alerts: VecDeque::new(),
            preview: None,
            quit: false,
            response_tx,
            response_rx,
        };
        let commands = app.controller.init();
        app.apply(commands);
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn current_alert(&self) -> Option<&Html> {
        self.alerts.front()
    }

    /// Whether a field is currently shown
    pub fn is_visible(&self, field: FieldId) -> bool {
        self.dependent_visible || !field.is_dependent()
    }

    /// Apply display instructions from the controller
    pub fn apply(&mut self, commands: Vec<UiCommand>) {
        for command in commands {
            match command {
                UiCommand::Alert(message) => self.alerts.push_back(message),
                UiCommand::Focus(field) => self.focus = field,
                UiCommand::SetWarning(warning) => self.warning = warning,
                UiCommand::SetDependentVisible(visible) => {
                    self.dependent_visible = visible;
                    if !self.is_visible(self.focus) {
                        self.focus = FieldId::ReviewedAnswer;
                    }
                }
                UiCommand::ClearFileSelection => self.files_input.clear(),
                UiCommand::ClearStatus => {
                    self.status = None;
                    self.status_scroll = 0;
                }
                UiCommand::SetStatus { kind, html } => self.status = Some((kind, html)),
                UiCommand::ScrollStatusIntoView => self.status_scroll = 0,
                UiCommand::ShowPreview(document) => self.preview = Some(document),
                UiCommand::ResetForm => {
                    self.files_input.clear();
                    self.focus = FieldId::default();
                }
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        // Alerts block everything else until dismissed
        if self.current_alert().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alerts.pop_front();
            }
            return;
        }

        if self.preview.is_some() {
            self.handle_preview_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('p') if key.modifiers.contains(platform::ACTION_MODIFIER) => {
                self.request_preview()
            }
            KeyCode::Char('s') if key.modifiers.contains(platform::ACTION_MODIFIER) => {
                self.trigger_submit()
            }
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab => self.focus = self.focus.next(|f| self.is_visible(f)),
            KeyCode::BackTab => self.focus = self.focus.prev(|f| self.is_visible(f)),
            KeyCode::PageUp => self.status_scroll = self.status_scroll.saturating_sub(1),
            KeyCode::PageDown => self.status_scroll = self.status_scroll.saturating_add(1),
            KeyCode::Char(_) if ctrl => {}
            _ => self.handle_field_key(key),
        }
    }

    fn handle_preview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.preview = None,
            KeyCode::Enter => {
                let ready = self.preview.as_ref().is_some_and(|p| p.ready);
                if ready {
                    self.preview = None;
                    self.trigger_submit();
                }
            }
            _ => {}
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent) {
        match self.focus {
            FieldId::ReviewedAnswer => {
                let current = self.controller.form().reviewed_answer;
                let answer = match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => ReviewedAnswer::Yes,
                    KeyCode::Char('n') | KeyCode::Char('N') => ReviewedAnswer::No,
                    KeyCode::Char(' ') | KeyCode::Right | KeyCode::Left => current.cycle(),
                    KeyCode::Backspace | KeyCode::Delete => ReviewedAnswer::Unset,
                    _ => return,
                };
                let commands = self.controller.on_answer_changed(answer);
                self.apply(commands);
            }
            FieldId::AgreementConfirmed => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    let form = self.controller.form_mut();
                    form.agreement_confirmed = !form.agreement_confirmed;
                }
            }
            FieldId::Files => match key.code {
                KeyCode::Char(c) => self.files_input.push(c),
                KeyCode::Backspace => {
                    self.files_input.pop();
                }
                KeyCode::Enter => self.commit_file_selection(),
                _ => {}
            },
            field => {
                let multiline = field.is_multiline();
                let Some(text) = self.controller.form_mut().text_mut(field) else {
                    return;
                };
                match key.code {
                    KeyCode::Char(c) => text.push(c),
                    KeyCode::Backspace => {
                        text.pop();
                    }
                    KeyCode::Enter if multiline => text.push('\n'),
                    KeyCode::Enter => self.focus = self.focus.next(|f| self.is_visible(f)),
                    _ => {}
                }
            }
        }
    }

    /// Turn the typed paths into a new file selection
    pub fn commit_file_selection(&mut self) {
        let mut files = Vec::new();
        for path in self
            .files_input
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            match FileRef::from_path(path) {
                Ok(file) => files.push(file),
                Err(err) => {
                    tracing::debug!("Cannot stat {path}: {err}");
                    self.alerts
                        .push_back(Html::text(&format!("Cannot attach {path}: {err}")));
                    return;
                }
            }
        }
        let commands = self.controller.on_files_changed(files);
        self.apply(commands);
    }

    /// Preview requested
    pub fn request_preview(&mut self) {
        let commands = self.controller.on_preview();
        self.apply(commands);
    }

    /// Submit triggered; the upload, if any, runs on a spawned task
    pub fn trigger_submit(&mut self) {
        let step = self.controller.begin_submit();
        self.apply(step.commands);
        if let Some(job) = step.job {
            let tx = self.response_tx.clone();
            tokio::spawn(async move {
                // Receiver only goes away on shutdown.
                let _ = tx.send(job.run().await);
            });
        }
    }

    /// Deliver finished uploads to the controller
    pub fn poll_responses(&mut self) {
        while let Ok(result) = self.response_rx.try_recv() {
            let step = self.controller.finish_submit(result);
            self.apply(step.commands);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use formgate::{UploadRequest, Uploader};
    use serde_json::json;
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;

    struct AcceptingUploader;

    #[async_trait]
    impl Uploader for AcceptingUploader {
        async fn upload(&self, _request: UploadRequest) -> Result<Value, SubmitError> {
            Ok(json!({ "success": true }))
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), platform::ACTION_MODIFIER)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn fill_valid(app: &mut App) {
        type_text(app, "Acme");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('y')));
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "No changes.");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "J. Doe");
    }

    mod app_basic_tests {
        use super::*;

        #[test]
        fn test_initial_state() {
            let app = App::new(FormController::new(None));
            assert!(!app.should_quit());
            assert!(app.dependent_visible);
            assert!(app.warning.is_none());
            assert_eq!(app.focus, FieldId::OrganizationName);
        }

        #[test]
        fn test_ctrl_c_quits() {
            let mut app = App::new(FormController::new(None));
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
            assert!(app.should_quit());
        }

        #[test]
        fn test_typing_fills_focused_field() {
            let mut app = App::new(FormController::new(None));
            fill_valid(&mut app);
            let form = app.controller.form();
            assert_eq!(form.organization_name, "Acme");
            assert_eq!(form.reviewed_answer, ReviewedAnswer::Yes);
            assert_eq!(form.changes_description, "No changes.");
            assert!(form.agreement_confirmed);
            assert_eq!(form.signature_name, "J. Doe");
        }
    }

    mod branching_tests {
        use super::*;

        #[test]
        fn test_answer_no_hides_dependent_fields() {
            let mut app = App::new(FormController::new(None));
            app.handle_key(key(KeyCode::Tab));
            app.handle_key(key(KeyCode::Char('n')));
            assert!(!app.dependent_visible);
            assert!(app.warning.is_some());

            // Tab only cycles between the two visible fields
            app.handle_key(key(KeyCode::Tab));
            assert_eq!(app.focus, FieldId::OrganizationName);
            app.handle_key(key(KeyCode::Tab));
            assert_eq!(app.focus, FieldId::ReviewedAnswer);
        }

        #[test]
        fn test_hidden_focus_moves_to_answer() {
            let mut app = App::new(FormController::new(None));
            app.focus = FieldId::SignatureName;
            let commands = app.controller.on_answer_changed(ReviewedAnswer::No);
            app.apply(commands);
            assert_eq!(app.focus, FieldId::ReviewedAnswer);
        }
    }

    mod alert_tests {
        use super::*;

        #[test]
        fn test_alert_blocks_input_until_dismissed() {
            let mut app = App::new(FormController::new(None));
            app.handle_key(ctrl('s'));
            assert!(app.current_alert().is_some());

            app.handle_key(key(KeyCode::Char('x')));
            assert!(app.controller.form().organization_name.is_empty());

            app.handle_key(key(KeyCode::Enter));
            assert!(app.current_alert().is_none());
            // The review gate runs before field validation
            assert_eq!(app.focus, FieldId::ReviewedAnswer);
        }

        #[test]
        fn test_missing_file_alerts_and_keeps_selection() {
            let mut app = App::new(FormController::new(None));
            app.files_input = "/definitely/not/here.pdf".to_string();
            app.commit_file_selection();
            assert_eq!(app.alerts.len(), 1);
            assert!(app.controller.form().selected_files.is_empty());
        }

        #[test]
        fn test_file_alert_escapes_path() {
            let mut app = App::new(FormController::new(None));
            app.files_input = "<img src=x>.pdf".to_string();
            app.commit_file_selection();
            let alert = app.current_alert().unwrap();
            assert!(!alert.as_str().contains("<img"));
            assert!(alert.as_str().contains("&lt;img src=x&gt;.pdf"));
            assert!(alert.to_plain_text().contains("<img src=x>.pdf"));
        }
    }

    mod file_tests {
        use super::*;

        #[test]
        fn test_commit_selection_stats_files() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("a.txt");
            std::fs::File::create(&path)
                .unwrap()
                .write_all(b"abc")
                .unwrap();

            let mut app = App::new(FormController::new(None));
            app.files_input = format!(" {} ,", path.display());
            app.commit_file_selection();
            let files = &app.controller.form().selected_files;
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].size, 3);
        }

        #[test]
        fn test_too_many_files_clears_input() {
            let dir = tempfile::tempdir().unwrap();
            let paths: Vec<String> = (0..6)
                .map(|i| {
                    let path = dir.path().join(format!("{i}.txt"));
                    std::fs::write(&path, b"x").unwrap();
                    path.display().to_string()
                })
                .collect();

            let mut app = App::new(FormController::new(None));
            app.files_input = paths.join(",");
            app.commit_file_selection();
            assert!(app.files_input.is_empty());
            assert!(app.controller.form().selected_files.is_empty());
            assert_eq!(app.alerts.len(), 1);
        }
    }

    mod submit_tests {
        use super::*;

        #[test]
        fn test_preview_then_confirm_without_endpoint() {
            let mut app = App::new(FormController::new(None));
            fill_valid(&mut app);
            app.handle_key(ctrl('p'));
            assert!(app.preview.as_ref().is_some_and(|p| p.ready));

            app.handle_key(key(KeyCode::Enter));
            assert!(app.preview.is_none());
            let (kind, html) = app.status.clone().unwrap();
            assert_eq!(kind, StatusKind::Info);
            assert!(html.to_plain_text().contains("\"organizationName\": \"Acme\""));
        }

        #[test]
        fn test_preview_not_ready_cannot_confirm() {
            let mut app = App::new(FormController::new(None));
            app.handle_key(ctrl('p'));
            app.handle_key(key(KeyCode::Enter));
            assert!(app.preview.is_some());
            assert!(app.status.is_none());

            app.handle_key(key(KeyCode::Esc));
            assert!(app.preview.is_none());
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_upload_result_is_delivered() {
            let uploader: Arc<dyn Uploader> = Arc::new(AcceptingUploader);
            let mut app = App::new(FormController::new(Some(uploader)));
            fill_valid(&mut app);
            app.handle_key(ctrl('s'));
            assert!(app.controller.is_submitting());

            for _ in 0..50 {
                tokio::time::sleep(Duration::from_millis(10)).await;
                app.poll_responses();
                if !app.controller.is_submitting() {
                    break;
                }
            }

            assert!(!app.controller.is_submitting());
            let (kind, _) = app.status.clone().unwrap();
            assert_eq!(kind, StatusKind::Success);
            assert!(app.controller.form().organization_name.is_empty());
            assert_eq!(app.focus, FieldId::OrganizationName);
        }
    }
}
