//! Editor session: the buffers, preview, and current project of one editor.
//!
//! All state that a browser client would keep in globals lives in an explicit
//! [`EditorSession`] value. Store failures never discard buffers; they become
//! [`Notice`]s for the caller to display.

/// Sign-in change notifications.
pub mod auth;
/// User-facing notices.
pub mod notice;

pub use auth::{AuthNotifier, Subscription};
pub use notice::{Notice, NoticeLevel};

use crate::bundle::SourceBundle;
use crate::compose::{compose_bundle, compose_preview};
use crate::error::DecodeError;
use crate::export::{export_archive, export_single_file, ExportArtifact};
use crate::models::{AccountRef, ProjectRecord, ProjectVersion, Visibility};
use crate::preview::PreviewScheduler;
use crate::settings::EditorSettings;
use crate::share::{self, ShareToken};
use crate::store::{LocalStore, RemoteStore};
use crate::templates;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Where the initial bundle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource {
    ShareLink,
    /// A share link was present but did not decode.
    BrokenShareLink,
    Local,
    Template,
}

/// The project currently open in the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentProject {
    pub id: String,
    pub name: String,
    pub visibility: Visibility,
    pub owner: Option<AccountRef>,
}

/// State of one editor.
pub struct EditorSession {
    bundle: SourceBundle,
    settings: EditorSettings,
    scheduler: PreviewScheduler,
    preview: String,
    project: Option<CurrentProject>,
    account: Arc<Mutex<Option<AccountRef>>>,
    notices: Vec<Notice>,
    restored_from: RestoreSource,
    auth_subscription: Option<Subscription>,
}

impl EditorSession {
    /// Start a session from `bundle` with default settings.
    pub fn new(bundle: SourceBundle, debounce: Duration) -> Self {
        Self::from_parts(
            bundle,
            EditorSettings::default(),
            debounce,
            RestoreSource::Template,
        )
    }

    fn from_parts(
        bundle: SourceBundle,
        settings: EditorSettings,
        debounce: Duration,
        restored_from: RestoreSource,
    ) -> Self {
        let preview = compose_preview(&bundle);
        Self {
            scheduler: PreviewScheduler::new(debounce, settings.auto_refresh),
            bundle,
            settings,
            preview,
            project: None,
            account: Arc::new(Mutex::new(None)),
            notices: Vec::new(),
            restored_from,
            auth_subscription: None,
        }
    }

    /// Build the initial session.
    ///
    /// Sources come from the share token in `query` if present (a token that
    /// fails to decode yields empty sources), else from the local record,
    /// else from the default template. Settings always come from the local
    /// record when one exists.
    ///
    /// # Arguments
    /// - `query`: Raw page query string, with or without the leading `?`.
    /// - `local`: Store holding the last locally saved record.
    /// - `debounce`: Preview recomposition delay.
    ///
    /// # Returns
    /// A session whose [`EditorSession::restored_from`] names the source used.
    pub fn restore(query: Option<&str>, local: &dyn LocalStore, debounce: Duration) -> Self {
        let mut notices = Vec::new();
        let local_state = match local.load() {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!("Failed to load local state: {}", err);
                notices.push(Notice::warning(format!(
                    "Could not load saved work: {}",
                    err
                )));
                None
            }
        };
        let settings = local_state
            .as_ref()
            .map(|state| state.settings.clone())
            .unwrap_or_default();

        let token = query.and_then(share::token_from_query);
        let (bundle, source) = match (token, local_state) {
            (Some(token), _) => match share::decode(token.as_str()) {
                Ok(partial) => (partial.normalize(), RestoreSource::ShareLink),
                Err(err) => {
                    tracing::warn!("Ignoring malformed share token: {}", err);
                    notices.push(Notice::warning(shared_link_message(&err)));
                    (SourceBundle::default(), RestoreSource::BrokenShareLink)
                }
            },
            (None, Some(state)) => (state.bundle, RestoreSource::Local),
            (None, None) => (templates::default_bundle(), RestoreSource::Template),
        };

        let mut session = Self::from_parts(bundle, settings, debounce, source);
        session.notices = notices;
        session
    }

    /// Follow sign-in changes from `notifier` until the session is dropped.
    ///
    /// Re-attaching replaces (and thereby unsubscribes) the previous
    /// subscription.
    pub fn attach_auth(&mut self, notifier: &AuthNotifier) {
        self.set_account_value(notifier.current());
        let account = self.account.clone();
        let subscription = notifier.subscribe(move |next| {
            match account.lock() {
                Ok(mut slot) => *slot = next.cloned(),
                Err(_) => tracing::error!("Failed to record auth change: session state poisoned"),
            }
        });
        self.auth_subscription = Some(subscription);
    }

    /// Stop following sign-in changes.
    pub fn detach_auth(&mut self) {
        if let Some(subscription) = self.auth_subscription.take() {
            subscription.unsubscribe();
        }
    }

    fn set_account_value(&self, account: Option<AccountRef>) {
        match self.account.lock() {
            Ok(mut slot) => *slot = account,
            Err(_) => tracing::error!("Failed to record account: session state poisoned"),
        }
    }

    /// The signed-in account, if any.
    pub fn account(&self) -> Option<AccountRef> {
        match self.account.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn bundle(&self) -> &SourceBundle {
        &self.bundle
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn restored_from(&self) -> RestoreSource {
        self.restored_from
    }

    pub fn project(&self) -> Option<&CurrentProject> {
        self.project.as_ref()
    }

    /// Whether the signed-in account owns the open project.
    pub fn is_owner(&self) -> bool {
        let account = self.account();
        matches!(
            (self.project.as_ref().and_then(|p| p.owner.as_ref()), account.as_ref()),
            (Some(owner), Some(account)) if owner == account
        )
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn set_markup(&mut self, markup: impl Into<String>, now: Instant) {
        self.bundle.markup = markup.into();
        self.scheduler.record_edit(now);
    }

    pub fn set_style(&mut self, style: impl Into<String>, now: Instant) {
        self.bundle.style = style.into();
        self.scheduler.record_edit(now);
    }

    pub fn set_script(&mut self, script: impl Into<String>, now: Instant) {
        self.bundle.script = script.into();
        self.scheduler.record_edit(now);
    }

    pub fn set_auto_refresh(&mut self, enabled: bool, now: Instant) {
        self.settings.auto_refresh = enabled;
        self.scheduler.set_auto_refresh(enabled, now);
    }

    pub fn set_font_size(&mut self, font_size: u16) {
        self.settings.font_size = font_size;
    }

    pub fn set_editor_theme(&mut self, theme: impl Into<String>) {
        self.settings.editor_theme = theme.into();
    }

    /// The last composed preview document.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Recompose the preview if the debounce window has elapsed.
    ///
    /// # Returns
    /// The new preview document when it was recomposed.
    pub fn poll_preview(&mut self, now: Instant) -> Option<&str> {
        if !self.scheduler.take_due(now) {
            return None;
        }
        self.preview = compose_preview(&self.bundle);
        Some(self.preview.as_str())
    }

    /// Recompose the preview immediately ("Run").
    pub fn run_preview(&mut self) -> &str {
        self.preview = compose_preview(&self.bundle);
        self.scheduler.mark_rendered();
        &self.preview
    }

    fn replace_bundle(&mut self, bundle: SourceBundle) {
        self.bundle = bundle;
        self.preview = compose_preview(&self.bundle);
    }

    /// The document a download would contain.
    pub fn composed(&self) -> String {
        compose_bundle(&self.bundle)
    }

    /// Persist buffers and settings locally.
    ///
    /// # Returns
    /// `true` on success; failures are reported as a notice.
    pub fn save_local(&mut self, store: &dyn LocalStore) -> bool {
        match store.save(&self.bundle, &self.settings) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Failed to save local state: {}", err);
                self.notify(Notice::error(format!("Failed to save locally: {}", err)));
                false
            }
        }
    }

    pub fn share_token(&self) -> ShareToken {
        share::encode(&self.bundle)
    }

    /// `<origin><path>?code=<token>` for the current buffers.
    pub fn share_url(&self, origin: &str, path: &str) -> String {
        share::share_url(origin, path, &self.share_token())
    }

    fn export_name(&self) -> Option<&str> {
        self.project.as_ref().map(|project| project.name.as_str())
    }

    pub fn export_html(&self) -> ExportArtifact {
        export_single_file(&self.bundle, self.export_name())
    }

    /// Build the three-file archive; a failure becomes a notice.
    pub fn export_archive(&mut self) -> Option<ExportArtifact> {
        match export_archive(&self.bundle, self.export_name()) {
            Ok(artifact) => Some(artifact),
            Err(err) => {
                tracing::error!("Failed to build export archive: {}", err);
                self.notify(Notice::error(format!("Export failed: {}", err)));
                None
            }
        }
    }

    /// Replace the buffers with a template.
    ///
    /// # Returns
    /// `false` (with a notice) when `id` is unknown.
    pub fn apply_template(&mut self, id: &str) -> bool {
        match templates::find(id) {
            Some(template) => {
                self.replace_bundle(template.bundle());
                true
            }
            None => {
                self.notify(Notice::error(format!("Unknown template '{}'", id)));
                false
            }
        }
    }

    /// Start over from the default template with no open project.
    pub fn new_project(&mut self) {
        self.project = None;
        self.replace_bundle(templates::default_bundle());
    }

    /// Install a historic version's sources. The project itself is unchanged
    /// until the next save.
    pub fn restore_version(&mut self, version: &ProjectVersion) {
        self.replace_bundle(version.bundle.clone());
        self.notify(Notice::success(format!(
            "Restored version {}",
            version.version_number
        )));
    }

    /// Save the buffers remotely.
    ///
    /// The open project is updated when the signed-in account owns it;
    /// otherwise a new project is created for the account (or anonymously).
    ///
    /// # Arguments
    /// - `store`: Remote project store.
    /// - `name`: Project name; blank falls back to the untitled name.
    /// - `visibility`: Requested visibility. Private requires a signed-in account.
    ///
    /// # Returns
    /// The saved record, or `None` after queueing an error notice.
    pub fn save_remote(
        &mut self,
        store: &dyn RemoteStore,
        name: Option<String>,
        visibility: Visibility,
    ) -> Option<ProjectRecord> {
        let account = self.account();
        if visibility == Visibility::Private && account.is_none() {
            self.notify(Notice::error("You need to sign in to save private projects"));
            return None;
        }

        let mut record = ProjectRecord::new(name, self.bundle.clone(), visibility, account);
        if self.is_owner() {
            record.id = self.project.as_ref().map(|project| project.id.clone());
        }

        match store.save(record) {
            Ok(saved) => {
                self.install_project(&saved);
                self.notify(Notice::success("Project saved"));
                Some(saved)
            }
            Err(err) => {
                tracing::warn!("Failed to save project: {}", err);
                self.notify(Notice::error(format!("Failed to save project: {}", err)));
                None
            }
        }
    }

    fn install_project(&mut self, record: &ProjectRecord) {
        self.project = record.id.clone().map(|id| CurrentProject {
            id,
            name: record.name.clone(),
            visibility: record.visibility,
            owner: record.owner.clone(),
        });
    }

    /// Open a stored project, replacing the buffers.
    ///
    /// Concurrent loads are not sequenced: whichever call completes last wins.
    pub fn load_project(&mut self, store: &dyn RemoteStore, id: &str) -> bool {
        match store.get(id) {
            Ok(Some(record)) => {
                self.install_project(&record);
                self.replace_bundle(record.bundle);
                true
            }
            Ok(None) => {
                self.notify(Notice::error("Project not found"));
                false
            }
            Err(err) => {
                tracing::warn!("Failed to load project {}: {}", id, err);
                self.notify(Notice::error(format!("Failed to load project: {}", err)));
                false
            }
        }
    }

    /// Delete a stored project. Buffers are kept even when it was open.
    pub fn delete_project(&mut self, store: &dyn RemoteStore, id: &str) -> bool {
        match store.delete(id) {
            Ok(()) => {
                if self.project.as_ref().is_some_and(|project| project.id == id) {
                    self.project = None;
                }
                self.notify(Notice::success("Project deleted"));
                true
            }
            Err(err) => {
                tracing::warn!("Failed to delete project {}: {}", id, err);
                self.notify(Notice::error(format!("Failed to delete project: {}", err)));
                false
            }
        }
    }
}

fn shared_link_message(err: &DecodeError) -> String {
    format!("The shared link could not be read ({}); starting empty", err)
}
