//! Application state for the platform console.
//!
//! `Console` is passed explicitly to every front end (CLI, TUI). It owns
//! the HTTP client, the persisted-preferences capability, the action
//! tracker, the status banner and one state holder per screen. Each
//! handler reports into the banner and returns its `Result`; a failure
//! never takes the rest of the console down with it.

use anyhow::{Context, Result};

use crate::actions::{ActionKey, ActionTracker};
use crate::error::{Banner, ValidationError};
use crate::remote::RemoteClient;
use crate::store::{KeyValueStore, PinnedBusinesses, SupportNotes};

mod businesses;
mod danger;
mod queues;
mod settings_page;
mod workspace;

pub use self::businesses::BusinessPanel;
pub use self::danger::{
    DangerAction, DangerCommand, DangerEvent, DangerFlow, DangerStep, InvalidTransition,
    PURGE_CONFIRM_TEXT,
};
pub use self::queues::{QueueKind, QueuePanels};
pub use self::settings_page::{DELETE_CONFIRM_TEXT, SettingsPage};
pub use self::workspace::{WorkspaceDrafts, WorkspaceForm, WorkspaceTab, WorkspaceView};

/// An optional free-text field: blank means absent.
fn trimmed(text: &str) -> Option<String> {
    let t = text.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

pub struct Console {
    client: RemoteClient,
    kv: Box<dyn KeyValueStore>,
    page_limit: u32,

    pub actions: ActionTracker,
    banner: Option<Banner>,

    pub businesses: BusinessPanel,
    pub workspace: Option<WorkspaceView>,
    pub queues: QueuePanels,
    pub settings: SettingsPage,

    pins: PinnedBusinesses,
    notes: SupportNotes,
}

impl Console {
    /// Builds the console and hydrates pins and notes from `kv` once.
    pub fn new(client: RemoteClient, kv: Box<dyn KeyValueStore>, page_limit: u32) -> Self {
        let pins = PinnedBusinesses::hydrate(kv.as_ref());
        let notes = SupportNotes::hydrate(kv.as_ref());
        Self {
            client,
            kv,
            page_limit: page_limit.max(1),
            actions: ActionTracker::new(),
            banner: None,
            businesses: BusinessPanel::default(),
            workspace: None,
            queues: QueuePanels::default(),
            settings: SettingsPage::default(),
            pins,
            notes,
        }
    }

    pub fn client(&self) -> &RemoteClient {
        &self.client
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn set_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    pub fn pins(&self) -> &PinnedBusinesses {
        &self.pins
    }

    pub fn notes(&self) -> &SupportNotes {
        &self.notes
    }

    pub fn toggle_pin(&mut self, business_id: &str) -> Result<bool> {
        let res = self.pins.toggle(business_id, self.kv.as_mut());
        self.report(res, "Could not save pinned businesses.")
    }

    pub fn pin(&mut self, business_id: &str) -> Result<bool> {
        let res = self.pins.pin(business_id, self.kv.as_mut());
        self.report(res, "Could not save pinned businesses.")
    }

    pub fn unpin(&mut self, business_id: &str) -> Result<bool> {
        let res = self.pins.unpin(business_id, self.kv.as_mut());
        self.report(res, "Could not save pinned businesses.")
    }

    pub fn set_note(&mut self, business_id: &str, note: &str) -> Result<()> {
        let res = self.notes.set(business_id, note, self.kv.as_mut());
        self.report(res, "Could not save support note.")
    }

    /// Surfaces a failure in the banner and hands the result back.
    fn report<T>(&mut self, res: Result<T>, fallback: &str) -> Result<T> {
        if let Err(err) = &res {
            tracing::warn!(error = %format!("{:#}", err), "{}", fallback);
            self.banner = Some(Banner::from_error(err, fallback));
        }
        res
    }

    /// Records a client-side validation failure; no request is made.
    fn reject<T>(&mut self, err: ValidationError) -> Result<T> {
        tracing::info!(reason = %err.message, "rejected before sending");
        self.banner = Some(Banner::error(err.message.clone()));
        Err(err.into())
    }

    /// Runs one remote mutation under its action key and reports the
    /// outcome. The caller decides what to reload afterwards.
    fn mutate<T>(
        &mut self,
        key: &ActionKey,
        success: &str,
        fallback: &str,
        task: impl FnOnce(&RemoteClient) -> Result<T>,
    ) -> Result<T> {
        let client = &self.client;
        let res = self
            .actions
            .with_action(key, || task(client))
            .with_context(|| key.to_string());
        if res.is_ok() {
            tracing::info!(action = %key, "mutation succeeded");
            self.banner = Some(Banner::success(success));
        }
        self.report(res, fallback)
    }
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
