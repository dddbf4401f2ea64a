use crate::console::{DangerAction, DangerEvent, DangerStep, WorkspaceTab};
use crate::cursor_list::ListPhase;
use crate::error::Banner;
use crate::model::Business;
use crate::session::{self, Claims};

use super::fields::{EditKind, Field, fields_for};
use super::modal::{DangerFocus, Modal, ModalKind};
use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Screen {
    Businesses,
    Workspace,
}

pub(super) struct App {
    pub(super) console: Console,
    pub(super) claims: Option<Claims>,
    pub(super) screen: Screen,
    pub(super) selected: usize,
    pub(super) field: usize,
    pub(super) danger_sel: usize,
    pub(super) modal: Option<Modal>,
    pub(super) quit: bool,
}

impl App {
    pub(super) fn new(console: Console) -> Self {
        let claims = session::decode_claims(console.client().token());
        Self {
            console,
            claims,
            screen: Screen::Businesses,
            selected: 0,
            field: 0,
            danger_sel: 0,
            modal: None,
            quit: false,
        }
    }

    pub(super) fn load_initial(&mut self) {
        let _ = self.console.load_businesses();
        let _ = self.console.load_subscription_requests();
    }

    /// Businesses in display order: pinned first, then server order.
    pub(super) fn rows(&self) -> Vec<&Business> {
        let pins = self.console.pins();
        let items = self.console.businesses.items();
        let mut rows: Vec<&Business> = items.iter().filter(|b| pins.contains(&b.id)).collect();
        rows.extend(items.iter().filter(|b| !pins.contains(&b.id)));
        rows
    }

    fn selected_id(&self) -> Option<String> {
        self.rows().get(self.selected).map(|b| b.id.clone())
    }

    fn clamp_selection(&mut self) {
        let n = self.console.businesses.items().len();
        self.selected = self.selected.min(n.saturating_sub(1));
    }

    pub(super) fn move_down(&mut self) {
        match self.screen {
            Screen::Businesses => {
                self.selected += 1;
                self.clamp_selection();
            }
            Screen::Workspace => {
                let n = match self.tab() {
                    Some(WorkspaceTab::Danger) => {
                        self.danger_sel = (self.danger_sel + 1) % DangerAction::ALL.len();
                        return;
                    }
                    Some(tab) => fields_for(tab).len(),
                    None => 0,
                };
                if n > 0 {
                    self.field = (self.field + 1) % n;
                }
            }
        }
    }

    pub(super) fn move_up(&mut self) {
        match self.screen {
            Screen::Businesses => self.selected = self.selected.saturating_sub(1),
            Screen::Workspace => {
                let n = match self.tab() {
                    Some(WorkspaceTab::Danger) => {
                        let len = DangerAction::ALL.len();
                        self.danger_sel = (self.danger_sel + len - 1) % len;
                        return;
                    }
                    Some(tab) => fields_for(tab).len(),
                    None => 0,
                };
                if n > 0 {
                    self.field = (self.field + n - 1) % n;
                }
            }
        }
    }

    pub(super) fn refresh(&mut self) {
        match self.screen {
            Screen::Businesses => {
                let _ = self.console.load_businesses();
                self.clamp_selection();
            }
            Screen::Workspace => {
                let _ = self.console.load_workspace();
            }
        }
    }

    pub(super) fn load_more(&mut self) {
        match self.screen {
            Screen::Businesses => {
                if let Ok(false) = self.console.load_more_businesses() {
                    self.console.set_banner(Banner::info("No more businesses."));
                }
            }
            Screen::Workspace if self.tab() == Some(WorkspaceTab::Devices) => {
                let _ = self.console.load_more_workspace_devices();
            }
            Screen::Workspace => {}
        }
    }

    pub(super) fn toggle_pin(&mut self) {
        let id = match self.screen {
            Screen::Businesses => self.selected_id(),
            Screen::Workspace => self.console.workspace.as_ref().map(|w| w.business_id.clone()),
        };
        if let Some(id) = id
            && let Ok(pinned) = self.console.toggle_pin(&id)
        {
            let text = if pinned { "Pinned." } else { "Unpinned." };
            self.console.set_banner(Banner::info(text));
        }
    }

    pub(super) fn open_search(&mut self) {
        let current = self.console.businesses.query.search.clone();
        self.modal = Some(Modal::new(ModalKind::Search, &current));
    }

    pub(super) fn apply_search(&mut self, text: &str) {
        let mut query = self.console.businesses.query.clone();
        query.search = text.trim().to_string();
        let _ = self.console.set_business_filters(query);
        self.selected = 0;
    }

    pub(super) fn open_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let _ = self.console.open_workspace(&id);
        self.screen = Screen::Workspace;
        self.field = 0;
        self.danger_sel = 0;
    }

    pub(super) fn back(&mut self) {
        self.console.close_workspace();
        self.screen = Screen::Businesses;
        self.clamp_selection();
    }

    pub(super) fn tab(&self) -> Option<WorkspaceTab> {
        self.console.workspace.as_ref().map(|w| w.tab)
    }

    pub(super) fn switch_tab(&mut self, forward: bool) {
        let Some(ws) = self.console.workspace.as_mut() else {
            return;
        };
        ws.tab = if forward { ws.tab.next() } else { ws.tab.prev() };
        self.field = 0;
        let tab = ws.tab;
        // Secondary lists load on first visit.
        match tab {
            WorkspaceTab::Devices if ws.devices.phase() == ListPhase::Idle => {
                let _ = self.console.load_workspace_devices();
            }
            WorkspaceTab::Subscription if ws.history.phase() == ListPhase::Idle => {
                let _ = self.console.load_subscription_history();
            }
            _ => {}
        }
    }

    pub(super) fn current_field(&self) -> Option<Field> {
        let tab = self.tab()?;
        fields_for(tab).get(self.field).copied()
    }

    pub(super) fn edit_field(&mut self) {
        let Some(field) = self.current_field() else {
            return;
        };
        let Some(drafts) = self
            .console
            .workspace
            .as_mut()
            .and_then(|w| w.drafts.as_mut())
        else {
            return;
        };
        match field.edit_kind() {
            EditKind::Cycle | EditKind::Toggle => field.step(drafts),
            EditKind::Text => {
                let current = field.value(drafts);
                self.modal = Some(Modal::new(ModalKind::EditField(field), &current));
            }
        }
    }

    pub(super) fn commit_field(&mut self, field: Field, text: &str) {
        let Some(drafts) = self
            .console
            .workspace
            .as_mut()
            .and_then(|w| w.drafts.as_mut())
        else {
            return;
        };
        if let Err(msg) = field.set_text(drafts, text) {
            self.console.set_banner(Banner::error(msg));
        }
    }

    pub(super) fn save_current(&mut self) {
        if let Some(field) = self.current_field() {
            let _ = self.console.save_workspace_form(field.form());
        }
    }

    /// `d`: jump to the Danger tab, or open the flow for the selected action.
    pub(super) fn open_danger(&mut self) {
        let Some(ws) = self.console.workspace.as_mut() else {
            return;
        };
        if ws.tab != WorkspaceTab::Danger {
            ws.tab = WorkspaceTab::Danger;
            return;
        }
        let action = DangerAction::ALL[self.danger_sel % DangerAction::ALL.len()];
        match ws.danger.apply(DangerEvent::Open(action)) {
            Ok(_) => {
                self.modal = Some(Modal::new(
                    ModalKind::Danger {
                        focus: DangerFocus::ConfirmId,
                    },
                    "",
                ))
            }
            Err(err) => self.console.set_banner(Banner::error(format!("{:#}", err))),
        }
    }

    pub(super) fn danger_step(&self) -> DangerStep {
        self.console
            .workspace
            .as_ref()
            .map(|w| w.danger.step())
            .unwrap_or(DangerStep::Closed)
    }

    /// Feeds an event to the open flow and keeps the modal in sync.
    pub(super) fn danger_event(&mut self, event: DangerEvent) {
        if event == DangerEvent::Submit {
            let _ = self.console.submit_danger();
        } else if let Some(ws) = self.console.workspace.as_mut()
            && let Err(err) = ws.danger.apply(event)
        {
            let msg = crate::error::error_message(&err, "Not allowed at this step.");
            self.console.set_banner(Banner::error(msg));
        }

        if self.console.workspace.is_none() {
            // Purged: the business is gone.
            self.modal = None;
            self.screen = Screen::Businesses;
            self.clamp_selection();
        } else if self.danger_step() == DangerStep::Closed {
            self.modal = None;
        }
    }

    /// The text field the danger modal is currently typing into.
    pub(super) fn danger_text_mut(&mut self, focus: DangerFocus) -> Option<&mut String> {
        let flow = &mut self.console.workspace.as_mut()?.danger;
        match (flow.step(), focus) {
            (DangerStep::Reason, _) => Some(&mut flow.reason),
            (DangerStep::Confirm, DangerFocus::ConfirmId) => Some(&mut flow.confirm_business_id),
            (DangerStep::Confirm, DangerFocus::ConfirmText) => Some(&mut flow.confirm_text),
            _ => None,
        }
    }
}
