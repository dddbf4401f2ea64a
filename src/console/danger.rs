//! Confirmation flow for destructive business actions.
//!
//! ```text
//! Closed --Open(a)--> Impact --Next--> Reason --Submit--> (dispatch)       a != Purge
//!                                      Reason --Next----> Confirm --Submit--> (dispatch)
//! Back walks one step towards Impact (Impact -> Closed); Cancel closes from anywhere.
//! ```
//!
//! `Submit` does not move the flow: the caller closes it once the request
//! succeeds, so a failed request can be retried from the same step.

use thiserror::Error;

use crate::drafts::require_reason;
use crate::model::BusinessStatus;

use super::*;

pub const PURGE_CONFIRM_TEXT: &str = "DELETE";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DangerAction {
    Suspend,
    Archive,
    RevokeSessions,
    Purge,
}

impl DangerAction {
    pub const ALL: [DangerAction; 4] = [
        DangerAction::Suspend,
        DangerAction::Archive,
        DangerAction::RevokeSessions,
        DangerAction::Purge,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DangerAction::Suspend => "Suspend business",
            DangerAction::Archive => "Archive business",
            DangerAction::RevokeSessions => "Revoke all sessions",
            DangerAction::Purge => "Purge business data",
        }
    }

    /// What the operator is shown on the impact step.
    pub fn impact(self) -> &'static str {
        match self {
            DangerAction::Suspend => {
                "Users lose access immediately. Data is kept and the business can be reactivated."
            }
            DangerAction::Archive => {
                "The business is hidden from active lists and its subscription stops renewing."
            }
            DangerAction::RevokeSessions => {
                "Every signed-in user and device of this business is logged out."
            }
            DangerAction::Purge => {
                "All business data is permanently deleted. This cannot be undone."
            }
        }
    }

    fn action_key(self) -> &'static str {
        match self {
            DangerAction::Suspend => "suspend",
            DangerAction::Archive => "archive",
            DangerAction::RevokeSessions => "revoke-sessions",
            DangerAction::Purge => "purge",
        }
    }

    /// Only the most destructive action has the typed confirmation step.
    pub fn needs_typed_confirmation(self) -> bool {
        self == DangerAction::Purge
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DangerStep {
    Closed,
    Impact,
    Reason,
    Confirm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DangerEvent {
    Open(DangerAction),
    Next,
    Back,
    Cancel,
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot {event:?} from {step:?}")]
pub struct InvalidTransition {
    pub step: DangerStep,
    pub event: DangerEvent,
}

/// A validated request, ready to dispatch. Only a [`DangerFlow`] builds one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DangerCommand {
    action: DangerAction,
    business_id: String,
    reason: String,
    confirm_business_id: String,
    confirm_text: String,
}

impl DangerCommand {
    pub fn action(&self) -> DangerAction {
        self.action
    }

    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Typed id and text must both match exactly.
fn check_purge_confirmation(
    business_id: &str,
    confirm_business_id: &str,
    confirm_text: &str,
) -> Result<(), ValidationError> {
    if confirm_business_id != business_id || confirm_text != PURGE_CONFIRM_TEXT {
        return Err(ValidationError::confirmation_mismatch());
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DangerFlow {
    business_id: String,
    step: DangerStep,
    action: Option<DangerAction>,

    pub reason: String,
    pub confirm_business_id: String,
    pub confirm_text: String,
}

impl DangerFlow {
    pub fn new(business_id: &str) -> Self {
        Self {
            business_id: business_id.to_string(),
            step: DangerStep::Closed,
            action: None,
            reason: String::new(),
            confirm_business_id: String::new(),
            confirm_text: String::new(),
        }
    }

    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    pub fn step(&self) -> DangerStep {
        self.step
    }

    pub fn action(&self) -> Option<DangerAction> {
        self.action
    }

    pub fn is_open(&self) -> bool {
        self.step != DangerStep::Closed
    }

    /// Whether `Next` would be accepted right now.
    pub fn can_advance(&self) -> bool {
        match (self.step, self.action) {
            (DangerStep::Impact, Some(_)) => true,
            (DangerStep::Reason, Some(a)) => {
                a.needs_typed_confirmation() && !self.reason.trim().is_empty()
            }
            _ => false,
        }
    }

    /// Whether `Submit` would produce a command right now.
    pub fn can_submit(&self) -> bool {
        self.command().is_ok()
    }

    pub fn close(&mut self) {
        *self = Self::new(&self.business_id);
    }

    fn invalid(&self, event: DangerEvent) -> anyhow::Error {
        InvalidTransition {
            step: self.step,
            event,
        }
        .into()
    }

    /// Feeds one event through the transition table. `Submit` returns the
    /// command to dispatch; everything else returns `None`.
    pub fn apply(&mut self, event: DangerEvent) -> anyhow::Result<Option<DangerCommand>> {
        use DangerStep::*;

        match (self.step, event) {
            (_, DangerEvent::Cancel) if self.step != Closed => {
                self.close();
                Ok(None)
            }
            (Closed, DangerEvent::Open(action)) => {
                *self = Self::new(&self.business_id);
                self.action = Some(action);
                self.step = Impact;
                Ok(None)
            }
            (Impact, DangerEvent::Next) => {
                self.step = Reason;
                Ok(None)
            }
            (Impact, DangerEvent::Back) => {
                self.close();
                Ok(None)
            }
            (Reason, DangerEvent::Next) if self.needs_confirm() => {
                require_reason(&self.reason)?;
                self.step = Confirm;
                Ok(None)
            }
            (Reason, DangerEvent::Back) => {
                self.step = Impact;
                Ok(None)
            }
            (Reason, DangerEvent::Submit) if !self.needs_confirm() => self.command().map(Some),
            (Confirm, DangerEvent::Back) => {
                self.step = Reason;
                Ok(None)
            }
            (Confirm, DangerEvent::Submit) => self.command().map(Some),
            _ => Err(self.invalid(event)),
        }
    }

    fn needs_confirm(&self) -> bool {
        self.action
            .map(DangerAction::needs_typed_confirmation)
            .unwrap_or(false)
    }

    fn command(&self) -> anyhow::Result<DangerCommand> {
        let Some(action) = self.action else {
            return Err(self.invalid(DangerEvent::Submit));
        };
        let ready = match self.step {
            DangerStep::Reason => !action.needs_typed_confirmation(),
            DangerStep::Confirm => true,
            _ => false,
        };
        if !ready {
            return Err(self.invalid(DangerEvent::Submit));
        }
        let reason = require_reason(&self.reason)?;
        if action.needs_typed_confirmation() {
            check_purge_confirmation(
                &self.business_id,
                &self.confirm_business_id,
                &self.confirm_text,
            )?;
        }
        Ok(DangerCommand {
            action,
            business_id: self.business_id.clone(),
            reason,
            confirm_business_id: self.confirm_business_id.clone(),
            confirm_text: self.confirm_text.clone(),
        })
    }
}

impl Console {
    /// Submits the open danger flow of the current workspace.
    ///
    /// Validation failures (bad step, missing reason, confirmation
    /// mismatch) never reach the network. On success the flow closes; a
    /// purged business also closes the workspace.
    pub fn submit_danger(&mut self) -> Result<()> {
        let Some(ws) = self.workspace.as_mut() else {
            return self.reject(ValidationError::invalid("no business is open"));
        };
        let cmd = match ws.danger.apply(DangerEvent::Submit) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => return Ok(()),
            Err(err) => {
                let res: Result<()> = Err(err);
                return self.report(res, "Action not allowed at this step.");
            }
        };
        self.run_danger(&cmd)?;

        if cmd.action == DangerAction::Purge {
            self.workspace = None;
        } else if let Some(ws) = self.workspace.as_mut() {
            ws.danger.close();
        }
        Ok(())
    }

    /// Dispatches a validated danger command.
    pub fn run_danger(&mut self, cmd: &DangerCommand) -> Result<()> {
        if cmd.action.needs_typed_confirmation()
            && let Err(e) = check_purge_confirmation(
                &cmd.business_id,
                &cmd.confirm_business_id,
                &cmd.confirm_text,
            )
        {
            return self.reject(e);
        }
        let key = ActionKey::business(cmd.action.action_key(), &cmd.business_id);
        let id = cmd.business_id.as_str();
        let reason = cmd.reason.as_str();
        match cmd.action {
            DangerAction::Suspend => self.mutate(
                &key,
                "Business suspended.",
                "Unable to suspend business.",
                |c| c.update_status(id, BusinessStatus::Suspended, reason),
            )?,
            DangerAction::Archive => self.mutate(
                &key,
                "Business archived.",
                "Unable to archive business.",
                |c| c.update_status(id, BusinessStatus::Archived, reason),
            )?,
            DangerAction::RevokeSessions => self.mutate(
                &key,
                "Sessions revoked.",
                "Unable to revoke sessions.",
                |c| c.revoke_sessions(id, reason),
            )?,
            DangerAction::Purge => self.mutate(
                &key,
                "Business purged.",
                "Unable to purge business.",
                |c| c.purge_business(id, reason, &cmd.confirm_business_id, &cmd.confirm_text),
            )?,
        }
        let _ = self.load_businesses();
        if cmd.action != DangerAction::Purge
            && let Some(ws) = &self.workspace
            && ws.business_id == cmd.business_id
        {
            let _ = self.load_workspace();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/console/danger_tests.rs"]
mod tests;
