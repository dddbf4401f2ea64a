//! The tenant-side business settings page.

use crate::error::Banner;
use crate::model::{BusinessSettings, TenantBusiness, Unit};

use super::*;

/// Typed confirmation for deleting the tenant's own business.
pub const DELETE_CONFIRM_TEXT: &str = PURGE_CONFIRM_TEXT;

#[derive(Debug, Default)]
pub struct SettingsPage {
    /// Last document the server returned.
    pub settings: Option<BusinessSettings>,
    /// Edited copy; saved as a whole.
    pub draft: Option<BusinessSettings>,
    pub business: Option<TenantBusiness>,
    pub units: Vec<Unit>,
}

impl SettingsPage {
    pub fn is_dirty(&self) -> bool {
        self.draft.is_some() && self.draft != self.settings
    }
}

impl Console {
    /// Loads settings, the business record and units. Units are optional
    /// for this page: a failure there leaves the list empty with an
    /// informational banner.
    pub fn load_settings_page(&mut self) -> Result<()> {
        let res = self.client.get_settings();
        let settings = self.report(res, "Unable to load settings.")?;
        self.settings.draft = Some(settings.clone());
        self.settings.settings = Some(settings);

        let res = self.client.get_tenant_business();
        self.settings.business = Some(self.report(res, "Unable to load business.")?);

        match self.client.list_units() {
            Ok(units) => self.settings.units = units,
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "units unavailable");
                self.settings.units.clear();
                self.set_banner(Banner::info("Units could not be loaded."));
            }
        }
        Ok(())
    }

    /// Sends the whole draft document; the server's answer becomes both
    /// the saved copy and the new draft.
    pub fn save_settings(&mut self) -> Result<()> {
        let Some(draft) = self.settings.draft.clone() else {
            return self.reject(ValidationError::invalid("settings are not loaded"));
        };
        let saved = self.mutate(
            &ActionKey::new("save", "settings", "current"),
            "Settings saved.",
            "Unable to save settings.",
            |c| c.put_settings(&draft),
        )?;
        self.settings.draft = Some(saved.clone());
        self.settings.settings = Some(saved);
        Ok(())
    }

    pub fn add_unit(&mut self, code: &str, label: &str) -> Result<Unit> {
        let (code, label) = (code.trim(), label.trim());
        if code.is_empty() || label.is_empty() {
            return self.reject(ValidationError::invalid("A unit needs a code and a label."));
        }
        let unit = self.mutate(
            &ActionKey::new("create", "unit", code),
            "Unit added.",
            "Unable to add unit.",
            |c| c.create_unit(code, label),
        )?;
        self.settings.units.push(unit.clone());
        Ok(unit)
    }

    /// Deletes the loaded tenant business. The typed id must equal the
    /// loaded business id, the password must be present and the typed
    /// text must be exactly `DELETE`; otherwise nothing is sent.
    pub fn delete_business(
        &mut self,
        typed_business_id: &str,
        password: &str,
        confirm_text: &str,
    ) -> Result<()> {
        let Some(business_id) = self.settings.business.as_ref().map(|b| b.id.clone()) else {
            return self.reject(ValidationError::invalid("business is not loaded"));
        };
        if password.is_empty() {
            return self.reject(ValidationError::password_required());
        }
        if typed_business_id != business_id || confirm_text != DELETE_CONFIRM_TEXT {
            return self.reject(ValidationError::confirmation_mismatch());
        }
        self.mutate(
            &ActionKey::business("delete", &business_id),
            "Business deleted.",
            "Unable to delete business.",
            |c| c.delete_tenant_business(&business_id, password, confirm_text),
        )?;
        self.settings = SettingsPage::default();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/console/settings_page_tests.rs"]
mod tests;
