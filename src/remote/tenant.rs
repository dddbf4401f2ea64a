//! Tenant-side settings page endpoints.

use reqwest::Method;

use super::*;

impl RemoteClient {
    pub fn get_settings(&self) -> Result<BusinessSettings> {
        self.get_json("/settings", &[], "get settings")
    }

    pub fn put_settings(&self, settings: &BusinessSettings) -> Result<BusinessSettings> {
        self.send_json(Method::PUT, "/settings", Some(settings), "update settings")
    }

    pub fn get_tenant_business(&self) -> Result<TenantBusiness> {
        self.get_json("/business", &[], "get business")
    }

    pub fn delete_tenant_business(
        &self,
        business_id: &str,
        password: &str,
        confirm_text: &str,
    ) -> Result<()> {
        self.send_unit(
            Method::POST,
            "/business/delete",
            Some(&DeleteBusinessRequest {
                business_id,
                password,
                confirm_text,
            }),
            "delete business",
        )
    }

    pub fn list_units(&self) -> Result<Vec<Unit>> {
        self.get_json("/units", &[], "list units")
    }

    pub fn create_unit(&self, code: &str, label: &str) -> Result<Unit> {
        self.send_json(
            Method::POST,
            "/units",
            Some(&CreateUnitRequest { code, label }),
            "create unit",
        )
    }
}
