use serde::Deserialize;
use std::path::{Path, PathBuf};

const AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "kebab-case")]
pub struct IdentityConfig {
    #[serde(default)]
    client_id: Option<String>,

    #[serde(default)]
    tenant_id: Option<String>,

    #[serde(default)]
    redirect_uri: Option<String>,

    #[serde(default = "default_scopes")]
    scopes: Vec<String>,

    #[serde(default)]
    session_file: Option<PathBuf>,
}

impl IdentityConfig {
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn authority(&self) -> Option<String> {
        self.tenant_id
            .as_ref()
            .map(|tenant| format!("{}/{}", AUTHORITY_HOST, tenant))
    }

    /// Space-separated scopes to request; `offline_access` is always
    /// included, since silent sign-ins depend on the refresh token.
    pub fn scope(&self) -> String {
        let mut scopes = self.scopes.clone();

        if !scopes.iter().any(|scope| scope == "offline_access") {
            scopes.push("offline_access".into());
        }

        scopes.join(" ")
    }

    pub fn session_file(&self) -> Option<&Path> {
        self.session_file.as_deref()
    }

    pub(super) fn apply_env(&mut self, var: &impl Fn(&str) -> Option<String>) {
        let var = |name: &str| var(name).filter(|value: &String| !value.is_empty());

        if let Some(client_id) = var("AZURE_CLIENT_ID") {
            self.client_id = Some(client_id);
        }

        if let Some(tenant_id) = var("AZURE_TENANT_ID") {
            self.tenant_id = Some(tenant_id);
        }

        if let Some(redirect_uri) = var("AZURE_REDIRECT_URI") {
            self.redirect_uri = Some(redirect_uri);
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            tenant_id: None,
            redirect_uri: None,
            scopes: default_scopes(),
            session_file: None,
        }
    }
}

fn default_scopes() -> Vec<String> {
    vec![
        "openid".into(),
        "profile".into(),
        "User.Read".into(),
        "https://management.azure.com/user_impersonation".into(),
    ]
}
