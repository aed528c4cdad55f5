//! Credential resolution by repository id
//!
//! - Lookup is keyed by server id, never by URL
//! - Passwords may reference environment variables (`${env.NAME}`)
//! - Passwords never appear in errors, logs or `Debug` output

use base64::Engine;

use crate::error::CredentialError;
use crate::settings::Server;

/// Username/password pair for a single request
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// `Authorization` header value: `Basic base64(username:password)`
    pub fn basic_auth_header(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Looks up credentials for a repository id
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self, repository_id: &str) -> Result<Credential, CredentialError>;
}

/// Resolver over the `servers` section of the settings file
#[derive(Debug, Clone, Default)]
pub struct ServerStore {
    servers: Vec<Server>,
    diagnostics: bool,
}

impl ServerStore {
    pub fn new(servers: Vec<Server>) -> Self {
        Self {
            servers,
            diagnostics: false,
        }
    }

    /// Log the other configured server ids and usernames when a lookup misses
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    fn log_known_servers(&self, missing: &str) {
        tracing::debug!(
            "No credentials found for {} but found {} other server(s)",
            missing,
            self.servers.len()
        );
        for server in &self.servers {
            tracing::debug!(id = %server.id, user = %server.username, "configured server");
        }
        tracing::debug!("Please verify your settings file");
    }
}

impl CredentialResolver for ServerStore {
    fn resolve(&self, repository_id: &str) -> Result<Credential, CredentialError> {
        let Some(server) = self.servers.iter().find(|s| s.id == repository_id) else {
            if self.diagnostics {
                self.log_known_servers(repository_id);
            }
            return Err(CredentialError::NotFound {
                repository_id: repository_id.to_string(),
            });
        };

        let password = match env_reference(&server.password) {
            Some(variable) => {
                std::env::var(variable).map_err(|_| CredentialError::Unresolvable {
                    repository_id: repository_id.to_string(),
                    variable: variable.to_string(),
                })?
            }
            None => server.password.clone(),
        };

        Ok(Credential::new(server.username.clone(), password))
    }
}

/// Extract `NAME` from `${env.NAME}`
fn env_reference(value: &str) -> Option<&str> {
    value
        .strip_prefix("${env.")
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}
