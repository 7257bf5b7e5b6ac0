use crate::identity::{AuthToken, TokenGrant};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Access tokens expiring sooner than this are treated as already expired.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Everything we know about the signed-in user.
///
/// A session is created by signing in, restored from [`SessionStore`] on
/// start-up and torn down by signing out. Only the account name and the
/// refresh token outlive the process; access tokens stay in memory.
#[derive(Debug)]
pub struct IdentitySession {
    account: Option<String>,
    refresh_token: Option<SecretString>,
    access_token: Option<CachedToken>,
}

#[derive(Debug)]
struct CachedToken {
    token: SecretString,
    expires_at: DateTime<Utc>,
}

impl IdentitySession {
    /// Builds a session out of a freshly redeemed grant; `previous` provides
    /// the values the provider didn't bother to send again.
    pub fn from_grant(grant: &TokenGrant, previous: Option<IdentitySession>, now: DateTime<Utc>) -> Self {
        let (prev_account, prev_refresh_token) = previous
            .map(|session| (session.account, session.refresh_token))
            .unwrap_or_default();

        Self {
            account: grant.account().or(prev_account),
            refresh_token: grant
                .refresh_token
                .clone()
                .map(SecretString::from)
                .or(prev_refresh_token),
            access_token: Some(CachedToken {
                token: SecretString::from(grant.access_token.clone()),
                expires_at: now + Duration::seconds(grant.expires_in),
            }),
        }
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token
            .as_ref()
            .map(|token| token.expose_secret())
    }

    pub fn cached_token(&self, now: DateTime<Utc>) -> Option<AuthToken> {
        let cached = self.access_token.as_ref()?;

        if cached.expires_at - Duration::seconds(EXPIRY_SKEW_SECS) > now {
            Some(AuthToken::new(cached.token.expose_secret()))
        } else {
            None
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StoredSession {
    account: Option<String>,
    refresh_token: String,
}

/// Keeps the session on disk, so that consecutive invocations don't require
/// signing in again.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| anyhow!("Couldn't determine the cache directory - please specify `identity.session-file`"))?;

        Ok(dir.join("snapshot-manager").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<IdentitySession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let result: Result<_> = (|| {
            let code = fs::read_to_string(&self.path).context("Couldn't read file")?;
            let stored: StoredSession = serde_json::from_str(&code).context("Couldn't parse file")?;

            Ok(Some(IdentitySession {
                account: stored.account,
                refresh_token: Some(SecretString::from(stored.refresh_token)),
                access_token: None,
            }))
        })();

        result.with_context(|| format!("Couldn't load session from: {}", self.path.display()))
    }

    pub fn save(&self, session: &IdentitySession) -> Result<()> {
        let Some(refresh_token) = session.refresh_token() else {
            log::warn!("Identity provider sent no refresh token; the session won't be remembered");
            return Ok(());
        };

        let stored = StoredSession {
            account: session.account.clone(),
            refresh_token: refresh_token.to_owned(),
        };

        let result: Result<_> = (|| {
            if let Some(dir) = self.path.parent() {
                fs::create_dir_all(dir).context("Couldn't create directory")?;
            }

            let code = serde_json::to_string_pretty(&stored)?;

            open_private(&self.path)
                .context("Couldn't open file")?
                .write_all(code.as_bytes())
                .context("Couldn't write file")
        })();

        result.with_context(|| format!("Couldn't save session to: {}", self.path.display()))
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Couldn't remove session: {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// Opens the file for writing, readable by its owner only.
#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;

    // `mode()` only applies to newly created files
    file.set_permissions(fs::Permissions::from_mode(0o600))?;

    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
