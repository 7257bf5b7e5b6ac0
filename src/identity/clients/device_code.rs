use crate::config::IdentityConfig;
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::identity::*;
use anyhow::{anyhow, Context};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use std::io::Write;
use std::thread;
use std::time::Duration as StdDuration;

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";
const SLOW_DOWN_STEP_SECS: u64 = 5;

/// Talks OAuth 2.0 to the identity provider: device-code grant for
/// interactive sign-ins, refresh-token grant for silent ones.
pub struct DeviceCodeClient<T> {
    client_id: Option<String>,
    authority: Option<String>,
    scope: String,
    transport: T,
    store: SessionStore,
    session: Option<IdentitySession>,
    time: fn() -> DateTime<Utc>,
    sleep: fn(StdDuration),
}

impl<T> DeviceCodeClient<T>
where
    T: Transport,
{
    pub fn new(config: &IdentityConfig, transport: T, store: SessionStore) -> anyhow::Result<Self> {
        let session = store.load()?;

        if let Some(account) = session.as_ref().and_then(|session| session.account()) {
            log::debug!("Restored session of {}", account);
        }

        Ok(Self {
            client_id: config.client_id().map(ToOwned::to_owned),
            authority: config.authority(),
            scope: config.scope(),
            transport,
            store,
            session,
            time: Utc::now,
            sleep: thread::sleep,
        })
    }

    fn client_id(&self) -> IdentityResult<String> {
        self.client_id
            .clone()
            .ok_or(IdentityError::NotConfigured("client id"))
    }

    fn endpoint(&self, name: &str) -> IdentityResult<String> {
        let authority = self
            .authority
            .as_deref()
            .ok_or(IdentityError::NotConfigured("tenant id"))?;

        Ok(format!("{}/oauth2/v2.0/{}", authority.trim_end_matches('/'), name))
    }

    fn post(&mut self, endpoint: &str, fields: &[(&str, &str)]) -> IdentityResult<String> {
        let url = self.endpoint(endpoint)?;
        let request = HttpRequest::new(HttpMethod::Post, url).with_form(fields.iter().copied());

        let response = self
            .transport
            .send(request)
            .context("Couldn't reach the identity provider")?;

        if response.is_success() {
            return Ok(response.body);
        }

        match serde_json::from_str::<ProviderErrorBody>(&response.body) {
            Ok(body) => Err(IdentityError::Provider {
                code: body.error,
                description: body.error_description,
            }),

            Err(_) => Err(IdentityError::Other(anyhow!(
                "Identity provider returned status {}",
                response.status
            ))),
        }
    }

    fn parse<R>(body: &str) -> IdentityResult<R>
    where
        R: DeserializeOwned,
    {
        serde_json::from_str(body)
            .context("Couldn't parse identity provider's response")
            .map_err(IdentityError::Other)
    }

    fn request_device_code(&mut self) -> IdentityResult<DeviceCode> {
        let client_id = self.client_id()?;
        let scope = self.scope.clone();
        let body = self.post(
            "devicecode",
            &[("client_id", client_id.as_str()), ("scope", scope.as_str())],
        )?;

        Self::parse(&body)
    }

    fn await_grant(&mut self, code: &DeviceCode) -> IdentityResult<TokenGrant> {
        let client_id = self.client_id()?;
        let deadline = (self.time)() + Duration::seconds(code.expires_in as i64);
        let mut interval = code.interval;

        loop {
            (self.sleep)(StdDuration::from_secs(interval));

            let result = self.post(
                "token",
                &[
                    ("grant_type", DEVICE_CODE_GRANT),
                    ("client_id", client_id.as_str()),
                    ("device_code", code.device_code.as_str()),
                ],
            );

            match result {
                Ok(body) => return Self::parse(&body),

                Err(err) => match err.provider_code() {
                    Some("authorization_pending") => (),
                    Some("slow_down") => interval += SLOW_DOWN_STEP_SECS,
                    _ => return Err(err),
                },
            }

            if (self.time)() >= deadline {
                return Err(IdentityError::Provider {
                    code: "expired_token".into(),
                    description: "device code expired before the sign-in was completed".into(),
                });
            }
        }
    }

    fn establish(&mut self, grant: &TokenGrant) -> IdentityResult<AuthToken> {
        let session = IdentitySession::from_grant(grant, self.session.take(), (self.time)());

        // Grant is redeemed already; it stays usable even when it can't be saved
        if let Err(err) = self.store.save(&session) {
            log::warn!("{:?}", err);
        }

        self.session = Some(session);

        Ok(AuthToken::new(grant.access_token.clone()))
    }
}

impl<T> IdentityProvider for DeviceCodeClient<T>
where
    T: Transport,
{
    fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    fn account(&self) -> Option<&str> {
        self.session.as_ref().and_then(|session| session.account())
    }

    fn sign_out(&mut self) -> IdentityResult<()> {
        self.session = None;
        self.store.clear()?;

        Ok(())
    }

    fn acquire_token_silent(&mut self) -> IdentityResult<AuthToken> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| IdentityError::InteractionRequired("nobody is signed in".into()))?;

        if let Some(token) = session.cached_token((self.time)()) {
            log::debug!("Using cached access token");
            return Ok(token);
        }

        let refresh_token = session
            .refresh_token()
            .ok_or_else(|| IdentityError::InteractionRequired("session has no refresh token".into()))?
            .to_owned();

        let client_id = self.client_id()?;
        let scope = self.scope.clone();

        log::debug!("Refreshing access token");

        let result = self.post(
            "token",
            &[
                ("grant_type", "refresh_token"),
                ("client_id", client_id.as_str()),
                ("refresh_token", refresh_token.as_str()),
                ("scope", scope.as_str()),
            ],
        );

        match result {
            Ok(body) => {
                let grant = Self::parse(&body)?;
                self.establish(&grant)
            }

            Err(err) => match err.provider_code() {
                Some("invalid_grant") | Some("interaction_required") => {
                    Err(IdentityError::InteractionRequired(err.to_string()))
                }
                _ => Err(err),
            },
        }
    }

    fn acquire_token_interactive(&mut self, prompt: &mut dyn Write) -> IdentityResult<AuthToken> {
        let code = self.request_device_code()?;

        writeln!(prompt, "{}", code.message).context("Couldn't display sign-in instructions")?;

        log::info!(
            "Waiting for code {} to be entered at {}",
            code.user_code,
            code.verification_uri
        );

        let grant = self.await_grant(&code)?;

        self.establish(&grant)
    }
}

#[cfg(test)]
impl<T> DeviceCodeClient<T> {
    pub fn test(transport: T, store: SessionStore) -> Self {
        use chrono::TimeZone;

        let session = store.load().unwrap();

        Self {
            client_id: Some("app".into()),
            authority: Some("https://idp.test/tenant".into()),
            scope: "openid offline_access".into(),
            transport,
            store,
            session,
            time: || Utc.timestamp_opt(0, 0).unwrap(),
            sleep: |_| (),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
