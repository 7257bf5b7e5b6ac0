use crate::api::{ApiResult, Backend};
use crate::identity::{AuthToken, IdentityError};
use crate::prelude::*;

pub const AUTHENTICATION_FAILED: &str = "Authentication failed. Please try logging in again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Some fields were invalid; nothing has been sent
    Invalid,

    /// Previous submission of this form is still in flight
    Busy,

    /// Submission went through (successfully or not)
    Done(Feedback),
}

impl Form {
    /// Validates the form and, if it's alright, sends it to the backend.
    ///
    /// Failures of the submission itself don't end up as `Err` - they are
    /// reported through the returned banner and the activity log instead;
    /// `Err` means we couldn't even write to stdout.
    pub fn submit(&mut self, env: &mut Environment<'_>, activity: &mut ActivityLog) -> Result<Outcome> {
        if self.loading {
            return Ok(Outcome::Busy);
        }

        let Some(submission) = self.validate() else {
            return Ok(Outcome::Invalid);
        };

        self.loading = true;

        let result = self.try_submit(env, activity, submission);

        self.loading = false;

        result.map(Outcome::Done)
    }

    fn try_submit(
        &mut self,
        env: &mut Environment<'_>,
        activity: &mut ActivityLog,
        submission: Submission,
    ) -> Result<Feedback> {
        writeln!(env.stdout, "{}", self.kind.progress_label().italic())?;

        let Some(token) = acquire_token(env) else {
            activity.push(format!("Error: {}", AUTHENTICATION_FAILED));
            return Ok(Feedback::danger(AUTHENTICATION_FAILED));
        };

        let result = self.send(&mut env.backend(), &token, submission, activity);

        let feedback = result.unwrap_or_else(|err| {
            log::warn!("Couldn't submit the {} form: {}", self.kind, err);

            let message = err
                .server_message()
                .unwrap_or_else(|| self.kind.default_error())
                .to_owned();

            activity.push(format!("Error: {}", message));

            Feedback::danger(message)
        });

        Ok(feedback)
    }

    fn send(
        &mut self,
        backend: &mut Backend<'_>,
        token: &AuthToken,
        submission: Submission,
        activity: &mut ActivityLog,
    ) -> ApiResult<Feedback> {
        match submission {
            Submission::Create(request) => {
                backend.create_snapshot(token, &request)?;

                activity.push(format!("Snapshot created: {}", request.snapshot_name));
                self.reset();

                Ok(Feedback::success("Snapshot created successfully"))
            }

            Submission::Delete(request) => {
                backend.delete_snapshot(token, &request)?;

                activity.push(format!("Snapshot deleted: {}", request.snapshot_name));
                self.reset();

                Ok(Feedback::success("Snapshot deleted successfully"))
            }

            Submission::Validate(request) => {
                let message = backend.validate_snapshot(token, &request)?;

                activity.push(format!("Snapshot validated: {}", request.snapshot_name));
                self.reset();

                Ok(Feedback::success(message))
            }

            Submission::ListByAge { days } => {
                let snapshots = backend.snapshots_by_age(token, days)?;
                let count = snapshots.len();

                activity.push(format!(
                    "Retrieved {} snapshots older than {} days",
                    count, days
                ));

                self.listing = Some(Listing { days, snapshots });

                Ok(Feedback::success(format!("Retrieved {} snapshots", count)))
            }
        }
    }
}

fn acquire_token(env: &mut Environment<'_>) -> Option<AuthToken> {
    match env.identity.acquire_token_silent() {
        Ok(token) => Some(token),

        Err(IdentityError::InteractionRequired(reason)) => {
            log::info!("Couldn't acquire token silently ({}), asking the user", reason);

            // The reacquired token isn't used for this submission
            if let Err(err) = env.identity.acquire_token_interactive(env.stdout) {
                log::error!("Couldn't acquire token interactively: {}", err);
            }

            None
        }

        Err(err) => {
            log::error!("Couldn't acquire token: {}", err);
            None
        }
    }
}
