use crate::prelude::*;
use crate::utils::SnapshotTable;

/// Submits a single, already filled-in form; used by the one-shot
/// subcommands (`create`, `delete` etc.).
pub struct SubmitForm<'a, 'b> {
    env: &'a mut Environment<'b>,
    form: Form,
    activity: ActivityLog,
}

impl<'a, 'b> SubmitForm<'a, 'b> {
    pub fn new(env: &'a mut Environment<'b>, form: Form) -> Self {
        Self {
            env,
            form,
            activity: Default::default(),
        }
    }

    pub fn run(mut self) -> Result<()> {
        let kind = self.form.kind();

        match self.form.submit(self.env, &mut self.activity)? {
            Outcome::Invalid => {
                for (field, error) in self.form.errors() {
                    log::debug!("Field `{}` is invalid", field);
                    writeln!(self.env.stdout, "{} {}", "error:".red(), error)?;
                }

                bail!("Some of the fields are invalid");
            }

            Outcome::Busy => {
                bail!("The {} form is still being submitted", kind);
            }

            Outcome::Done(feedback) => {
                writeln!(self.env.stdout, "{}", feedback)?;

                if let Some(listing) = self.form.listing() {
                    write!(self.env.stdout, "{}", SnapshotTable::new(listing))?;
                }

                let now = self.env.time();

                writeln!(self.env.stdout)?;
                write!(self.env.stdout, "{}", self.activity.monitor(now))?;

                if !feedback.is_success() {
                    bail!("Couldn't submit the {} form", kind);
                }

                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::FakeClipboard;
    use crate::http::FakeTransport;
    use crate::identity::FakeIdentity;
    use crate::{assert_requests, assert_result, assert_stdout};

    fn run(form: Form, transport: &mut FakeTransport) -> (Result<()>, Vec<u8>) {
        let mut stdout = Vec::new();
        let mut stdin: &[u8] = &[];
        let config = Config::parse("backend:\n  url: http://backend.test\n");
        let mut identity = FakeIdentity::signed_in("token-1");
        let mut clipboard = FakeClipboard::default();

        let result = SubmitForm::new(
            &mut Environment::test(
                &mut stdout,
                &mut stdin,
                &config,
                &mut identity,
                transport,
                &mut clipboard,
            ),
            form,
        )
        .run();

        (result, stdout)
    }

    #[test]
    fn create() {
        let mut form = Form::new(FormKind::Create);

        form.set(Field::ResourceGroupName, "rg-1");
        form.set(Field::SnapshotName, "snap-1");
        form.set(Field::DiskId, "/disks/os");
        form.set(Field::Location, "westeurope");

        let mut transport =
            FakeTransport::default().reply(200, r#"{"message": "Snapshot created successfully."}"#);

        let (result, stdout) = run(form, &mut transport);

        result.unwrap();

        assert_stdout!(
            r#"
            <i>Creating...</i>
            <fg=32>[ OK ]</fg> Snapshot created successfully

            <b>Activity Monitor</b>
            ----------------
              <dim>00:00:00</dim> <fg=36>Snapshot created: snap-1</fg>
            "#,
            stdout
        );
    }

    #[test]
    fn create_given_missing_fields() {
        let mut form = Form::new(FormKind::Create);

        form.set(Field::SnapshotName, "snap-1");

        let mut transport = FakeTransport::default();
        let (result, stdout) = run(form, &mut transport);

        assert!(transport.requests().is_empty());

        assert_stdout!(
            r#"
            <fg=31>error:</fg> Resource Group Name is required
            <fg=31>error:</fg> Disk ID is required
            <fg=31>error:</fg> Location is required
            "#,
            stdout
        );

        assert_result!(
            r#"
            Some of the fields are invalid
            "#,
            result
        );
    }

    #[test]
    fn list_by_age() {
        let mut form = Form::new(FormKind::ListByAge);

        form.set(Field::Days, "30");

        let mut transport = FakeTransport::default().reply(
            200,
            r#"{"snapshots": [
                {"name": "snapshot1", "resourceGroup": "rg-1", "creationTime": "2024-01-01T00:00:00Z"},
                {"name": "snapshot2", "resourceGroup": "rg-2", "creationTime": "2024-02-01T00:00:00Z"}
            ]}"#,
        );

        let (result, stdout) = run(form, &mut transport);

        result.unwrap();

        assert_requests!(
            r#"
            GET http://backend.test/api/get-snapshots-by-age?days=30
            Authorization: Bearer token-1
            "#,
            transport
        );

        assert_stdout!(
            r#"
            <i>Loading...</i>
            <fg=32>[ OK ]</fg> Retrieved 2 snapshots
            <b>Snapshots older than 30 days:</b>
            +-----------+----------------+----------------------+
            | Name      | Resource Group | Created              |
            +===========+================+======================+
            | snapshot1 | rg-1           | 2024-01-01T00:00:00Z |
            +-----------+----------------+----------------------+
            | snapshot2 | rg-2           | 2024-02-01T00:00:00Z |
            +-----------+----------------+----------------------+

            <b>Activity Monitor</b>
            ----------------
              <dim>00:00:00</dim> <fg=36>Retrieved 2 snapshots older than 30 days</fg>
            "#,
            stdout
        );
    }

    #[test]
    fn list_by_age_given_no_snapshots() {
        let mut form = Form::new(FormKind::ListByAge);

        form.set(Field::Days, "7");

        let mut transport = FakeTransport::default().reply(200, r#"{"snapshots": null}"#);
        let (result, stdout) = run(form, &mut transport);

        result.unwrap();

        assert_stdout!(
            r#"
            <i>Loading...</i>
            <fg=32>[ OK ]</fg> Retrieved 0 snapshots

            <b>Activity Monitor</b>
            ----------------
              <dim>00:00:00</dim> <fg=36>Retrieved 0 snapshots older than 7 days</fg>
            "#,
            stdout
        );
    }

    #[test]
    fn delete_given_server_error() {
        let mut form = Form::new(FormKind::Delete);

        form.set(Field::ResourceGroupName, "rg-1");
        form.set(Field::SnapshotName, "snap-1");

        let mut transport =
            FakeTransport::default().reply(404, r#"{"error": "Failed to delete snapshot: not found"}"#);

        let (result, stdout) = run(form, &mut transport);

        assert_stdout!(
            r#"
            <i>Deleting...</i>
            <fg=31>[ FAILED ]</fg> Failed to delete snapshot: not found

            <b>Activity Monitor</b>
            ----------------
              <dim>00:00:00</dim> <fg=31>Error: Failed to delete snapshot: not found</fg>
            "#,
            stdout
        );

        assert_result!(
            r#"
            Couldn't submit the delete form
            "#,
            result
        );
    }
}
