use crate::commands::{Login, SignIn, SignOut};
use crate::prelude::*;
use crate::utils::SnapshotTable;

const HELP: &str = "\
Commands:
  create, delete, validate, get-by-age   fill in and submit a form
  sign-in, sign-out                      manage the identity session
  login, logout                          log the backend into the cloud provider
  activity                               show the activity monitor
  help                                   show this message
  quit                                   leave the shell";

/// Interactive session: one tab per form, all of them sharing the same
/// activity log.
pub struct Shell<'a, 'b> {
    env: &'a mut Environment<'b>,
    forms: Forms,
    active: FormKind,
    activity: ActivityLog,
    backend_login: BackendLogin,
}

#[derive(Clone, Debug)]
struct Forms {
    create: Form,
    delete: Form,
    validate: Form,
    list_by_age: Form,
}

impl Forms {
    fn get_mut(&mut self, kind: FormKind) -> &mut Form {
        match kind {
            FormKind::Create => &mut self.create,
            FormKind::Delete => &mut self.delete,
            FormKind::Validate => &mut self.validate,
            FormKind::ListByAge => &mut self.list_by_age,
        }
    }
}

impl Default for Forms {
    fn default() -> Self {
        Self {
            create: Form::new(FormKind::Create),
            delete: Form::new(FormKind::Delete),
            validate: Form::new(FormKind::Validate),
            list_by_age: Form::new(FormKind::ListByAge),
        }
    }
}

/// Backend's login state; it's only known locally, the backend doesn't
/// report it.
#[derive(Clone, Debug, Default)]
struct BackendLogin {
    logged_in: bool,
    device_code: Option<String>,
}

enum Flow {
    Continue,
    Quit,
    Eof,
}

impl<'a, 'b> Shell<'a, 'b> {
    pub fn new(env: &'a mut Environment<'b>) -> Self {
        Self {
            env,
            forms: Default::default(),
            active: FormKind::Create,
            activity: Default::default(),
            backend_login: Default::default(),
        }
    }

    pub fn run(mut self) -> Result<()> {
        writeln!(self.env.stdout, "{}", "Azure Snapshot Manager".bold())?;
        writeln!(self.env.stdout, "Type `help` to see available commands.")?;

        loop {
            write!(self.env.stdout, "{}> ", self.active)?;

            let flow = match self.env.read_line()? {
                Some(line) => self.dispatch(line.trim())?,
                None => Flow::Eof,
            };

            match flow {
                Flow::Continue => (),
                Flow::Quit => break,

                Flow::Eof => {
                    writeln!(self.env.stdout)?;
                    break;
                }
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, cmd: &str) -> Result<Flow> {
        log::trace!("Dispatching: {:?}", cmd);

        match cmd {
            "" => (),

            "help" => {
                writeln!(self.env.stdout, "{}", HELP)?;
            }

            "quit" | "exit" => {
                return Ok(Flow::Quit);
            }

            "sign-in" => {
                let result = SignIn::new(self.env).run();
                self.report(result)?;
            }

            "sign-out" => {
                let result = SignOut::new(self.env).run();
                self.report(result)?;
            }

            "login" => {
                self.login()?;
            }

            "logout" => {
                self.logout()?;
            }

            "activity" => {
                self.print_activity()?;
            }

            cmd => {
                if let Ok(kind) = cmd.parse() {
                    return self.open(kind);
                } else {
                    writeln!(
                        self.env.stdout,
                        "{} Unknown command `{}`, type `help` to see available commands",
                        "error:".red(),
                        cmd
                    )?;
                }
            }
        }

        Ok(Flow::Continue)
    }

    fn report(&mut self, result: Result<()>) -> Result<()> {
        if let Err(err) = result {
            writeln!(self.env.stdout, "{} {:?}", "error:".red(), err)?;
        }

        Ok(())
    }

    fn login(&mut self) -> Result<()> {
        if self.backend_login.logged_in {
            writeln!(
                self.env.stdout,
                "Already logged in, use `logout` to start over"
            )?;

            return Ok(());
        }

        match Login::new(self.env).run() {
            Ok(device_code) => {
                self.backend_login = BackendLogin {
                    logged_in: true,
                    device_code,
                };
            }

            Err(err) => {
                log::error!("Login failed: {:?}", err);
                writeln!(self.env.stdout, "{} {:?}", "error:".red(), err)?;
            }
        }

        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        if let Some(code) = self.backend_login.device_code.take() {
            log::debug!("Forgetting device code {}", code);
        }

        self.backend_login.logged_in = false;

        writeln!(self.env.stdout, "{} Logged out", "[ OK ]".green())?;

        Ok(())
    }

    fn print_activity(&mut self) -> Result<()> {
        let now = self.env.time();

        write!(self.env.stdout, "{}", self.activity.monitor(now))?;

        Ok(())
    }

    /// Switches to given tab, then fills in and submits its form.
    fn open(&mut self, kind: FormKind) -> Result<Flow> {
        if !self.env.identity.is_signed_in() {
            writeln!(
                self.env.stdout,
                "Please sign in to access the Azure Snapshot Manager features."
            )?;

            return Ok(Flow::Continue);
        }

        self.active = kind;

        if !self.fill(kind)? {
            return Ok(Flow::Eof);
        }

        self.submit(kind)?;

        Ok(Flow::Continue)
    }

    /// Asks for each field of the form, keeping the current value when the
    /// answer is blank; returns `false` if stdin got closed midway.
    fn fill(&mut self, kind: FormKind) -> Result<bool> {
        let form = self.forms.get_mut(kind);

        for &field in kind.fields() {
            let label = rule(field).label;
            let current = form.value(field);

            if current.is_empty() {
                write!(self.env.stdout, "{}: ", label)?;
            } else {
                write!(self.env.stdout, "{} [{}]: ", label, current)?;
            }

            let Some(value) = self.env.read_line()? else {
                return Ok(false);
            };

            if !value.trim().is_empty() {
                form.set(field, value);
            }
        }

        Ok(true)
    }

    fn submit(&mut self, kind: FormKind) -> Result<()> {
        let form = self.forms.get_mut(kind);

        match form.submit(self.env, &mut self.activity)? {
            Outcome::Invalid => {
                for (_, error) in form.errors() {
                    writeln!(self.env.stdout, "{} {}", "error:".red(), error)?;
                }
            }

            Outcome::Busy => {
                writeln!(
                    self.env.stdout,
                    "{}",
                    Tone::Info.paint("Still submitting, please wait")
                )?;
            }

            Outcome::Done(feedback) => {
                writeln!(self.env.stdout, "{}", feedback)?;

                if let Some(listing) = form.listing() {
                    write!(self.env.stdout, "{}", SnapshotTable::new(listing))?;
                }

                writeln!(self.env.stdout)?;
                self.print_activity()?;
            }
        }

        Ok(())
    }
}
