use self::clipboard::SystemClipboard;
use self::commands::*;
use self::http::{BlockingTransport, Transport};
use self::identity::{DeviceCodeClient, SessionStore};
use self::prelude::*;
use chrono::Local;
use clap::Parser;
use std::{env, io, path::PathBuf};

mod activity;
mod api;
mod clipboard;
mod commands;
mod config;
mod environment;
mod feedback;
mod forms;
mod http;
mod identity;
mod prelude;
mod utils;

#[cfg(test)]
mod testing;

/// Azure disk snapshots, from the terminal
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path to the configuration file; when not given, `config.yaml` is
    /// loaded if it exists
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend's URL; overrides configuration and the SNAPSHOT_MANAGER_URL
    /// variable
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Signs in to the identity provider
    SignIn,

    /// Signs out of the identity provider, forgetting the session
    SignOut,

    /// Asks the backend to log into Azure and shows the device code it
    /// reported
    Login,

    /// Checks whether the backend is up
    Health,

    /// Validates configuration file and backend's reachability
    CheckConfig,

    /// Creates a snapshot of given disk
    Create(CreateArgs),

    /// Deletes a snapshot
    Delete(SnapshotArgs),

    /// Checks whether given snapshot exists
    Validate(SnapshotArgs),

    /// Lists snapshots older than given number of days
    ListByAge(ListByAgeArgs),

    /// Starts an interactive session (default)
    Shell,
}

#[derive(Debug, clap::Args)]
struct SnapshotArgs {
    #[arg(long)]
    resource_group: Option<String>,

    #[arg(long)]
    snapshot_name: Option<String>,
}

impl SnapshotArgs {
    fn into_form(self, kind: FormKind) -> Form {
        let mut form = Form::new(kind);

        fill(
            &mut form,
            [
                (Field::ResourceGroupName, self.resource_group),
                (Field::SnapshotName, self.snapshot_name),
            ],
        );

        form
    }
}

#[derive(Debug, clap::Args)]
struct CreateArgs {
    #[command(flatten)]
    snapshot: SnapshotArgs,

    /// Resource id of the disk to snapshot
    #[arg(long)]
    disk_id: Option<String>,

    #[arg(long)]
    location: Option<String>,
}

impl CreateArgs {
    fn into_form(self) -> Form {
        let mut form = self.snapshot.into_form(FormKind::Create);

        fill(
            &mut form,
            [(Field::DiskId, self.disk_id), (Field::Location, self.location)],
        );

        form
    }
}

#[derive(Debug, clap::Args)]
struct ListByAgeArgs {
    // Kept as text, so that garbage gets reported the same way as in the
    // shell
    #[arg(long)]
    days: Option<String>,
}

impl ListByAgeArgs {
    fn into_form(self) -> Form {
        let mut form = Form::new(FormKind::ListByAge);

        fill(&mut form, [(Field::Days, self.days)]);
        form
    }
}

fn fill<const N: usize>(form: &mut Form, values: [(Field, Option<String>); N]) {
    for (field, value) in values {
        if let Some(value) = value {
            form.set(field, value);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let stdout = &mut io::stdout();

    if let Some(Command::CheckConfig) = &args.cmd {
        return commands::check_config(stdout, &args, var, |config| {
            Ok(Box::new(init_transport(config)?) as Box<dyn Transport>)
        });
    }

    let config = load_config(&args, var)?;
    let mut identity = init_identity(&config)?;
    let mut transport = init_transport(&config)?;
    let mut clipboard = SystemClipboard::default();
    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let mut env = Environment {
        time: || Local::now().fixed_offset(),
        stdout,
        stdin: &mut stdin,
        config: &config,
        identity: &mut identity,
        transport: &mut transport,
        clipboard: &mut clipboard,
    };

    match args.cmd.unwrap_or(Command::Shell) {
        Command::SignIn => SignIn::new(&mut env).run(),
        Command::SignOut => SignOut::new(&mut env).run(),
        Command::Login => Login::new(&mut env).waiting_for_paste().run().map(drop),
        Command::Health => Health::new(&mut env).run(),
        Command::CheckConfig => unreachable!(),
        Command::Create(args) => SubmitForm::new(&mut env, args.into_form()).run(),
        Command::Delete(args) => SubmitForm::new(&mut env, args.into_form(FormKind::Delete)).run(),
        Command::Validate(args) => {
            SubmitForm::new(&mut env, args.into_form(FormKind::Validate)).run()
        }
        Command::ListByAge(args) => SubmitForm::new(&mut env, args.into_form()).run(),
        Command::Shell => Shell::new(&mut env).run(),
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn load_config(args: &Args, var: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let config = Config::discover(args.config.as_deref())?
        .with_env(var)
        .with_backend_url(args.url.clone());

    Ok(config)
}

fn init_transport(config: &Config) -> Result<BlockingTransport> {
    BlockingTransport::new(config.backend().timeout())
}

fn init_identity(config: &Config) -> Result<DeviceCodeClient<BlockingTransport>> {
    let session_file = match config.identity().session_file() {
        Some(path) => path.to_owned(),
        None => SessionStore::default_path()?,
    };

    let store = SessionStore::new(session_file);

    log::debug!("Using session file: {}", store.path().display());

    DeviceCodeClient::new(config.identity(), init_transport(config)?, store)
        .context("Couldn't initialize identity provider")
}
