use crate::api::Backend;
use crate::http::Transport;
use crate::prelude::*;
use crate::Args;

pub fn check_config(
    stdout: &mut dyn Write,
    args: &Args,
    var: impl Fn(&str) -> Option<String>,
    init_transport: impl FnOnce(&Config) -> Result<Box<dyn Transport>>,
) -> Result<()> {
    let config = load_config(stdout, args, var)?;

    writeln!(stdout)?;
    check_identity(stdout, &config)?;

    writeln!(stdout)?;
    let mut transport = init_transport(&config).context("Couldn't initialize HTTP client")?;

    check_backend(stdout, &config, transport.as_mut())?;

    writeln!(stdout)?;
    writeln!(stdout, "✓ Everything seems to be fine")?;

    Ok(())
}

fn load_config(
    stdout: &mut dyn Write,
    args: &Args,
    var: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    match &args.config {
        Some(path) => writeln!(stdout, "Loading configuration file: {}", path.display())?,
        None => writeln!(stdout, "Loading configuration")?,
    }

    let config = crate::load_config(args, var)?;

    writeln!(stdout, ".. [ OK ]")?;

    Ok(config)
}

fn check_identity(stdout: &mut dyn Write, config: &Config) -> Result<()> {
    writeln!(stdout, "Checking identity settings")?;

    let identity = config.identity();

    identity
        .client_id()
        .context("Missing `identity.client-id` (or the AZURE_CLIENT_ID variable)")?;

    identity
        .tenant_id()
        .context("Missing `identity.tenant-id` (or the AZURE_TENANT_ID variable)")?;

    if identity.redirect_uri().is_some() {
        writeln!(
            stdout,
            "{} `identity.redirect-uri` is not used by the device-code sign-in",
            "warn:".yellow()
        )?;
    }

    writeln!(stdout, ".. [ OK ]")?;

    Ok(())
}

fn check_backend(stdout: &mut dyn Write, config: &Config, transport: &mut dyn Transport) -> Result<()> {
    let url = config.backend().url();

    writeln!(stdout, "Connecting to backend: {}", url)?;

    let status = Backend::new(url, transport)
        .health()
        .context("Backend is not healthy")?;

    writeln!(stdout, ".. [ OK ] ({})", status)?;

    Ok(())
}
