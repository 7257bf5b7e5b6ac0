use crate::prelude::*;

pub struct Health<'a, 'b> {
    env: &'a mut Environment<'b>,
}

impl<'a, 'b> Health<'a, 'b> {
    pub fn new(env: &'a mut Environment<'b>) -> Self {
        Self { env }
    }

    pub fn run(self) -> Result<()> {
        let config = self.env.config;
        let url = config.backend().url();

        writeln!(self.env.stdout, "Checking backend: {}", url)?;

        let status = self
            .env
            .backend()
            .health()
            .with_context(|| format!("Backend at {} is not healthy", url))?;

        writeln!(self.env.stdout, ".. {} ({})", "[ OK ]".green(), status)?;

        Ok(())
    }
}
