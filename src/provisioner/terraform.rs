use super::provisioner::{ImportAttempt, Provisioner};
use crate::context::Context;
use crate::traits::{CommandExecutor, FileSystem, Output};
use anyhow::{Context as AnyhowContext, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Local state left behind by init/import, relative to the working directory
const STATE_DIRECTORIES: [&str; 1] = [".terraform"];
const STATE_FILES: [&str; 2] = ["terraform.tfstate", "terraform.tfstate.backup"];

/// Terraform-compatible provisioner; `binary` may also be "tofu"
pub struct TerraformProvisioner {
    binary: String,
    working_dir: PathBuf,
    command: Arc<dyn CommandExecutor>,
    fs: Arc<dyn FileSystem>,
    output: Arc<dyn Output>,
}

impl TerraformProvisioner {
    pub fn new(ctx: &Context, binary: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: working_dir.into(),
            command: Arc::clone(&ctx.command),
            fs: Arc::clone(&ctx.fs),
            output: Arc::clone(&ctx.output),
        }
    }

    fn echo(&self, args: &[&str]) {
        self.output
            .command(&format!("{} {}", self.binary, args.join(" ")));
    }
}

impl Provisioner for TerraformProvisioner {
    fn get_name(&self) -> &str {
        &self.binary
    }

    fn init(&self) -> Result<()> {
        let args = ["init", "-no-color"];
        self.echo(&args);

        let code = self
            .command
            .execute_interactive(&self.binary, &args, &self.working_dir)
            .with_context(|| format!("Failed to execute {} init", self.binary))?;

        if code != 0 {
            anyhow::bail!("{} init failed with exit code {}", self.binary, code);
        }

        Ok(())
    }

    fn import(&self, address: &str, external_id: &str) -> Result<ImportAttempt> {
        let args = ["import", "-no-color", address, external_id];
        self.echo(&args);

        let output = self
            .command
            .execute(&self.binary, &args, &self.working_dir)
            .with_context(|| format!("Failed to execute {} import", self.binary))?;

        Ok(ImportAttempt {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn show_state(&self, address: &str) -> Result<String> {
        let args = ["state", "show", "-no-color", address];
        self.echo(&args);

        let output = self
            .command
            .execute(&self.binary, &args, &self.working_dir)
            .with_context(|| format!("Failed to execute {} state show", self.binary))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} state show {} failed: {}",
                self.binary,
                address,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn reset_state(&self) -> Result<()> {
        for dir in STATE_DIRECTORIES {
            let path = self.working_dir.join(dir);
            if self.fs.exists(&path) {
                self.fs.remove_dir_all(&path)?;
            }
        }

        for file in STATE_FILES {
            let path = self.working_dir.join(file);
            if self.fs.exists(&path) {
                self.fs.remove_file(&path)?;
            }
        }

        Ok(())
    }
}
