use crate::annotate::{Annotation, build_plan};
use crate::boilerplate;
use crate::config::MigrationSettings;
use crate::context::Context;
use crate::export::Export;
use crate::import::StateImporter;
use crate::provisioner::{Provisioner, TerraformProvisioner};
use crate::render::StateRenderer;
use anyhow::{Context as AnyhowContext, Result};
use std::path::PathBuf;

/// Handles the `dashboard`, `group` and `dashboards` commands.
///
/// The three shapes share one pipeline; `settings.mode` selects what is
/// taken from the export.
pub struct MigrateCommand;

impl MigrateCommand {
    /// Execute a migration with the configured provisioner binary
    pub fn execute(ctx: &Context, settings: &MigrationSettings) -> Result<()> {
        let provisioner =
            TerraformProvisioner::new(ctx, &settings.provisioner, &settings.working_dir);

        Self::run(ctx, settings, &provisioner)?;

        Ok(())
    }

    /// Run the pipeline against `provisioner` and return the written files.
    ///
    /// Local provisioner state is cleared before `init` and again once the
    /// run is over, whether it succeeded or not.
    pub fn run(
        ctx: &Context,
        settings: &MigrationSettings,
        provisioner: &dyn Provisioner,
    ) -> Result<Vec<PathBuf>> {
        Self::print_summary(ctx, settings, provisioner);

        let result = Self::migrate(ctx, settings, provisioner);
        let cleanup = provisioner
            .reset_state()
            .context("Failed to clean up local provisioner state");

        let written = match (result, cleanup) {
            (Ok(written), cleanup) => {
                cleanup?;
                written
            }
            (Err(err), Err(cleanup_err)) => {
                ctx.output.error(&format!("{:#}", cleanup_err));
                return Err(err);
            }
            (Err(err), Ok(())) => return Err(err),
        };

        ctx.output.blank();
        ctx.output.success(&format!(
            "Migration complete, {} file(s) written to {}",
            written.len(),
            settings.output_dir.display()
        ));

        Ok(written)
    }

    fn migrate(
        ctx: &Context,
        settings: &MigrationSettings,
        provisioner: &dyn Provisioner,
    ) -> Result<Vec<PathBuf>> {
        ctx.output.section("Reading export");

        let export = Export::from_file(&*ctx.fs, &settings.export_path)?;
        let plan = build_plan(
            &export,
            settings.mode,
            settings.group_name.as_deref(),
            settings.group_id.as_deref(),
        )?;
        let items = plan.items();

        if let Some(group) = &plan.group {
            ctx.output.info(&format!(
                "Dashboard group '{}'",
                group
                    .source
                    .name
                    .as_deref()
                    .unwrap_or(&group.annotation.resource_id)
            ));
        }

        let chart_count: usize = plan.dashboards.iter().map(|d| d.charts.len()).sum();
        ctx.output.info(&format!(
            "{} dashboard(s), {} chart(s)",
            plan.dashboards.len(),
            chart_count
        ));

        ctx.output.section("Preparing provisioner");

        boilerplate::write(
            &*ctx.fs,
            &settings.boilerplate_path,
            &settings.provider,
            &items,
        )?;
        ctx.output.dimmed(&format!(
            "Wrote {}",
            settings.boilerplate_path.display()
        ));

        provisioner
            .reset_state()
            .context("Failed to clear local provisioner state")?;
        provisioner.init()?;

        ctx.output.section("Importing state");

        let annotations: Vec<&Annotation> = items.iter().map(|item| item.annotation()).collect();
        StateImporter::new(provisioner, &*ctx.output, settings.max_tries)
            .import_all(&annotations)?;

        ctx.output.section("Writing configuration");

        StateRenderer::new(provisioner, &*ctx.fs, &*ctx.output)
            .write_plan(&plan, &settings.output_dir)
    }

    fn print_summary(ctx: &Context, settings: &MigrationSettings, provisioner: &dyn Provisioner) {
        ctx.output
            .section(&format!("Migrating {}", settings.mode.as_str()));
        if let Some(description) = &settings.description {
            ctx.output.dimmed(description);
        }
        ctx.output
            .key_value("Export", &settings.export_path.display().to_string());
        if let Some(name) = &settings.group_name {
            ctx.output.key_value("Group", name);
        }
        if let Some(id) = &settings.group_id {
            ctx.output.key_value("Group ID", id);
        }
        ctx.output.key_value("Provisioner", provisioner.get_name());
        ctx.output
            .key_value("Working directory", &settings.working_dir.display().to_string());
        ctx.output
            .key_value("Output directory", &settings.output_dir.display().to_string());
        ctx.output
            .key_value("Max tries", &settings.max_tries.to_string());
    }
}
