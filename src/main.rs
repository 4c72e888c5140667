mod annotate;
mod boilerplate;
mod commands;
mod config;
mod context;
mod error;
mod export;
mod hierarchy;
mod import;
mod naming;
mod output;
mod provisioner;
mod render;
mod traits;

use annotate::MigrationMode;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::MigrateCommand;
use config::{MigrationResource, MigrationSettings, SettingsOverrides};
use context::Context;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sfx-migrate")]
#[command(about = "Migrate SignalFx dashboards and charts from a JSON export into Terraform configuration", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to .sfx-migrate.yaml in the current directory, if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate a single dashboard and its charts
    Dashboard(MigrateArgs),

    /// Migrate a dashboard group, its dashboards and their charts
    Group(MigrateArgs),

    /// Migrate every dashboard of an export, without the dashboard group itself
    Dashboards(MigrateArgs),
}

#[derive(Args)]
struct MigrateArgs {
    /// JSON export file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Group name, used to scope resource ids and file names
    #[arg(short = 'n', long)]
    group_name: Option<String>,

    /// Live id of the dashboard group
    #[arg(long, env = "SFX_MIGRATE_GROUP_ID")]
    group_id: Option<String>,

    /// Directory to write the configuration files to (defaults to the group name, else "output")
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Directory the provisioner runs in
    #[arg(short, long)]
    working_dir: Option<PathBuf>,

    /// Scratch declaration file, relative to the working directory
    #[arg(long)]
    boilerplate: Option<PathBuf>,

    /// Import attempts per item
    #[arg(long)]
    max_tries: Option<u32>,

    /// Provisioner binary (terraform or tofu). It runs without a terminal, so provider
    /// variables must come from TF_VAR_* or a tfvars file in the working directory
    #[arg(long, env = "SFX_MIGRATE_PROVISIONER")]
    provisioner: Option<String>,
}

impl From<MigrateArgs> for SettingsOverrides {
    fn from(args: MigrateArgs) -> Self {
        Self {
            export: args.export,
            group_name: args.group_name,
            group_id: args.group_id,
            output_dir: args.output_dir,
            working_dir: args.working_dir,
            boilerplate: args.boilerplate,
            max_tries: args.max_tries,
            provisioner: args.provisioner,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::new();

    let (mode, args) = match cli.command {
        Commands::Dashboard(args) => (MigrationMode::Dashboard, args),
        Commands::Group(args) => (MigrationMode::Group, args),
        Commands::Dashboards(args) => (MigrationMode::Dashboards, args),
    };

    let resource = MigrationResource::discover(&*ctx.fs, cli.config.as_deref(), Path::new("."))?;
    let settings = MigrationSettings::resolve(mode, resource.as_ref(), args.into())?;

    MigrateCommand::execute(&ctx, &settings)
}
