//! Implementation of the `kiln apply` command.
//!
//! Responsibility: translate CLI arguments and config defaults into a
//! `Project`, hand it to the generator, and display results. No module
//! logic lives here.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, info, instrument};

use kiln_adapters::{LocalFilesystem, default_resources, resources_with_override};
use kiln_core::{
    application::{ModuleInfo, ports::ResourceStore},
    domain::{
        ConfigValue, Project,
        defaults::{PRETTIER_DEFAULT_INDENT, PROJECT_NAME, SERVER_PORT},
    },
    error::KilnError,
};

use crate::{
    cli::ApplyArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `kiln apply` command.
///
/// 1. Resolve the module slugs (fails fast on unknown slugs)
/// 2. Early-exit if `--dry-run`
/// 3. Build the project configuration
/// 4. Confirm before writing into a non-empty folder unless `--yes`
/// 5. Apply the modules in order with a progress bar
#[instrument(skip_all, fields(modules = ?args.modules))]
pub fn execute(args: ApplyArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let folder = resolve_folder(&args.folder)?;
    if folder.is_file() {
        return Err(CliError::InvalidInput {
            message: format!("{} is a file, not a project folder", folder.display()),
        });
    }

    let generator = kiln_adapters::generator(
        Arc::new(LocalFilesystem::new()),
        resources(&config),
    )?;

    let plan = generator.plan(&args.modules)?;
    show_plan(&plan, &folder, &output)?;

    if args.dry_run {
        output.info("Dry run: no files were written")?;
        return Ok(());
    }

    let mut project = build_project(&args, &config, &folder)?;

    if !args.yes && !output.is_quiet() && is_non_empty(&folder)? {
        let prompt = format!("{} is not empty. Apply anyway?", folder.display());
        if !confirm(&prompt)? {
            return Err(CliError::Cancelled);
        }
    }

    std::fs::create_dir_all(&folder)
        .with_cli_context(|| format!("failed to create {}", folder.display()))?;

    let progress = output.progress(plan.len());
    let result = generator.apply_with(&mut project, &args.modules, |slug| {
        progress.set_message(slug.to_string());
        progress.inc(1);
    });
    progress.finish_and_clear();
    let report = result?;

    info!(id = %report.id, count = report.applied.len(), "Apply completed");
    output.success(&format!(
        "Applied {} module(s) to {}",
        report.applied.len(),
        report.folder.display()
    ))?;
    for slug in &report.applied {
        output.print(&format!("  \u{2022} {slug}"))?;
    }

    Ok(())
}

fn resources(config: &AppConfig) -> Arc<dyn ResourceStore> {
    match &config.resources.dir {
        Some(dir) => resources_with_override(Some(dir.clone())),
        None => default_resources(),
    }
}

fn resolve_folder(folder: &Path) -> CliResult<PathBuf> {
    std::path::absolute(folder)
        .with_cli_context(|| format!("cannot resolve folder {}", folder.display()))
}

/// Config defaults first, then `--set`, then the dedicated flags.
fn build_project(args: &ApplyArgs, config: &AppConfig, folder: &Path) -> Result<Project, KilnError> {
    let defaults = &config.project;
    let mut builder = Project::builder().folder(folder);

    if let Some(package) = &defaults.package_name {
        builder = builder.package_name(package.as_str());
    }
    if let Some(base) = &defaults.base_name {
        builder = builder.base_name(base.as_str());
    }
    if let Some(name) = &defaults.project_name {
        builder = builder.config(PROJECT_NAME, name.as_str());
    }
    if let Some(indent) = defaults.indent {
        builder = builder.config(PRETTIER_DEFAULT_INDENT, indent);
    }
    if let Some(port) = defaults.server_port {
        builder = builder.config(SERVER_PORT, port);
    }

    for setting in &args.set {
        debug!(key = %setting.key, value = %setting.value, "Config override");
        builder = builder.config(setting.key.as_str(), ConfigValue::parse(&setting.value));
    }

    if let Some(package) = &args.package_name {
        builder = builder.package_name(package.as_str());
    }
    if let Some(base) = &args.base_name {
        builder = builder.base_name(base.as_str());
    }
    if let Some(name) = &args.project_name {
        builder = builder.config(PROJECT_NAME, name.as_str());
    }

    Ok(builder.build()?)
}

fn is_non_empty(folder: &Path) -> CliResult<bool> {
    if !folder.exists() {
        return Ok(false);
    }
    let mut entries = std::fs::read_dir(folder)
        .with_cli_context(|| format!("cannot read {}", folder.display()))?;
    Ok(entries.next().is_some())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_plan(plan: &[ModuleInfo], folder: &Path, out: &OutputManager) -> CliResult<()> {
    out.header(&format!("Applying to {}", folder.display()))?;
    let width = plan.iter().map(|m| m.slug.len()).max().unwrap_or(0);
    for module in plan {
        out.module_row(&module.slug, &module.description, width)?;
    }
    out.print("")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::IsTerminal as _;

    if !std::io::stdin().is_terminal() {
        return confirm_from_stdin(prompt);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(prompt: &str) -> CliResult<bool> {
    confirm_from_stdin(prompt)
}

fn confirm_from_stdin(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("{prompt} [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    Ok(accepts(&input))
}

fn accepts(input: &str) -> bool {
    let input = input.trim().to_ascii_lowercase();
    input.is_empty() || input == "y" || input == "yes"
}

// ── Tests ─────────────────────────────────────────────────────────────────────
