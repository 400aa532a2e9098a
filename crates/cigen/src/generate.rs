//! End-to-end generation: questions, render, write.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::config::{CiConfig, Platform};
use crate::prompt::Prompter;
use crate::{questions, render, summary};

/// Paths of the two files a run writes.
#[derive(Debug)]
pub struct GeneratedFiles {
    pub pipeline: PathBuf,
    pub instructions: PathBuf,
}

/// Runs the full wizard and writes the pipeline plus its instructions
/// document under `root`.
///
/// # Errors
///
/// Returns an error if the console is closed mid-wizard, if rendering
/// fails, or if the output files cannot be written.
pub fn run(prompter: &dyn Prompter, root: &Path) -> Result<GeneratedFiles> {
    let platform = questions::ask_platform(prompter)?;
    let config = questions::ask_config(prompter, platform)?;
    write_outputs(prompter, &config, root)
}

/// Renders and writes both files for an already-collected configuration.
///
/// # Errors
///
/// Returns an error if rendering fails or if the output files cannot be
/// written.
pub fn write_outputs(
    prompter: &dyn Prompter,
    config: &CiConfig,
    root: &Path,
) -> Result<GeneratedFiles> {
    let pipeline = root.join(render::pipeline_path(config.platform));
    let instructions = root.join(summary::summary_path(config.platform));

    let yaml = render::render_pipeline(config)?;
    if let Some(parent) = pipeline.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&pipeline, yaml).with_context(|| format!("writing {}", pipeline.display()))?;
    tracing::debug!(path = %pipeline.display(), "pipeline written");

    let document = summary::render_summary(config);
    fs::write(&instructions, document)
        .with_context(|| format!("writing {}", instructions.display()))?;
    tracing::debug!(path = %instructions.display(), "instructions written");

    match config.platform {
        Platform::Github => prompter.say("\nWorkflow de GitHub generado correctamente."),
        Platform::Gitlab => prompter.say("\nPipeline de GitLab generado correctamente."),
    }
    prompter.say(&format!(" - YAML: {}", pipeline.display()));
    prompter.say(&format!(" - Instrucciones: {}", instructions.display()));

    Ok(GeneratedFiles {
        pipeline,
        instructions,
    })
}
