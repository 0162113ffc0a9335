//! Generation handoff.
//!
//! A [`Generator`] is the collaborator that turns an assembled package graph
//! into build files. [`run`] gates it on readiness and then drives its two
//! entry points in order: prepare the output area, then generate.

pub mod plan;

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::Package;

pub use plan::PlanGenerator;

/// A build-file generator.
pub trait Generator {
    /// Short name used in logs and errors.
    fn name(&self) -> &str {
        "generator"
    }

    /// Whether the generator is initialized and able to run.
    ///
    /// Must not have side effects; it is asked once per run.
    fn environment_ready(&self) -> bool;

    /// Prepare (or clear) the output area for this package's artifacts.
    fn prepare_output(&mut self, package: &Package) -> anyhow::Result<()>;

    /// Emit the build files for this package.
    fn generate(&mut self, package: &Package) -> anyhow::Result<()>;
}

/// The generator entry point a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    PrepareOutput,
    Generate,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::PrepareOutput => write!(f, "prepare-output"),
            Step::Generate => write!(f, "generate"),
        }
    }
}

/// Error from the generation pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error("{generator} is not ready")]
    #[diagnostic(
        code(ccpkg::generate::not_ready),
        help("Check that the generator is installed and its output location exists")
    )]
    EnvironmentNotReady { generator: String },

    #[error("{step} failed for package `{package}`")]
    #[diagnostic(code(ccpkg::generate::failed))]
    GenerationFailed {
        package: String,
        step: Step,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl GenerateError {
    /// The step that failed, if generation got that far.
    pub fn step(&self) -> Option<Step> {
        match self {
            GenerateError::EnvironmentNotReady { .. } => None,
            GenerateError::GenerationFailed { step, .. } => Some(*step),
        }
    }
}

/// Hand a package to a generator.
///
/// Nothing is prepared or generated unless the generator reports ready.
/// Failures are returned as-is, without retry.
pub fn run<G>(generator: &mut G, package: &Package) -> Result<(), GenerateError>
where
    G: Generator + ?Sized,
{
    if !generator.environment_ready() {
        tracing::warn!("{} is not ready, skipping `{}`", generator.name(), package.name());
        return Err(GenerateError::EnvironmentNotReady {
            generator: generator.name().to_string(),
        });
    }

    tracing::info!("Preparing output for `{}`", package.name());
    generator
        .prepare_output(package)
        .map_err(|e| failed(package, Step::PrepareOutput, e))?;

    tracing::info!("Generating `{}` with {}", package.name(), generator.name());
    generator
        .generate(package)
        .map_err(|e| failed(package, Step::Generate, e))?;

    Ok(())
}

fn failed(package: &Package, step: Step, source: anyhow::Error) -> GenerateError {
    GenerateError::GenerationFailed {
        package: package.name().to_string(),
        step,
        source: source.into(),
    }
}
