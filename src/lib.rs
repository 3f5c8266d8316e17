//! ocimirror
//! ==========
//!
//! Mirror container images between registries using a local container engine.
//!
//! ```text
//! images ─▶ validate ─▶ [pull ─▶ tag ─▶ push ─▶ inspect] × N ─▶ report
//! ```

pub mod action;
pub mod batch;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod mirror;
pub mod report;

mod digest;

pub use batch::BatchReport;
pub use config::Config;
pub use descriptor::ImageDescriptor;
pub use digest::Digest;
pub use mirror::ImageOutcome;

use engine::{Engine, Runner};
use report::{RunStatus, StepOutput};

/// Validate the requested images, mirror them all, and publish the result
///
/// An error is returned only when the image list cannot be loaded
/// or the outputs cannot be written. Failures of individual images are
/// reported through [RunStatus::Failed].
pub fn run<R: Runner, O: StepOutput>(
    config: &Config,
    engine: &Engine<R>,
    output: &mut O,
) -> error::Result<RunStatus> {
    let images = config.images_input()?.load()?;
    log::info!("Mirroring {} image(s) with {}", images.len(), engine.program());
    let report = batch::mirror_all(engine, &images);
    report::publish(&report, output)
}
