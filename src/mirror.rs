//! Mirror a single image: pull, tag, push, then inspect

use crate::{
    engine::{Engine, Runner},
    ImageDescriptor,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failed,
}

/// Result of mirroring one [ImageDescriptor]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageOutcome {
    pub source: String,
    pub destination: String,
    pub status: Status,
    /// Content digest of the pushed image, empty if unavailable
    pub digest: String,
    /// Size in bytes as reported by the engine, empty if unavailable
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageOutcome {
    fn success(image: &ImageDescriptor, digest: String, size: String) -> Self {
        ImageOutcome {
            source: image.source().to_string(),
            destination: image.destination().to_string(),
            status: Status::Success,
            digest,
            size,
            error: None,
        }
    }

    fn failed(image: &ImageDescriptor, error: String) -> Self {
        ImageOutcome {
            source: image.source().to_string(),
            destination: image.destination().to_string(),
            status: Status::Failed,
            digest: String::new(),
            size: String::new(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Steps which abort mirroring on failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Pull,
    Tag,
    Push,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Pull => write!(f, "pull"),
            Step::Tag => write!(f, "tag"),
            Step::Push => write!(f, "push"),
        }
    }
}

fn transfer<R: Runner>(engine: &Engine<R>, image: &ImageDescriptor) -> Result<(), String> {
    let fail = |step: Step| move |e: crate::error::Error| format!("{} failed: {}", step, e);
    engine
        .pull(image.source(), image.architecture())
        .map_err(fail(Step::Pull))?;
    engine
        .tag(image.source(), image.destination())
        .map_err(fail(Step::Tag))?;
    engine.push(image.destination()).map_err(fail(Step::Push))?;
    Ok(())
}

/// Mirror `image` from its source to its destination
///
/// Failures of pull, tag, or push are recorded in the returned outcome
/// and no further step is attempted. Digest and size are queried separately
/// after push, and failing to get them does not fail the image.
pub fn mirror_image<R: Runner>(engine: &Engine<R>, image: &ImageDescriptor) -> ImageOutcome {
    if let Err(e) = transfer(engine, image) {
        log::error!("{} -> {}: {}", image.source(), image.destination(), e);
        return ImageOutcome::failed(image, e);
    }

    let digest = match engine.inspect_digest(image.destination()) {
        Ok(digest) => digest.to_string(),
        Err(e) => {
            log::warn!("Cannot get digest of {}: {}", image.destination(), e);
            String::new()
        }
    };
    let size = match engine.inspect_size(image.destination()) {
        Ok(size) => size,
        Err(e) => {
            log::warn!("Cannot get size of {}: {}", image.destination(), e);
            String::new()
        }
    };
    log::info!(
        "Pushed {} (digest: {}, size: {})",
        image.destination(),
        digest,
        size
    );
    ImageOutcome::success(image, digest, size)
}
