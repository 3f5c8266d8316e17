use crate::{
    engine::{Engine, Runner},
    mirror::{mirror_image, ImageOutcome},
    ImageDescriptor,
};

/// Outcomes of all requested images, in the requested order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<ImageOutcome>,
    pub success_count: usize,
    pub total_count: usize,
}

impl BatchReport {
    fn push(mut self, outcome: ImageOutcome) -> Self {
        if outcome.is_success() {
            self.success_count += 1;
        }
        self.total_count += 1;
        self.outcomes.push(outcome);
        self
    }

    pub fn failed_count(&self) -> usize {
        self.total_count - self.success_count
    }

    pub fn is_success(&self) -> bool {
        self.success_count == self.total_count
    }
}

/// Mirror every image one by one
///
/// Images are never processed concurrently since they share the tag namespace
/// of the local engine. A failed image does not stop the following ones.
pub fn mirror_all<R: Runner>(engine: &Engine<R>, images: &[ImageDescriptor]) -> BatchReport {
    let total = images.len();
    images
        .iter()
        .enumerate()
        .fold(BatchReport::default(), |report, (i, image)| {
            log::info!(
                "[{}/{}] {} -> {} ({})",
                i + 1,
                total,
                image.source(),
                image.destination(),
                image.architecture()
            );
            report.push(mirror_image(engine, image))
        })
}
