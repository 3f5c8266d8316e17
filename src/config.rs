use crate::{action, descriptor::ImagesInput, engine::DEFAULT_ENGINE, error::*};
use std::path::PathBuf;

/// Settings of a mirroring run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Inline JSON list of images
    pub images: Option<String>,
    /// Path to JSON file listing images
    pub images_file: Option<PathBuf>,
    /// Container engine executable
    pub engine: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            images: None,
            images_file: None,
            engine: DEFAULT_ENGINE.to_string(),
        }
    }
}

impl Config {
    /// Load from `INPUT_*` environment variables of the CI step
    pub fn from_env() -> Self {
        Config {
            images: action::get_input("images"),
            images_file: action::get_input("images-file").map(PathBuf::from),
            engine: action::get_input("engine").unwrap_or_else(|| DEFAULT_ENGINE.to_string()),
        }
    }

    /// Replace values by those given explicitly, e.g. by command line flags
    pub fn override_with(
        self,
        images: Option<String>,
        images_file: Option<PathBuf>,
        engine: Option<String>,
    ) -> Self {
        Config {
            images: images.or(self.images),
            images_file: images_file.or(self.images_file),
            engine: engine.unwrap_or(self.engine),
        }
    }

    pub fn images_input(&self) -> Result<ImagesInput> {
        ImagesInput::from_channels(self.images.clone(), self.images_file.clone())
    }
}
