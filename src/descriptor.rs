//! Requested images and their validation
//!
//! The list of images is given as JSON through exactly one of two channels,
//! inline (`images`) or via a file (`images-file`):
//!
//! ```json
//! [
//!   { "source": "docker.io/library/alpine:3.18", "destination": "ghcr.io/me/alpine:3.18", "architecture": "linux/amd64" },
//!   { "source": "docker.io/library/alpine:3.18", "destination": "ghcr.io/me/alpine:3.18-arm64", "architecture": "linux/arm64" }
//! ]
//! ```
//!
//! A single object is accepted as a list of one image.

use crate::error::*;
use serde::Deserialize;
use serde_json::Value;
use std::{fs, path::PathBuf};

/// One mirroring request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageDescriptor {
    source: String,
    destination: String,
    architecture: String,
}

impl ImageDescriptor {
    /// Create a descriptor, failing if any field is empty
    pub fn new(source: &str, destination: &str, architecture: &str) -> Result<Self> {
        Ok(ImageDescriptor {
            source: non_empty(0, "source", source)?,
            destination: non_empty(0, "destination", destination)?,
            architecture: non_empty(0, "architecture", architecture)?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Platform qualifier passed to `pull --platform`, e.g. `linux/amd64`
    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// Validate `index`-th element of the user input
    ///
    /// Fields are inspected as [Value] so that a wrongly typed field is reported
    /// as an invalid descriptor rather than a JSON syntax error.
    fn from_value(index: usize, value: &Value) -> Result<Self> {
        let field = |field: &'static str| match value.get(field) {
            Some(Value::String(s)) => non_empty(index, field, s),
            _ => Err(Error::InvalidDescriptor { index, field }),
        };
        Ok(ImageDescriptor {
            source: field("source")?,
            destination: field("destination")?,
            architecture: field("architecture")?,
        })
    }
}

fn non_empty(index: usize, field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(Error::InvalidDescriptor { index, field })
    } else {
        Ok(value.to_string())
    }
}

/// A JSON document which is either a list or a single value
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(t) => vec![t],
        }
    }
}

/// The channel through which the image list is supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagesInput {
    /// JSON given directly as `images`
    Inline(String),
    /// Path given as `images-file`
    File(PathBuf),
}

impl ImagesInput {
    /// Select the channel, requiring exactly one of them
    ///
    /// Empty or whitespace-only values are regarded as unset.
    pub fn from_channels(inline: Option<String>, file: Option<PathBuf>) -> Result<Self> {
        let inline = inline.filter(|s| !s.trim().is_empty());
        let file = file.filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty());
        match (inline, file) {
            (Some(inline), None) => Ok(ImagesInput::Inline(inline)),
            (None, Some(file)) => Ok(ImagesInput::File(file)),
            (None, None) => Err(Error::MissingInput),
            (Some(_), Some(_)) => Err(Error::ConflictingInputs),
        }
    }

    /// Read, parse and validate the image list
    pub fn load(&self) -> Result<Vec<ImageDescriptor>> {
        let values: OneOrMany<Value> = match self {
            ImagesInput::Inline(input) => {
                serde_json::from_str(input).map_err(Error::InvalidInline)?
            }
            ImagesInput::File(path) => {
                let input = fs::read_to_string(path).map_err(|source| Error::ReadImagesFile {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str(&input).map_err(|source| Error::InvalidFile {
                    path: path.clone(),
                    source,
                })?
            }
        };
        validate_all(values.into_vec())
    }
}

fn validate_all(values: Vec<Value>) -> Result<Vec<ImageDescriptor>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| ImageDescriptor::from_value(index, value))
        .collect()
}
