//! Input and output protocol of GitHub Actions style CI steps
//!
//! - Inputs are passed as `INPUT_<NAME>` environment variables.
//! - Outputs are appended to the file named by `GITHUB_OUTPUT`.
//! - Failures are reported by the `::error::` workflow command on stdout.

use crate::{error::*, report::StepOutput};
use std::{
    env,
    fs::OpenOptions,
    io::{self, Write},
    path::PathBuf,
};

/// Read input `name` from `INPUT_<NAME>`
///
/// The runner keeps hyphens in input names, e.g. `INPUT_IMAGES-FILE`,
/// while shells can only export `INPUT_IMAGES_FILE`, so both are tried.
pub fn get_input(name: &str) -> Option<String> {
    let key = format!("INPUT_{}", name.to_uppercase().replace(' ', "_"));
    env::var(&key)
        .or_else(|_| env::var(key.replace('-', "_")))
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Escape message for workflow commands
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// [StepOutput] writing to `GITHUB_OUTPUT` file, or stdout if not set
#[derive(Debug, Clone, Default)]
pub struct GithubOutput {
    output_file: Option<PathBuf>,
    failed: bool,
}

impl GithubOutput {
    pub fn from_env() -> Self {
        Self::new(
            env::var_os("GITHUB_OUTPUT")
                .map(PathBuf::from)
                .filter(|p| !p.as_os_str().is_empty()),
        )
    }

    pub fn new(output_file: Option<PathBuf>) -> Self {
        GithubOutput {
            output_file,
            failed: false,
        }
    }

    /// Whether [StepOutput::set_failed] has been called
    pub fn failed(&self) -> bool {
        self.failed
    }
}

impl StepOutput for GithubOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match &self.output_file {
            Some(path) => {
                let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
                let mut f = OpenOptions::new().create(true).append(true).open(path)?;
                write!(f, "{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)?;
            }
            None => {
                let mut out = io::stdout().lock();
                writeln!(out, "{}={}", name, value)?;
            }
        }
        Ok(())
    }

    fn set_failed(&mut self, message: &str) -> Result<()> {
        self.failed = true;
        let mut out = io::stdout().lock();
        writeln!(out, "::error::{}", escape_data(message))?;
        Ok(())
    }
}
