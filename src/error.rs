use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    //
    // Invalid user input
    //
    #[error("Either `images` or `images-file` must be set")]
    MissingInput,
    #[error("Only one of `images` or `images-file` can be set")]
    ConflictingInputs,
    #[error("Failed to parse `images` input as JSON: {0}")]
    InvalidInline(#[source] serde_json::Error),
    #[error("Failed to parse images file {path} as JSON: {source}")]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to read images file {path}: {source}")]
    ReadImagesFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Image #{index} has no valid `{field}`: each image requires non-empty `source`, `destination` and `architecture`")]
    InvalidDescriptor { index: usize, field: &'static str },

    //
    // Error from container engine
    //
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{}", engine_message(.program, .args, .status, .stderr))]
    EngineCommand {
        program: String,
        args: Vec<String>,
        status: Option<i32>,
        stderr: String,
    },
    #[error("Invalid digest: {0}")]
    InvalidDigest(String),
    #[error("No digest is recorded for the repository of {0}")]
    MissingRepoDigest(String),
    #[error("Unexpected output of `{command}`: {source}")]
    InvalidOutput {
        command: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("`{0}` returned empty output")]
    EmptyOutput(String),

    //
    // System error
    //
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn engine_message(program: &str, args: &[String], status: &Option<i32>, stderr: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match status {
        Some(code) => format!("`{} {}` exited with status {}", program, args.join(" "), code),
        None => format!("`{} {}` was terminated by signal", program, args.join(" ")),
    }
}
