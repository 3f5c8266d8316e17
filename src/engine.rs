//! Invoke container engine (`docker`, `podman`) as external process

use crate::{error::*, Digest};
use std::process::{Command, Stdio};

/// Captured result of an external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if terminated by signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Run an external program and wait for its termination
///
/// This is the only place where processes are spawned,
/// and tests replace it with a scripted runner.
pub trait Runner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// [Runner] spawning real processes using [std::process::Command]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        log::debug!("exec: {} {:?}", program, args);
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;
        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

pub const DEFAULT_ENGINE: &str = "docker";

const DIGEST_FORMAT: &str = "--format={{json .RepoDigests}}";
const SIZE_FORMAT: &str = "--format={{.Size}}";

/// Subcommands of container engine used for mirroring
#[derive(Debug, Clone)]
pub struct Engine<R> {
    program: String,
    runner: R,
}

impl Engine<ProcessRunner> {
    pub fn new(program: &str) -> Self {
        Self::with_runner(program, ProcessRunner)
    }
}

impl<R: Runner> Engine<R> {
    pub fn with_runner(program: &str, runner: R) -> Self {
        Engine {
            program: program.to_string(),
            runner,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run subcommand and return its stdout, non-zero exit is an error
    fn exec(&self, args: &[&str]) -> Result<String> {
        let output = self.runner.run(&self.program, args)?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(Error::EngineCommand {
                program: self.program.clone(),
                args: args.iter().map(|s| s.to_string()).collect(),
                status: output.status,
                stderr: output.stderr,
            })
        }
    }

    /// Run `inspect` and return its trimmed single-line output
    fn inspect(&self, format: &str, image: &str) -> Result<String> {
        let args = ["inspect", format, image];
        let out = self.exec(&args)?;
        let out = out.trim();
        if out.is_empty() {
            return Err(Error::EmptyOutput(format!("{} {}", self.program, args.join(" "))));
        }
        Ok(out.to_string())
    }

    /// `pull --platform <platform> <image>`
    pub fn pull(&self, image: &str, platform: &str) -> Result<()> {
        self.exec(&["pull", "--platform", platform, image])?;
        Ok(())
    }

    /// `tag <source> <target>`
    pub fn tag(&self, source: &str, target: &str) -> Result<()> {
        self.exec(&["tag", source, target])?;
        Ok(())
    }

    /// `push <image>`
    pub fn push(&self, image: &str) -> Result<()> {
        self.exec(&["push", image])?;
        Ok(())
    }

    /// Content digest of pushed image as recorded in `RepoDigests`
    pub fn inspect_digest(&self, image: &str) -> Result<Digest> {
        let out = self.inspect(DIGEST_FORMAT, image)?;
        // Images without any repo digest are printed as `null`
        let repo_digests: Option<Vec<String>> =
            serde_json::from_str(&out).map_err(|source| Error::InvalidOutput {
                command: format!("{} inspect {} {}", self.program, DIGEST_FORMAT, image),
                source,
            })?;
        Digest::from_repo_digests(&repo_digests.unwrap_or_default(), image)
    }

    /// Image size in bytes, as printed by the engine
    pub fn inspect_size(&self, image: &str) -> Result<String> {
        self.inspect(SIZE_FORMAT, image)
    }
}
