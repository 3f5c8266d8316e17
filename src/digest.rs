use crate::error::*;
use regex::Regex;
use std::fmt;

/// Digest of contents
///
/// Digest is defined in [OCI image spec](https://github.com/opencontainers/image-spec/blob/v1.0.1/descriptor.md#digests)
/// as a string satisfies following EBNF:
///
/// ```text
/// digest                ::= algorithm ":" encoded
/// algorithm             ::= algorithm-component (algorithm-separator algorithm-component)*
/// algorithm-component   ::= [a-z0-9]+
/// algorithm-separator   ::= [+._-]
/// encoded               ::= [a-zA-Z0-9=_-]+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    pub algorithm: String,
    pub encoded: String,
}

lazy_static::lazy_static! {
    static ref ALGORITHM_RE: Regex = Regex::new(r"^[a-z0-9]+([+._-][a-z0-9]+)*$").unwrap();
    static ref ENCODED_RE: Regex = Regex::new(r"^[a-zA-Z0-9=_-]+$").unwrap();
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.encoded)
    }
}

impl Digest {
    pub fn new(input: &str) -> Result<Self> {
        let mut iter = input.split(':');
        match (iter.next(), iter.next(), iter.next()) {
            (Some(algorithm), Some(encoded), None)
                if ALGORITHM_RE.is_match(algorithm) && ENCODED_RE.is_match(encoded) =>
            {
                Ok(Digest {
                    algorithm: algorithm.to_string(),
                    encoded: encoded.to_string(),
                })
            }
            _ => Err(Error::InvalidDigest(input.to_string())),
        }
    }

    /// Pick the digest recorded for the repository of `image`
    ///
    /// `repo_digests` is the `RepoDigests` list reported by the engine, e.g.
    /// `["docker.io/library/alpine@sha256:...", "ghcr.io/me/alpine@sha256:..."]`.
    /// It also contains entries for the repository the image was pulled from,
    /// which must not be mistaken for the digest of the pushed image.
    pub fn from_repo_digests(repo_digests: &[String], image: &str) -> Result<Self> {
        let repository = repository(image);
        let digest = repo_digests
            .iter()
            .filter_map(|entry| entry.trim().rsplit_once('@'))
            .find(|(repo, _digest)| *repo == repository)
            .map(|(_repo, digest)| digest)
            .ok_or_else(|| Error::MissingRepoDigest(image.to_string()))?;
        Self::new(digest)
    }
}

/// Strip tag and digest from image reference, e.g. `localhost:5000/me/alpine:3` to `localhost:5000/me/alpine`
fn repository(image: &str) -> &str {
    let image = image.split_once('@').map_or(image, |(repo, _digest)| repo);
    match image.rsplit_once(':') {
        // `:` in registry part is a port
        Some((repo, tag)) if !tag.contains('/') => repo,
        _ => image,
    }
}
