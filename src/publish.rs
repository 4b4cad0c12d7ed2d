//! The publish workflow.
//!
//! A strictly ordered, fail-fast pipeline: validate inputs, resolve the
//! caption and issue id, copy the original into the issue directory, write a
//! resized copy next to it, commit both, optionally push, and emit the
//! markdown link for the resized copy.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ImagePublishError, Result};
use crate::git_ops::GitRepo;
use crate::{issue, resize, ui};

/// Inputs for one publish invocation.
///
/// Mirrors the CLI arguments in a format suitable for calling the workflow
/// programmatically, without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    /// Path to the source image
    pub source: PathBuf,

    /// Markdown alt text; prompted for or empty when absent
    pub caption: Option<String>,

    /// Maximum width, optionally with a trailing "px" suffix
    pub max_width: String,

    /// Issue identifier; resolved from the draft document when absent
    pub issue: Option<String>,

    /// Path to the local image repository (a git working directory)
    pub image_repo: PathBuf,

    /// Whether to push the commit to the configured remote
    pub push: bool,
}

/// Publishes an image into the issue's directory of the image repository.
///
/// Creates `{image_repo}/{issue}/` if needed, copies the source image there
/// verbatim, writes a width-constrained resized copy alongside it, commits
/// both files, optionally pushes, and returns the markdown link referencing
/// the resized copy's public URL. The link is also printed to stdout.
///
/// Existing target files are never overwritten; hitting one aborts the
/// workflow. Side effects that occurred before a failure are not rolled back.
///
/// # Arguments
/// * `request` - The publish inputs
/// * `config` - Loaded configuration
///
/// # Returns
/// * `Ok(link)` - The markdown link for the resized copy
/// * `Err` - On the first failing step; no link is produced
pub fn publish(request: &PublishRequest, config: &Config) -> Result<String> {
    // Step 1: validate required inputs before any side effect
    if !request.source.is_file() {
        return Err(ImagePublishError::invalid_argument(format!(
            "source image '{}' does not exist",
            request.source.display()
        )));
    }

    if !request.image_repo.is_dir() {
        return Err(ImagePublishError::invalid_argument(format!(
            "image repository '{}' does not exist",
            request.image_repo.display()
        )));
    }

    let image_repo = request.image_repo.canonicalize()?;
    let repo = GitRepo::open(&image_repo)?;

    let width = resize::normalize_width(&request.max_width)?;
    let resized_name = resize::resized_file_name(&request.source, width)?;

    // Step 2: resolve optional inputs
    let caption = resolve_caption(request.caption.as_deref(), config)?;

    let issue_id = match &request.issue {
        Some(id) => id.clone(),
        None => issue::resolve_from_draft(&config.draft_url)?,
    };

    // Step 3: issue directory, created on first use
    let issue_dir = image_repo.join(&issue_id);
    if !issue_dir.exists() {
        fs::create_dir_all(&issue_dir)?;
    }

    // Step 4: verbatim copy of the original
    let file_name = request.source.file_name().ok_or_else(|| {
        ImagePublishError::invalid_argument(format!(
            "'{}' has no usable file name",
            request.source.display()
        ))
    })?;
    let target_original = issue_dir.join(file_name);
    if target_original.exists() {
        return Err(ImagePublishError::AlreadyExists(target_original));
    }
    fs::copy(&request.source, &target_original)?;

    // Step 5: resized copy
    let target_resized = issue_dir.join(&resized_name);
    if target_resized.exists() {
        return Err(ImagePublishError::AlreadyExists(target_resized));
    }
    resize::resize_to_width(&request.source, &target_resized, width)?;

    // Step 6: stage, commit, optionally push
    repo.stage(&target_original)?;
    repo.stage(&target_resized)?;

    let message = config.commit.message_template.replace("{issue}", &issue_id);
    repo.commit(&message)?;

    if request.push {
        repo.push(&config.commit.remote)?;
    }

    // Step 7: the markdown link for the resized copy
    let link = format!(
        "![{}]({}/{}/{})",
        caption,
        config.base_url.trim_end_matches('/'),
        issue_id,
        resized_name
    );
    println!("{}", link);

    Ok(link)
}

/// Pushes the image repository's current branch to a remote.
///
/// Pass-through to the git push capability; carries no workflow logic.
///
/// # Arguments
/// * `image_repo` - Path to the local image repository
/// * `remote` - Name of the remote to push to
pub fn push(image_repo: &Path, remote: &str) -> Result<()> {
    GitRepo::open(image_repo)?.push(remote)
}

/// Resolves the caption from the request or the terminal.
///
/// An explicit caption wins. Otherwise the user is prompted on an attended
/// terminal; in non-interactive mode (or without a terminal) the caption
/// falls back to the empty string.
fn resolve_caption(caption: Option<&str>, config: &Config) -> Result<String> {
    match caption {
        Some(text) => Ok(text.to_string()),
        None if config.behavior.non_interactive || !ui::is_interactive() => Ok(String::new()),
        None => ui::prompt_caption(),
    }
}
