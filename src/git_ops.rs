use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::{ImagePublishError, Result};

/// Wrapper around git2 Repository for the image-repository operations.
///
/// Provides the high-level operations the publish workflow needs: discovering
/// the repository that owns a path, staging files, committing the index, and
/// pushing the current branch.
pub struct GitRepo {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepo {
    /// Opens the git repository owning the given path.
    ///
    /// Discovers the repository from the path or its parent directories. The
    /// image repository must be a working tree, not a bare repository.
    ///
    /// # Arguments
    /// * `path` - A path inside the image repository
    ///
    /// # Returns
    /// * `Ok(GitRepo)` - Successfully opened repository wrapper
    /// * `Err` - If the path is not under git version control
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| {
            ImagePublishError::invalid_argument(format!(
                "'{}' is not inside a git repository",
                path.display()
            ))
        })?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| {
                ImagePublishError::invalid_argument(format!(
                    "'{}' resolves to a bare repository",
                    path.display()
                ))
            })?
            .to_path_buf();

        Ok(GitRepo { repo, workdir })
    }

    /// Stages a file for the next commit.
    ///
    /// # Arguments
    /// * `path` - Absolute path of a file inside the working tree
    ///
    /// # Returns
    /// * `Ok(())` - File added to the index
    /// * `Err` - If the path lies outside the working tree or the add fails
    pub fn stage(&self, path: &Path) -> Result<()> {
        let relative = path.strip_prefix(&self.workdir).map_err(|_| {
            ImagePublishError::invalid_argument(format!(
                "'{}' is outside the repository working tree",
                path.display()
            ))
        })?;

        let mut index = self.repo.index()?;
        index.add_path(relative)?;
        index.write()?;

        Ok(())
    }

    /// Commits the current index on HEAD.
    ///
    /// Uses the repository's configured signature for author and committer.
    /// The commit becomes the new HEAD; the repository's first commit has no
    /// parent.
    ///
    /// # Arguments
    /// * `message` - Commit message
    ///
    /// # Returns
    /// * `Ok(oid)` - OID of the created commit
    /// * `Err` - If the signature is missing or the commit fails
    pub fn commit(&self, message: &str) -> Result<git2::Oid> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let signature = self.repo.signature()?;

        let parent_commit = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(oid)
    }

    /// Pushes the current branch to a remote.
    ///
    /// Supports SSH authentication via keys from ~/.ssh/, the SSH agent, or
    /// the default credential helpers.
    ///
    /// # Arguments
    /// * `remote_name` - Name of the remote to push to (e.g., "origin")
    ///
    /// # Returns
    /// * `Ok(())` - Branch pushed successfully
    /// * `Err` - If push fails (network, auth, or reference error)
    pub fn push(&self, remote_name: &str) -> Result<()> {
        let head = self.repo.head()?;
        let branch = head.shorthand().ok_or_else(|| {
            ImagePublishError::remote("HEAD does not point at a branch".to_string())
        })?;
        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);

        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            ImagePublishError::remote(format!("No remote named '{}' found", remote_name))
        })?;

        let mut push_options = git2::PushOptions::new();

        // Set credentials callback for authentication
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            // SSH key authentication
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                // Try different key types in order of preference
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                // Try SSH agent as fallback
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            // Fall back to default credentials
            git2::Cred::default()
        });

        // Add a push update reference callback to catch errors during push
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                eprintln!(
                    "Warning: Could not update reference {}: {}",
                    refname, status
                );
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}",
                    refname
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        match remote.push(&[refspec.as_str()], Some(&mut push_options)) {
            Ok(_) => Ok(()),
            Err(e) => {
                // Provide more informative error message
                if e.class() == git2::ErrorClass::Net {
                    Err(ImagePublishError::remote(format!(
                        "Network error during push: {}",
                        e
                    )))
                } else if e.class() == git2::ErrorClass::Reference {
                    Err(ImagePublishError::remote(format!(
                        "Reference error during push: {}",
                        e
                    )))
                } else {
                    Err(ImagePublishError::remote(format!(
                        "Failed to push branch '{}': {}",
                        branch, e
                    )))
                }
            }
        }
    }
}
