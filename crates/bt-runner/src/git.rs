//! `Publisher` backed by the `git` command line.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use bt_compare::{PublishError, PublishStep, Publisher};

/// Runs git in `repo`, discarding its output.
pub struct GitPublisher {
    repo: PathBuf,
}

impl GitPublisher {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    fn git(&self, step: PublishStep, args: &[&str]) -> Result<(), PublishError> {
        log::debug!("git {} (in {})", args.join(" "), self.repo.display());
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.repo)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| PublishError::new(step, e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(PublishError::new(step, format!("git exited with {}", status)))
        }
    }
}

impl Publisher for GitPublisher {
    fn stage_all(&mut self) -> Result<(), PublishError> {
        self.git(PublishStep::Stage, &["add", "."])
    }

    fn commit(&mut self, message: &str) -> Result<(), PublishError> {
        self.git(PublishStep::Commit, &["commit", "-m", message])
    }

    fn tag(&mut self, name: &str) -> Result<(), PublishError> {
        self.git(PublishStep::Tag, &["tag", name])
    }

    fn push(&mut self) -> Result<(), PublishError> {
        self.git(PublishStep::Push, &["push"])
    }

    fn push_tags(&mut self) -> Result<(), PublishError> {
        self.git(PublishStep::PushTags, &["push", "--tags"])
    }
}
