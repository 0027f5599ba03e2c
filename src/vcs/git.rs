//! git-backed revision content provider

use super::RevisionContentProvider;
use crate::error::{AppError, ConfigError, VcsError};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, trace};

/// A git work tree, accessed through the `git` binary
#[derive(Debug, Clone)]
pub struct GitRepository {
    /// Directory git commands run in
    working_dir: PathBuf,
    /// Repository root (`git rev-parse --show-toplevel`)
    root: PathBuf,
}

impl GitRepository {
    /// Open the repository containing `working_dir`
    pub fn open(working_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let working_dir = working_dir.into();

        if !working_dir.is_dir() {
            return Err(ConfigError::invalid_working_dir(&working_dir, "directory not found").into());
        }

        let output = run_git(&working_dir, &["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Err(VcsError::not_a_repository(&working_dir).into());
        }

        let root = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        debug!(root = %root.display(), "opened git repository");

        Ok(Self { working_dir, root })
    }

    /// Repository root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the repository was opened from
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn git(&self, args: &[&str]) -> Result<Output, VcsError> {
        run_git(&self.root, args)
    }

    /// Run git and require a successful exit status
    fn git_checked(&self, args: &[&str]) -> Result<Output, VcsError> {
        let output = self.git(args)?;
        if !output.status.success() {
            return Err(VcsError::command_failed(
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }
        Ok(output)
    }

    /// Object spec for a path at a revision (`rev:path`)
    fn object_spec(path: &Path, revision: &str) -> String {
        let path = path.to_string_lossy().replace('\\', "/");
        format!("{}:{}", revision, path)
    }
}

fn run_git(dir: &Path, args: &[&str]) -> Result<Output, VcsError> {
    trace!(dir = %dir.display(), ?args, "running git");
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|source| VcsError::Spawn { source })
}

impl RevisionContentProvider for GitRepository {
    fn verify_revision(&self, revision: &str) -> Result<(), VcsError> {
        let spec = format!("{}^{{commit}}", revision);
        let output = self.git(&["rev-parse", "--verify", "--quiet", &spec])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(VcsError::unknown_revision(revision))
        }
    }

    fn changed_files(&self, base: &str, head: &str) -> Result<Vec<PathBuf>, VcsError> {
        // -z emits raw NUL-separated paths instead of C-quoting non-ASCII names
        let output = self.git_checked(&[
            "diff",
            "--name-only",
            "--no-renames",
            "-z",
            base,
            head,
            "--",
        ])?;
        let files = output
            .stdout
            .split(|byte| *byte == 0)
            .filter(|path| !path.is_empty())
            .map(|path| PathBuf::from(String::from_utf8_lossy(path).into_owned()))
            .collect();
        Ok(files)
    }

    fn content(&self, path: &Path, revision: &str) -> Result<Option<String>, VcsError> {
        let spec = Self::object_spec(path, revision);

        let exists = self.git(&["cat-file", "-e", &spec])?;
        if !exists.status.success() {
            debug!(path = %path.display(), revision, "file absent at revision");
            return Ok(None);
        }

        let output = self.git_checked(&["show", &spec])?;
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
            .args(args)
            .current_dir(dir)
            .output()
            .expect("failed to run git");
        assert!(status.status.success(), "git {:?} failed", args);
    }

    /// Repository with two commits: the first adds Cargo.lock, the second
    /// changes it and adds composer.lock
    fn create_repo() -> TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        git(dir.path(), &["init", "-q"]);

        fs::write(dir.path().join("Cargo.lock"), "version = 4\n").unwrap();
        git(dir.path(), &["add", "."]);
        git(dir.path(), &["commit", "-q", "-m", "first"]);

        fs::write(dir.path().join("Cargo.lock"), "version = 4\n\n[[package]]\n").unwrap();
        fs::create_dir(dir.path().join("php")).unwrap();
        fs::write(dir.path().join("php").join("composer.lock"), "{}").unwrap();
        git(dir.path(), &["add", "."]);
        git(dir.path(), &["commit", "-q", "-m", "second"]);

        dir
    }

    #[test]
    fn test_open_missing_directory() {
        let err = GitRepository::open("/definitely/not/here").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidWorkingDir { .. })));
    }

    #[test]
    fn test_open_non_repository() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let err = GitRepository::open(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Vcs(VcsError::NotARepository { .. })));
    }

    #[test]
    fn test_verify_revision() {
        if !git_available() {
            return;
        }
        let dir = create_repo();
        let repo = GitRepository::open(dir.path()).unwrap();

        assert!(repo.verify_revision("HEAD").is_ok());
        assert!(repo.verify_revision("HEAD~1").is_ok());
        assert!(matches!(
            repo.verify_revision("no-such-branch"),
            Err(VcsError::UnknownRevision { .. })
        ));
    }

    #[test]
    fn test_changed_files() {
        if !git_available() {
            return;
        }
        let dir = create_repo();
        let repo = GitRepository::open(dir.path()).unwrap();

        let files = repo.changed_files("HEAD~1", "HEAD").unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("Cargo.lock"), PathBuf::from("php/composer.lock")]
        );
    }

    #[test]
    fn test_changed_files_non_ascii_path() {
        if !git_available() {
            return;
        }
        let dir = create_repo();
        fs::create_dir(dir.path().join("café")).unwrap();
        fs::write(dir.path().join("café").join("Cargo.lock"), "version = 4\n").unwrap();
        git(dir.path(), &["add", "."]);
        git(dir.path(), &["commit", "-q", "-m", "third"]);
        let repo = GitRepository::open(dir.path()).unwrap();

        let files = repo.changed_files("HEAD~1", "HEAD").unwrap();
        assert_eq!(files, vec![PathBuf::from("café/Cargo.lock")]);
        assert_eq!(
            crate::domain::LockFileKind::from_path(&files[0]),
            Some(crate::domain::LockFileKind::Cargo)
        );

        let content = repo.content(&files[0], "HEAD").unwrap();
        assert_eq!(content.as_deref(), Some("version = 4\n"));
    }

    #[test]
    fn test_content_at_revisions() {
        if !git_available() {
            return;
        }
        let dir = create_repo();
        let repo = GitRepository::open(dir.path()).unwrap();

        let before = repo.content(Path::new("Cargo.lock"), "HEAD~1").unwrap();
        assert_eq!(before.as_deref(), Some("version = 4\n"));

        let after = repo.content(Path::new("php/composer.lock"), "HEAD").unwrap();
        assert_eq!(after.as_deref(), Some("{}"));

        let absent = repo.content(Path::new("php/composer.lock"), "HEAD~1").unwrap();
        assert!(absent.is_none());
    }

    #[test]
    fn test_open_from_subdirectory_uses_root() {
        if !git_available() {
            return;
        }
        let dir = create_repo();
        let repo = GitRepository::open(dir.path().join("php")).unwrap();

        let content = repo.content(Path::new("Cargo.lock"), "HEAD").unwrap();
        assert!(content.is_some());
        assert!(repo.working_dir().ends_with("php"));
    }
}
