//! Scratch workspace for intermediate artifacts.
//!
//! All pipeline stages read and write files inside a single scratch directory
//! next to the SVG sources. The directory is created up front and removed
//! again when the [`Workspace`] is dropped, on every exit path, so a failed
//! run never leaves intermediates behind.

use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create scratch directory {}", .path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no such file to move: {}", .path.display())]
    SourceMissing { path: PathBuf },
    #[error("move destination already exists: {}", .path.display())]
    DestinationExists { path: PathBuf },
    #[error("i/o error moving {}", .path.display())]
    Move {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct Workspace {
    base_dir: PathBuf,
    scratch_dir: PathBuf,
}

impl Workspace {
    const SCRATCH_DIR_NAME: &'static str = "temp";

    /// Creates the scratch directory under `base_dir`. Fails if it already
    /// exists, typically left over from a crashed earlier run.
    pub fn create(base_dir: impl Into<PathBuf>) -> Result<Workspace, Error> {
        let base_dir = base_dir.into();
        let scratch_dir = base_dir.join(Self::SCRATCH_DIR_NAME);
        fs::create_dir(&scratch_dir).map_err(|source| Error::Setup {
            path: scratch_dir.clone(),
            source,
        })?;
        Ok(Workspace {
            base_dir,
            scratch_dir,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Location of a conventionally named artifact inside the scratch
    /// directory. This is the only place that maps artifact names to paths.
    pub fn scratch_path(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.scratch_dir.join(filename)
    }

    /// Moves a file into the scratch directory, keeping only its file name.
    pub fn stage(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let dest = self.scratch_path(file_name(path)?);
        checked_rename(path, &dest)
    }

    /// Copies a file into the scratch directory, keeping the original in
    /// place and carrying over its modification time.
    pub fn retain_copy(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let dest = self.scratch_path(file_name(path)?);
        if !path.exists() {
            return Err(Error::SourceMissing {
                path: path.to_owned(),
            });
        }
        if dest.exists() {
            return Err(Error::DestinationExists { path: dest });
        }
        copy_with_times(path, &dest).map_err(|source| Error::Move {
            path: path.to_owned(),
            source,
        })
    }

    /// Moves a file by name out of the scratch directory into the base
    /// directory.
    pub fn unstage(&self, filename: impl AsRef<Path>) -> Result<(), Error> {
        let src = self.scratch_path(&filename);
        let dest = self.base_dir.join(filename);
        checked_rename(&src, &dest)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Err(error) = fs::remove_dir_all(&self.scratch_dir) {
            tracing::warn!(
                "failed to remove scratch directory {}: {}",
                self.scratch_dir.display(),
                error
            );
        }
    }
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr, Error> {
    path.file_name().ok_or_else(|| Error::SourceMissing {
        path: path.to_owned(),
    })
}

fn checked_rename(src: &Path, dest: &Path) -> Result<(), Error> {
    if !src.exists() {
        return Err(Error::SourceMissing {
            path: src.to_owned(),
        });
    }
    if dest.exists() {
        return Err(Error::DestinationExists {
            path: dest.to_owned(),
        });
    }
    fs::rename(src, dest).map_err(|source| Error::Move {
        path: src.to_owned(),
        source,
    })
}

fn copy_with_times(src: &Path, dest: &Path) -> std::io::Result<()> {
    let modified = fs::metadata(src)?.modified()?;
    fs::copy(src, dest)?;
    let dest_file = fs::File::options().write(true).open(dest)?;
    dest_file.set_modified(modified)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_and_remove_the_scratch_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let scratch = tmp.path().join("temp");
        {
            let _workspace = Workspace::create(tmp.path()).unwrap();
            assert!(scratch.is_dir());
        }
        assert!(!scratch.exists());
    }

    #[test]
    fn should_fail_if_the_scratch_directory_already_exists() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("temp")).unwrap();
        let result = Workspace::create(tmp.path());
        assert!(matches!(result, Err(Error::Setup { .. })));
    }

    #[test]
    fn should_round_trip_a_file_through_stage_and_unstage() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("icon.png");
        fs::write(&file, b"png bytes").unwrap();

        let workspace = Workspace::create(tmp.path()).unwrap();
        workspace.stage(&file).unwrap();
        assert!(!file.exists());
        assert!(workspace.scratch_path("icon.png").is_file());

        workspace.unstage("icon.png").unwrap();
        assert!(!workspace.scratch_path("icon.png").exists());
        assert_eq!(fs::read(&file).unwrap(), b"png bytes");
    }

    #[test]
    fn should_fail_to_stage_a_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = Workspace::create(tmp.path()).unwrap();
        let result = workspace.stage(tmp.path().join("not-there.png"));
        assert!(matches!(result, Err(Error::SourceMissing { .. })));
    }

    #[test]
    fn should_fail_to_stage_over_an_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("icon.png");
        fs::write(&file, b"new").unwrap();

        let workspace = Workspace::create(tmp.path()).unwrap();
        fs::write(workspace.scratch_path("icon.png"), b"old").unwrap();
        let result = workspace.stage(&file);
        assert!(matches!(result, Err(Error::DestinationExists { .. })));
        assert!(file.exists());
    }

    #[test]
    fn should_fail_to_unstage_over_an_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = Workspace::create(tmp.path()).unwrap();
        fs::write(workspace.scratch_path("icon.ico"), b"staged").unwrap();
        fs::write(tmp.path().join("icon.ico"), b"previous").unwrap();

        let result = workspace.unstage("icon.ico");
        assert!(matches!(result, Err(Error::DestinationExists { .. })));
        assert_eq!(fs::read(tmp.path().join("icon.ico")).unwrap(), b"previous");
    }

    #[test]
    fn should_keep_the_original_when_copying_into_scratch() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("icon.png");
        fs::write(&file, b"png bytes").unwrap();
        let modified = fs::metadata(&file).unwrap().modified().unwrap();

        let workspace = Workspace::create(tmp.path()).unwrap();
        workspace.retain_copy(&file).unwrap();

        assert!(file.exists());
        let copy = workspace.scratch_path("icon.png");
        assert_eq!(fs::read(&copy).unwrap(), b"png bytes");
        assert_eq!(fs::metadata(&copy).unwrap().modified().unwrap(), modified);
    }

    #[test]
    fn should_remove_the_scratch_directory_even_when_it_is_not_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let scratch = tmp.path().join("temp");
        {
            let workspace = Workspace::create(tmp.path()).unwrap();
            fs::write(workspace.scratch_path("leftover.png"), b"x").unwrap();
        }
        assert!(!scratch.exists());
    }
}
