//! Adapters around the external image tools.
//!
//! The pipeline only ever talks to the [`Render`] and [`Composite`] traits;
//! the concrete types shell out to Inkscape and ImageMagick. Both tools run
//! synchronously with their output captured, so a failing invocation surfaces
//! its exit status and diagnostics in the error.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

pub use inkscape::Inkscape;
pub use magick::Magick;

mod inkscape;
mod magick;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to start {tool}")]
    FailedToStart {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {}: {output}", exit_code_message(.code))]
    Failed {
        tool: &'static str,
        code: Option<i32>,
        output: String,
    },
}

fn exit_code_message(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("error status {}", code),
        None => "unknown error status".to_owned(),
    }
}

/// Renders vector art to a PNG with a transparent background at an exact
/// pixel width.
pub trait Render {
    fn render(&self, svg: &Path, width_px: u32, png: &Path) -> Result<(), Error>;
}

/// The raster-side operations: compositing an overlay, quantizing to a legacy
/// palette, and packing frames into an ICO container.
pub trait Composite {
    fn overlay(
        &self,
        base: &Path,
        overlay: &Path,
        overlay_width_px: u32,
        out: &Path,
    ) -> Result<(), Error>;

    fn reduce_depth(&self, input: &Path, bit_depth: u8, out: &Path) -> Result<(), Error>;

    fn pack(&self, ordered_frames: &[PathBuf], out_ico: &Path) -> Result<(), Error>;
}

fn run_tool(tool: &'static str, binary: &Path, args: &[OsString]) -> Result<(), Error> {
    let output = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| Error::FailedToStart { tool, source })?;
    if output.status.success() {
        Ok(())
    } else {
        let mut combined = String::from_utf8_lossy(&output.stderr).into_owned();
        if combined.trim().is_empty() {
            combined = String::from_utf8_lossy(&output.stdout).into_owned();
        }
        Err(Error::Failed {
            tool,
            code: output.status.code(),
            output: combined.trim().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_the_exit_status_in_the_error_message() {
        let error = Error::Failed {
            tool: "convert",
            code: Some(1),
            output: "no images defined".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "convert exited with error status 1: no images defined"
        );
    }

    #[test]
    fn should_report_an_unknown_exit_status_when_there_is_no_code() {
        let error = Error::Failed {
            tool: "inkscape",
            code: None,
            output: String::new(),
        };
        assert_eq!(error.to_string(), "inkscape exited with unknown error status: ");
    }
}
