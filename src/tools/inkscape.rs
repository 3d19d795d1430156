use super::{run_tool, Error, Render};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// The Inkscape command line, used as a headless SVG rasterizer.
#[derive(Debug)]
pub struct Inkscape {
    binary: PathBuf,
}

impl Inkscape {
    const TOOL: &'static str = "inkscape";

    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Inkscape {
            binary: binary.into(),
        }
    }

    pub fn from_path() -> Self {
        Self::new(Self::TOOL)
    }
}

impl Render for Inkscape {
    fn render(&self, svg: &Path, width_px: u32, png: &Path) -> Result<(), Error> {
        run_tool(Self::TOOL, &self.binary, &render_args(svg, width_px, png))
    }
}

// The background is declared black but fully transparent, so the exported
// PNGs keep their alpha channel.
fn render_args(svg: &Path, width_px: u32, png: &Path) -> Vec<OsString> {
    let mut export_png = OsString::from("--export-png=");
    export_png.push(png);
    vec![
        OsString::from("--without-gui"),
        OsString::from("--export-background=black"),
        OsString::from("--export-background-opacity=0.0"),
        OsString::from(format!("--export-width={}", width_px)),
        export_png,
        svg.as_os_str().to_owned(),
    ]
}
