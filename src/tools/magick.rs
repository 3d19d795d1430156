use super::{run_tool, Composite, Error};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// The ImageMagick `convert` command line.
#[derive(Debug)]
pub struct Magick {
    binary: PathBuf,
}

impl Magick {
    const TOOL: &'static str = "convert";

    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Magick {
            binary: binary.into(),
        }
    }

    pub fn from_path() -> Self {
        Self::new(Self::TOOL)
    }
}

impl Composite for Magick {
    fn overlay(
        &self,
        base: &Path,
        overlay: &Path,
        overlay_width_px: u32,
        out: &Path,
    ) -> Result<(), Error> {
        run_tool(
            Self::TOOL,
            &self.binary,
            &overlay_args(base, overlay, overlay_width_px, out),
        )
    }

    fn reduce_depth(&self, input: &Path, bit_depth: u8, out: &Path) -> Result<(), Error> {
        run_tool(
            Self::TOOL,
            &self.binary,
            &reduce_depth_args(input, bit_depth, out),
        )
    }

    fn pack(&self, ordered_frames: &[PathBuf], out_ico: &Path) -> Result<(), Error> {
        let mut args: Vec<OsString> = ordered_frames
            .iter()
            .map(|frame| frame.as_os_str().to_owned())
            .collect();
        args.push(out_ico.as_os_str().to_owned());
        run_tool(Self::TOOL, &self.binary, &args)
    }
}

// Resizes the overlay to the given width (keeping its aspect ratio) and
// composites it onto the south-east corner of the base image.
fn overlay_args(base: &Path, overlay: &Path, overlay_width_px: u32, out: &Path) -> Vec<OsString> {
    vec![
        base.as_os_str().to_owned(),
        OsString::from("null:"),
        OsString::from("("),
        overlay.as_os_str().to_owned(),
        OsString::from("-resize"),
        OsString::from(format!("{}x", overlay_width_px)),
        OsString::from(")"),
        OsString::from("-gravity"),
        OsString::from("southeast"),
        OsString::from("-layers"),
        OsString::from("composite"),
        out.as_os_str().to_owned(),
    ]
}

// Quantizes to 2^bit_depth colors and flattens transparency against black;
// the black pixels are then marked as the transparent color of the palette.
fn reduce_depth_args(input: &Path, bit_depth: u8, out: &Path) -> Vec<OsString> {
    let colors = 1u32 << bit_depth;
    vec![
        input.as_os_str().to_owned(),
        OsString::from("-background"),
        OsString::from("black"),
        OsString::from("-alpha"),
        OsString::from("off"),
        OsString::from("-transparent-color"),
        OsString::from("black"),
        OsString::from("-colors"),
        OsString::from(format!("{}", colors)),
        OsString::from("-depth"),
        OsString::from(format!("{}", bit_depth)),
        out.as_os_str().to_owned(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_composite_the_resized_overlay_onto_the_south_east_corner() {
        let args = overlay_args(
            Path::new("16px.ico"),
            Path::new("tmp.png"),
            10,
            Path::new("out.png"),
        );
        let as_strings: Vec<_> = args.iter().map(|a| a.to_string_lossy()).collect();
        assert_eq!(
            as_strings,
            vec![
                "16px.ico", "null:", "(", "tmp.png", "-resize", "10x", ")", "-gravity",
                "southeast", "-layers", "composite", "out.png",
            ]
        );
    }

    #[test]
    fn should_quantize_to_the_palette_size_for_the_bit_depth() {
        let args = reduce_depth_args(Path::new("in.png"), 4, Path::new("out.png"));
        let as_strings: Vec<_> = args.iter().map(|a| a.to_string_lossy()).collect();
        assert_eq!(
            as_strings,
            vec![
                "in.png", "-background", "black", "-alpha", "off", "-transparent-color",
                "black", "-colors", "16", "-depth", "4", "out.png",
            ]
        );
    }

    #[test]
    fn should_quantize_to_256_colors_at_8_bits() {
        let args = reduce_depth_args(Path::new("in.png"), 8, Path::new("out.png"));
        assert!(args.contains(&OsString::from("256")));
    }
}
