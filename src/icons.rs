//! The fixed working set of icons and the file naming convention that the
//! pipeline stages use to address each other's artifacts.

use std::path::PathBuf;

/// Widths rendered for every icon.
pub const LEGACY_WIDTHS: [u32; 3] = [16, 32, 48];
/// Extra width for icons flagged as needing a large variant.
pub const LARGE_WIDTH: u32 = 256;
/// (base frame width, overlay width) pairs for the composite build path.
pub const OVERLAY_WIDTHS: [(u32, u32); 3] = [(16, 10), (32, 16), (48, 24)];
pub const LARGE_OVERLAY_WIDTH: (u32, u32) = (LARGE_WIDTH, 128);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub name: &'static str,
    pub needs_large: bool,
}

const fn icon(name: &'static str, needs_large: bool) -> IconSpec {
    IconSpec { name, needs_large }
}

/// Build order; the order has no effect on the output beyond log ordering.
pub const ICONS: [IconSpec; 10] = [
    icon("main", true),
    icon("disabled", true),
    icon("fileconnected", true),
    icon("cd5", false),
    icon("cd4", false),
    icon("cd3", false),
    icon("cd2", false),
    icon("cd1", false),
    icon("cd0", false),
    icon("ok", false),
];

/// Built by compositing a checked-in base frame with an overlay instead of
/// rendering the SVG directly.
pub const SPECIAL_ICON: &str = "fileconnected";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Variant {
    True,
    Flat,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::True => "true",
            Variant::Flat => "flat",
        }
    }

    /// Directory holding this variant's SVG sources, relative to the base
    /// directory.
    pub fn source_dir(&self) -> PathBuf {
        PathBuf::from("svg").join(self.as_str())
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn frame_name(icon: &str, variant: Variant, width: u32) -> String {
    format!("{} {} {}px.png", icon, variant, width)
}

pub fn reduced_frame_name(icon: &str, variant: Variant, width: u32, bit_depth: u8) -> String {
    format!("{} {} {}px {}bpp.png", icon, variant, width, bit_depth)
}

pub fn ico_name(icon: &str) -> String {
    format!("{}.ico", icon)
}

/// Name of the checked-in base frame for the composite build path, relative
/// to the variant's source directory.
pub fn base_frame_path(icon: &str, width: u32) -> PathBuf {
    PathBuf::from(format!("{} base", icon)).join(format!("{}px.ico", width))
}
