//! The icon build pipeline.
//!
//! For every icon in the working set this renders (or composites) PNG frames
//! at the required widths, stages them in the scratch workspace, quantizes
//! the flat frames down to the legacy palette depths, and packs everything
//! into one ICO file that ends up next to the SVG sources.

use crate::{
    icons::{
        self, IconSpec, Variant, LARGE_OVERLAY_WIDTH, LARGE_WIDTH, LEGACY_WIDTHS, OVERLAY_WIDTHS,
    },
    tools::{Composite, Render},
    workspace::Workspace,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Builds all configured icons under `base_dir`.
pub fn run(base_dir: &Path, render: &impl Render, composite: &impl Composite) -> eyre::Result<()> {
    build_icons(
        base_dir,
        render,
        composite,
        &icons::ICONS,
        icons::SPECIAL_ICON,
    )
}

fn build_icons(
    base_dir: &Path,
    render: &impl Render,
    composite: &impl Composite,
    specs: &[IconSpec],
    special: &str,
) -> eyre::Result<()> {
    let builder = IconBuilder {
        render,
        composite,
        workspace: Workspace::create(base_dir)?,
    };
    builder.build(specs, special)
}

struct IconBuilder<'a, R, C> {
    render: &'a R,
    composite: &'a C,
    workspace: Workspace,
}

impl<R: Render, C: Composite> IconBuilder<'_, R, C> {
    fn build(&self, specs: &[IconSpec], special: &str) -> eyre::Result<()> {
        for spec in specs {
            tracing::info!("building icon {}", spec.name);
            if spec.name == special {
                self.build_sizes(Variant::True, spec.name, spec.needs_large)?;
                self.build_sizes(Variant::Flat, spec.name, false)?;
            } else {
                self.export_sizes(Variant::True, spec.name, spec.needs_large)?;
                self.export_sizes(Variant::Flat, spec.name, false)?;
            }
            self.reduce_depth(spec.name, 8)?;
            self.reduce_depth(spec.name, 4)?;
            self.pack_to_icon(spec.name)?;
            self.workspace.unstage(icons::ico_name(spec.name))?;
            tracing::info!("finished icon {}", spec.name);
        }
        Ok(())
    }

    /// Renders the icon's SVG at every required width and stages the frames.
    fn export_sizes(&self, variant: Variant, icon: &str, needs_large: bool) -> eyre::Result<()> {
        tracing::info!("exporting sizes for {} icon {}", variant, icon);
        let source_dir = self.workspace.base_dir().join(variant.source_dir());
        let svg = source_dir.join(format!("{}.svg", icon));
        for width in widths(needs_large) {
            let frame = source_dir.join(icons::frame_name(icon, variant, width));
            tracing::info!("rendering {}px frame", width);
            self.render.render(&svg, width, &frame)?;
            self.workspace.stage(&frame)?;
        }
        Ok(())
    }

    /// Builds the icon's frames by compositing a rendered overlay onto the
    /// checked-in base frames instead of rendering the icon directly.
    fn build_sizes(&self, variant: Variant, icon: &str, needs_large: bool) -> eyre::Result<()> {
        tracing::info!("building sizes for {} icon {}", variant, icon);
        let source_dir = self.workspace.base_dir().join(variant.source_dir());
        let master = source_dir.join("tmp.png");
        self.render
            .render(&source_dir.join("main.svg"), LARGE_WIDTH, &master)?;

        let mut pairs = OVERLAY_WIDTHS.to_vec();
        if needs_large {
            pairs.push(LARGE_OVERLAY_WIDTH);
        }
        for (main_width, overlay_width) in pairs {
            let base = source_dir.join(icons::base_frame_path(icon, main_width));
            let frame = source_dir.join(icons::frame_name(icon, variant, main_width));
            tracing::info!("merging {}px frame", main_width);
            self.composite
                .overlay(&base, &master, overlay_width, &frame)?;
            self.workspace.stage(&frame)?;
        }
        fs::remove_file(&master)?;
        Ok(())
    }

    /// Quantizes the staged flat frames at the legacy widths down to
    /// `bit_depth` bits per pixel.
    fn reduce_depth(&self, icon: &str, bit_depth: u8) -> eyre::Result<()> {
        tracing::info!("reducing {} to {} bpp", icon, bit_depth);
        for width in LEGACY_WIDTHS {
            let input = self
                .workspace
                .scratch_path(icons::frame_name(icon, Variant::Flat, width));
            let reduced = self.workspace.scratch_path(icons::reduced_frame_name(
                icon,
                Variant::Flat,
                width,
                bit_depth,
            ));
            self.composite.reduce_depth(&input, bit_depth, &reduced)?;
        }
        Ok(())
    }

    /// Packs the staged frames into `<icon>.ico` inside the scratch
    /// directory.
    fn pack_to_icon(&self, icon: &str) -> eyre::Result<()> {
        tracing::info!("packing {}", icon);
        let frames = self.frame_list(icon);
        let ico = self.workspace.scratch_path(icons::ico_name(icon));
        self.composite.pack(&frames, &ico)?;
        Ok(())
    }

    // The ICO layering convention wants the palette frames first, largest
    // width first within each depth, followed by the true-color frames from
    // 256px down. A missing large frame is skipped.
    fn frame_list(&self, icon: &str) -> Vec<PathBuf> {
        let mut frames = Vec::new();
        for bit_depth in [4, 8] {
            for width in [48, 32, 16] {
                frames.push(self.workspace.scratch_path(icons::reduced_frame_name(
                    icon,
                    Variant::Flat,
                    width,
                    bit_depth,
                )));
            }
        }
        for width in [LARGE_WIDTH, 48, 32, 16] {
            let frame = self
                .workspace
                .scratch_path(icons::frame_name(icon, Variant::True, width));
            if frame.is_file() {
                frames.push(frame);
            }
        }
        frames
    }
}

fn widths(needs_large: bool) -> Vec<u32> {
    let mut widths = LEGACY_WIDTHS.to_vec();
    if needs_large {
        widths.push(LARGE_WIDTH);
    }
    widths
}
