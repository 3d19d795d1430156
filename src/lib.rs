//! Build-time tool that turns the project's SVG icon sources into
//! multi-resolution Windows ICO files using Inkscape and ImageMagick.

pub mod cli;
pub mod icons;
pub mod pipeline;
pub mod tools;
pub mod workspace;
