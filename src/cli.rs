use std::path::PathBuf;

/// Builds the multi-resolution Windows icons from the SVG sources.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Cli {
    /// Sets the Inkscape binary to use
    #[arg(long, value_name = "PATH")]
    pub inkscape_binary: Option<PathBuf>,

    /// Sets the ImageMagick convert binary to use
    #[arg(long, value_name = "PATH")]
    pub convert_binary: Option<PathBuf>,

    /// Base directory containing the svg/ tree; the finished .ico files are
    /// written here (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}
