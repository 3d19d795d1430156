use clap::Parser as _;
use svg_to_ico::{cli::Cli, pipeline, tools};

fn setup_logger() -> eyre::Result<()> {
    use tracing::Level;
    use tracing_subscriber::{
        filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
    };

    Registry::default()
        .with(LevelFilter::from(Level::INFO))
        .with(layer().with_ansi(true).with_target(false).without_time())
        .try_init()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    setup_logger()?;
    let args = Cli::parse();

    let base_dir = match args.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let inkscape = match args.inkscape_binary {
        Some(binary) => tools::Inkscape::new(binary),
        None => tools::Inkscape::from_path(),
    };
    let convert = match args.convert_binary {
        Some(binary) => tools::Magick::new(binary),
        None => tools::Magick::from_path(),
    };

    pipeline::run(&base_dir, &inkscape, &convert)
}
