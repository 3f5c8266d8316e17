use clap::Parser;
use colored::Colorize;
use ocimirror::{action::GithubOutput, engine::Engine, report::StepOutput, Config};
use std::path::PathBuf;

/// Mirror container images between registries
///
/// Options not given on the command line are read from `INPUT_IMAGES`,
/// `INPUT_IMAGES-FILE` and `INPUT_ENGINE` environment variables.
#[derive(Debug, Parser)]
#[command(version)]
struct Opt {
    /// JSON list of `{source, destination, architecture}` objects
    #[arg(long = "images")]
    images: Option<String>,

    /// Path to a file containing the JSON list of images
    #[arg(long = "images-file")]
    images_file: Option<PathBuf>,

    /// Container engine executable, e.g. `docker` or `podman`
    #[arg(long = "engine")]
    engine: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();
    let config = Config::from_env().override_with(opt.images, opt.images_file, opt.engine);
    let engine = Engine::new(&config.engine);
    let mut output = GithubOutput::from_env();

    match ocimirror::run(&config, &engine, &mut output) {
        Ok(status) if status.is_success() => {
            eprintln!("{}", "All images are mirrored".green());
            Ok(())
        }
        Ok(_) => {
            eprintln!("{}", "Some images failed to mirror".red());
            std::process::exit(1);
        }
        Err(e) => {
            output.set_failed(&e.to_string())?;
            eprintln!("{}", e.to_string().red());
            std::process::exit(1);
        }
    }
}
