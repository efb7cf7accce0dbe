use std::fs::File;

use anyhow::{Context, Result};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use scroll_scene::core::TextureLoader;
use scroll_scene::scroll::ScrollState;
use scroll_scene::surface::{MinifbSurface, Surface};
use scroll_scene::{create_clap_command, RunConfig, SceneRunner, StopHandle};

fn init_logging(config: &RunConfig) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        config.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("unable to create log file {}", path.display()))?;
        loggers.push(WriteLogger::new(config.log_level, Config::default(), file));
    }
    CombinedLogger::init(loggers).context("logger already initialised")?;
    Ok(())
}

fn run(config: RunConfig) -> Result<()> {
    let mut surface = MinifbSurface::open(
        "scroll_scene",
        config.width,
        config.height,
        config.pixel_ratio,
        config.scroll_step,
        config.fps,
    )
    .context("failed to create the output window")?;

    let (width, height) = surface.size();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut loader = TextureLoader::new(&config.assets);

    let mut runner = SceneRunner::bootstrap(
        width,
        height,
        surface.pixel_ratio(),
        ScrollState::new(config.page_height, height as f32),
        &mut rng,
        &mut loader,
    );

    let stop = StopHandle::new();
    runner
        .run(&mut surface, &stop, config.frames)
        .context("render loop aborted")?;
    Ok(())
}

fn main() -> Result<()> {
    let matches = create_clap_command().get_matches();
    let config = RunConfig::from_matches(&matches);
    init_logging(&config)?;
    info!("Starting with {:?}", config);

    if let Err(e) = run(config) {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
