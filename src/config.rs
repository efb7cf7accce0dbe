use std::path::PathBuf;

use clap::{value_parser, Arg, ArgMatches, Command};
use log::LevelFilter;

/// Startup parameters of the native host.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub width: usize,
    pub height: usize,
    pub pixel_ratio: f32,
    pub assets: String,
    pub seed: Option<u64>,
    /// Total height of the scrollable page, in pixels
    pub page_height: f32,
    /// Pixels scrolled per wheel notch
    pub scroll_step: f32,
    /// Stop after this many frames
    pub frames: Option<u64>,
    pub fps: usize,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            pixel_ratio: 1.0,
            assets: "assets/".to_string(),
            seed: None,
            page_height: 6000.0,
            scroll_step: 60.0,
            frames: None,
            fps: 60,
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl RunConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            width: matches
                .get_one::<usize>("width")
                .copied()
                .unwrap_or(defaults.width),
            height: matches
                .get_one::<usize>("height")
                .copied()
                .unwrap_or(defaults.height),
            pixel_ratio: matches
                .get_one::<f32>("pixel-ratio")
                .copied()
                .unwrap_or(defaults.pixel_ratio),
            assets: matches
                .get_one::<String>("assets")
                .cloned()
                .unwrap_or(defaults.assets),
            seed: matches.get_one::<u64>("seed").copied(),
            page_height: matches
                .get_one::<f32>("page-height")
                .copied()
                .unwrap_or(defaults.page_height),
            scroll_step: matches
                .get_one::<f32>("scroll-step")
                .copied()
                .unwrap_or(defaults.scroll_step),
            frames: matches.get_one::<u64>("frames").copied(),
            fps: matches
                .get_one::<usize>("fps")
                .copied()
                .unwrap_or(defaults.fps),
            log_level: matches
                .get_one::<String>("log-level")
                .and_then(|level| level.parse().ok())
                .unwrap_or(defaults.log_level),
            log_file: matches.get_one::<PathBuf>("log-file").cloned(),
        }
    }
}

pub fn create_clap_command() -> Command {
    Command::new("scroll_scene")
        .about("Scroll-driven 3D scene on a software rasterizer")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PX")
                .help("Window width")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PX")
                .help("Window height")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("pixel-ratio")
                .long("pixel-ratio")
                .value_name("RATIO")
                .help("Drawing buffer pixels per window pixel")
                .value_parser(value_parser!(f32)),
        )
        .arg(
            Arg::new("assets")
                .short('a')
                .long("assets")
                .value_name("DIR")
                .help("Directory holding space.jpg, larry.jpg, moon.jpg and moonground.jpg"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed for star placement")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("page-height")
                .long("page-height")
                .value_name("PX")
                .help("Height of the virtual page being scrolled")
                .value_parser(value_parser!(f32)),
        )
        .arg(
            Arg::new("scroll-step")
                .long("scroll-step")
                .value_name("PX")
                .help("Pixels scrolled per wheel step")
                .value_parser(value_parser!(f32)),
        )
        .arg(
            Arg::new("frames")
                .short('n')
                .long("frames")
                .value_name("N")
                .help("Exit after rendering N frames")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .value_name("N")
                .help("Target frame rate")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log verbosity")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"]),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Also write the log to FILE")
                .value_parser(value_parser!(PathBuf)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> RunConfig {
        let matches = create_clap_command()
            .try_get_matches_from(std::iter::once("scroll_scene").chain(args.iter().copied()))
            .unwrap();
        RunConfig::from_matches(&matches)
    }

    #[test]
    fn no_arguments_gives_defaults() {
        assert_eq!(parse(&[]), RunConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "--width",
            "640",
            "--height",
            "480",
            "--seed",
            "42",
            "-n",
            "10",
            "--log-level",
            "debug",
            "--assets",
            "/tmp/art",
        ]);
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.frames, Some(10));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.assets, "/tmp/art");
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn rejects_non_numeric_width() {
        let result = create_clap_command().try_get_matches_from(["scroll_scene", "--width", "wide"]);
        assert!(result.is_err());
    }
}
