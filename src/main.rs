//! Curved Screen - Command Line Entry Point
//!
//! Loads a screen settings file, builds the screen into an in-memory scene and
//! prints the resulting panel plan. `--write-default` writes a starter file.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use curved_screen::layout::{compute_segment_transform, compute_uv_rect_with_policy};
use curved_screen::scene::{build_screen, InMemoryScene};
use curved_screen::settings::ScreenSettings;
use curved_screen::telemetry::{init_logging, LogConfig};

#[derive(Parser, Debug)]
#[command(name = "curved-screen", version, about = "Print the panel plan of a curved video wall")]
struct Cli {
    /// Screen settings XML (defaults to the user config directory).
    path: Option<PathBuf>,

    /// Write default settings to PATH instead of printing the plan.
    #[arg(long)]
    write_default: bool,

    /// Also write logs to this file.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Emit console logs as JSON.
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

impl Cli {
    fn log_config(&self) -> LogConfig {
        let config = LogConfig {
            json_format: self.log_json,
            ..LogConfig::default()
        };
        match &self.log_file {
            Some(path) => config.with_log_file(path.clone()),
            None => config,
        }
    }
}

fn write_default(path: Option<PathBuf>) -> Result<()> {
    let settings = ScreenSettings::default();
    let written = match path {
        Some(path) => {
            settings
                .save_to_file(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            path
        }
        None => settings.save().context("writing default settings")?,
    };
    println!("Wrote default screen settings to {}", written.display());
    Ok(())
}

fn show(path: Option<PathBuf>) -> Result<()> {
    let settings = match path {
        Some(path) => ScreenSettings::load_from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ScreenSettings::load(),
    };

    let mut scene = InMemoryScene::new();
    let root = build_screen(&settings.screen_options(), &mut scene)?;
    let layout = &settings.layout;

    println!(
        "{} panels on a {} degree arc, radius {}, texture '{}'",
        layout.segment_count, layout.arc_span_degrees, layout.curve_radius, settings.texture_source
    );
    println!(
        "hinge: {}, textured face: {}",
        layout.hinge_policy.display_name(),
        layout.textured_face.display_name()
    );
    println!("{:>5} {:>9} {:>9} {:>30}  {}", "index", "angle", "yaw", "position", "u");

    for panel in scene.children_of(root) {
        let segment = compute_segment_transform(panel.index, layout);
        let rect = compute_uv_rect_with_policy(panel.index, layout.segment_count, layout.hinge_policy);
        let position = scene.world_position(panel).unwrap_or(panel.transform.position);
        let hinge = if panel.index == layout.hinge_index() { " (hinge)" } else { "" };
        println!(
            "{:>5} {:>9.3} {:>9.3} {:>30}  [{:.5}, {:.5}]{}",
            panel.index,
            segment.angle_degrees,
            segment.yaw_degrees,
            format!("({:.3}, {:.3}, {:.3})", position.x, position.y, position.z),
            rect.u_start,
            rect.u_end,
            hinge
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(&cli.log_config())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    if cli.write_default {
        write_default(cli.path)
    } else {
        show(cli.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["curved-screen"]).unwrap();
        assert_eq!(cli.path, None);
        assert!(!cli.write_default);

        let cli = Cli::try_parse_from(["curved-screen", "wall.xml"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("wall.xml")));
    }

    #[test]
    fn test_parse_write_default() {
        let cli = Cli::try_parse_from(["curved-screen", "--write-default"]).unwrap();
        assert!(cli.write_default);
        assert_eq!(cli.path, None);

        let cli = Cli::try_parse_from(["curved-screen", "--write-default", "out.xml"]).unwrap();
        assert!(cli.write_default);
        assert_eq!(cli.path, Some(PathBuf::from("out.xml")));
    }

    #[test]
    fn test_flags_are_not_paths() {
        let err = Cli::try_parse_from(["curved-screen", "--write-default", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["curved-screen", "--write-default", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        assert!(Cli::try_parse_from(["curved-screen", "a.xml", "b.xml"]).is_err());
    }

    #[test]
    fn test_log_options() {
        let cli = Cli::try_parse_from(["curved-screen"]).unwrap();
        let config = cli.log_config();
        assert!(!config.file_enabled);
        assert!(!config.json_format);

        let cli =
            Cli::try_parse_from(["curved-screen", "--log-file", "run.log", "--log-json"]).unwrap();
        let config = cli.log_config();
        assert!(config.file_enabled);
        assert!(config.json_format);
        assert_eq!(config.resolved_file_path(), PathBuf::from("run.log"));
    }
}
