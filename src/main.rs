use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use fov::{Direction, Fov, OpaqueApply, Settings, Shape};
use glam::{IVec2, Vec2, ivec2, vec2};
use util::{AsciiMap, Grid};

mod fog;
use fog::FogMask;

mod viewer;
use viewer::Viewer;

pub const APP_NAME: &str = "fogsight";

/// Character marking the viewer's starting cell in text maps.
const VIEWER_MARK: char = '@';

#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = "Show the fog of war left by a viewer walking on a tile map")]
struct Args {
    /// Map file. Text with `#` for walls, or packed blocking bits when
    /// `--size` is given.
    map: PathBuf,

    #[arg(long, value_parser = parse_size, help = "Read the map as a packed bitmap of WxH cells")]
    size: Option<IVec2>,

    #[arg(long = "at", value_parser = parse_cell, help = "Viewer stop X,Y, repeat to walk a path")]
    stops: Vec<IVec2>,

    #[arg(long, default_value_t = 5, help = "View radius in cells")]
    radius: u32,

    #[arg(long, help = "IDM file with field of view settings")]
    config: Option<PathBuf>,

    #[arg(long, help = "View shape, overrides config")]
    shape: Option<Shape>,

    #[arg(long, help = "Whether walls are lit, overrides config")]
    opaque_apply: Option<OpaqueApply>,

    #[arg(long, help = "Look in a beam towards a compass direction")]
    beam: Option<Direction>,

    #[arg(long, value_parser = parse_vec, allow_hyphen_values = true, help = "Look in a beam towards the heading closest to DX,DY")]
    facing: Option<Vec2>,

    #[arg(long, default_value_t = 130.0, help = "Beam width in degrees")]
    angle: f32,

    #[arg(long, default_value_t = 0.25, help = "Seconds spent at each stop")]
    tick: f32,

    #[arg(long, default_value_t = fog::DARK_FOG_GRAY, help = "Brightness of remembered cells")]
    dark_fog_gray: u8,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                idm::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => Settings::default(),
        };

        if let Some(shape) = self.shape {
            settings = settings.with_shape(shape);
        }
        if let Some(opaque_apply) = self.opaque_apply {
            settings = settings.with_opaque_apply(opaque_apply);
        }
        Ok(settings)
    }

    fn viewer(&self) -> Viewer {
        let mut viewer = Viewer::new(self.radius);
        if let Some(dir) = self.beam {
            viewer = viewer.with_beam(dir, self.angle);
        }
        if let Some(forward) = self.facing {
            let dir = viewer.direction();
            viewer = viewer.with_beam(dir, self.angle);
            viewer.face(forward);
        }
        viewer
    }

    /// Load the map and the viewer mark if the map has one.
    fn load_map(&self) -> Result<(Grid, Option<IVec2>)> {
        if let Some(size) = self.size {
            let bits = fs::read(&self.map)
                .with_context(|| format!("reading {}", self.map.display()))?;
            Ok((Grid::from_bitmap(size.x, size.y, &bits), None))
        } else {
            let text = fs::read_to_string(&self.map)
                .with_context(|| format!("reading {}", self.map.display()))?;
            let map: AsciiMap = text.parse()?;
            Ok((map.to_grid(), map.find(VIEWER_MARK)))
        }
    }
}

fn parse_pair(s: &str, separator: char) -> Result<(&str, &str)> {
    match s.split_once(separator) {
        Some((a, b)) => Ok((a.trim(), b.trim())),
        None => bail!("expected two values separated by '{separator}'"),
    }
}

fn parse_cell(s: &str) -> Result<IVec2> {
    let (x, y) = parse_pair(s, ',')?;
    Ok(ivec2(x.parse()?, y.parse()?))
}

fn parse_vec(s: &str) -> Result<Vec2> {
    let (x, y) = parse_pair(s, ',')?;
    Ok(vec2(x.parse()?, y.parse()?))
}

fn parse_size(s: &str) -> Result<IVec2> {
    let (w, h) = parse_pair(s, 'x')?;
    let size = ivec2(w.parse()?, h.parse()?);
    if size.x <= 0 || size.y <= 0 {
        bail!("map size must be positive");
    }
    Ok(size)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = Args::parse();

    let (mut grid, mark) = args.load_map()?;
    log::info!("map: {}x{}", grid.width(), grid.height());

    let settings = args.settings()?;
    log::info!("settings: {settings:?}");

    let stops = if !args.stops.is_empty() {
        args.stops.clone()
    } else {
        vec![mark.unwrap_or(grid.dim() / 2)]
    };

    let mut viewer = args.viewer();
    let mut fov = Fov::new(
        settings,
        |grid: &Grid, x: i32, y: i32| grid.is_blocking(x, y),
        |grid: &mut Grid, x: i32, y: i32, _dx: i32, _dy: i32, _: &Viewer| {
            grid.mark_seen(x, y)
        },
    );
    let mut fog = FogMask::new(grid.width(), grid.height())
        .with_dark_fog_gray(args.dark_fog_gray);

    for (i, &cell) in stops.iter().enumerate() {
        if !grid.in_bounds(cell.x, cell.y) {
            log::warn!("stop {cell} is outside the map");
        }

        let now = i as f32 * args.tick;
        if !viewer.update(cell, now) {
            log::debug!("stop {cell}: view is still fresh");
            continue;
        }

        viewer.look(&mut fov, &mut grid, cell);
        fog.update(&mut grid, cell);

        println!("{cell}:");
        print!("{}", fog.to_ascii(&grid, cell));
    }

    log::info!(
        "{} cells remembered",
        grid.iter().filter(|(p, _)| grid.is_remembered(p.x, p.y)).count()
    );

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn argument_values() {
        assert_eq!(parse_cell("3,4").unwrap(), ivec2(3, 4));
        assert_eq!(parse_cell(" -1 , 2").unwrap(), ivec2(-1, 2));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("a,b").is_err());

        assert_eq!(parse_vec("0.5,-1").unwrap(), vec2(0.5, -1.0));

        assert_eq!(parse_size("64x32").unwrap(), ivec2(64, 32));
        assert!(parse_size("0x32").is_err());
        assert!(parse_size("64,32").is_err());
    }

    #[test]
    fn config_file() {
        let settings: Settings = idm::from_str(
            "\
shape octagon
corner-peek no-peek
opaque-apply skip",
        )
        .unwrap();
        assert_eq!(
            settings,
            Settings::default()
                .with_shape(Shape::Octagon)
                .with_opaque_apply(OpaqueApply::Skip)
        );
    }

    #[test]
    fn command_line() {
        let args = Args::try_parse_from([
            APP_NAME,
            "map.txt",
            "--at",
            "1,2",
            "--at",
            "3,2",
            "--shape",
            "octagon",
            "--facing",
            "-1,0",
        ])
        .unwrap();

        assert_eq!(args.stops, vec![ivec2(1, 2), ivec2(3, 2)]);
        assert_eq!(args.settings().unwrap().shape, Shape::Octagon);
        assert_eq!(
            args.settings().unwrap().opaque_apply,
            OpaqueApply::Apply
        );

        let viewer = args.viewer();
        assert_eq!(viewer.direction(), Direction::West);
        assert_eq!(viewer.beam, Some(130.0));
    }
}
