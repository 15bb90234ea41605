use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

use crate::{Cell, Color, Race, Tile, Toggles, Track};

impl FromStr for Race {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.trim().lines().map(|line| line.trim());

        let first = lines.next().filter(|line| !line.is_empty());
        let width = first.context("Empty map")?.chars().count();
        ensure!(width <= u16::MAX as usize, "Map too wide: {width}");

        let mut grid = Vec::new();
        let mut car = None;
        let mut target = None;
        let mut height = 0;
        for line in first.into_iter().chain(lines) {
            ensure!(
                line.chars().count() == width,
                "Width mismatch on line {}, expecting width {width}",
                height + 1,
            );
            for (ch, x) in line.chars().zip(0..) {
                let cell = Cell::new(x, height);
                let tile = match ch {
                    '.' => Tile::Empty,
                    '#' => Tile::Wall,
                    'S' => {
                        ensure!(car.is_none(), "Multiple starts");
                        car = Some(cell);
                        Tile::Empty
                    }
                    'T' => {
                        ensure!(target.is_none(), "Multiple targets");
                        target = Some(cell);
                        Tile::Empty
                    }
                    'A'..='Z' => Tile::Gate(Color(ch as u8 - b'A')),
                    'a'..='z' => Tile::Button(Color(ch as u8 - b'a')),
                    _ => bail!("Invalid cell: {ch:?}"),
                };
                grid.push(tile);
            }
            height += 1;
        }
        ensure!(height <= u16::MAX as i32, "Map too tall: {height}");

        let track = Track {
            width: width as _,
            height: height as _,
            grid: grid.into(),
            target: target.context("Missing target")?,
        };
        Ok(Race {
            track,
            car: car.context("Missing start")?,
            toggles: Toggles::default(),
        })
    }
}
