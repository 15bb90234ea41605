use anyhow::{ensure, Context};
use racetrack_bot::solve::{directions, find_path};
use racetrack_bot::Race;

use crate::common::*;

mod common;

fn main() {
    run_tests("solve", |content| {
        let map = input_of(content);
        let race = map.parse::<Race>().context("Invalid map")?;

        let path = find_path(&race, race.car, race.track.target(), &race.toggles);
        let again = find_path(&race, race.car, race.track.target(), &race.toggles);
        ensure!(path == again, "Search is not deterministic");

        let dirs = directions(race.car, &path).context("Path is not contiguous")?;
        ensure!(
            Some(dirs.len()).filter(|&len| len != 0) == brute_force_len(&race),
            "Path is not the shortest",
        );

        let steps = if dirs.is_empty() {
            "-".to_owned()
        } else {
            // Validate.
            let finish = replay(&race, &dirs)?;
            ensure!(finish.is_finished(), "Path does not end at the target");
            fmt_directions(&dirs)
        };

        Ok(format!("{map}\n\n{SEPARATOR}{steps}\n"))
    });
}
