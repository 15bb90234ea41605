use std::collections::{HashMap, VecDeque};
use std::path::Path;

use anyhow::{Context, Result};
use racetrack_bot::{Direction, Race};

pub const SEPARATOR: &str = "================\n";
pub const TEST_DIR: &str = "tests";
pub const EXTENTION: &str = "map";

#[allow(unused)]
pub fn fmt_directions(dirs: &[Direction]) -> String {
    dirs.iter().map(ToString::to_string).collect()
}

#[allow(unused)]
pub fn run_tests(subdir: &str, mut f: impl FnMut(&str) -> Result<String>) {
    let mut tests = std::fs::read_dir(Path::new(TEST_DIR).join(subdir))
        .unwrap()
        .filter_map(|ent| {
            let path = ent.unwrap().path();
            if path.extension().map_or(true, |ext| ext != EXTENTION) {
                return None;
            }
            let name = path.file_stem().unwrap().to_str().unwrap().to_owned();
            Some((name, path))
        })
        .collect::<Vec<_>>();
    tests.sort();

    let do_update_tests = std::env::var("UPDATE_EXPECT").map_or(false, |v| v == "1");

    let mut failed_cnt = 0;
    for (name, path) in &tests {
        eprint!("{name}: ");
        let content = std::fs::read_to_string(path).unwrap();
        match f(&content) {
            Ok(got) if got == content => eprintln!("\x1B[32mOK\x1B[0m"),
            Ok(got) if do_update_tests => {
                std::fs::write(path, got).unwrap();
                eprintln!("\x1B[33mUpdated\x1B[0m");
            }
            Ok(got) => {
                eprintln!("\x1B[31mFAILED\x1B[0m\n{got}");
                failed_cnt += 1;
            }
            Err(err) => {
                eprintln!("\x1B[31mFAILED\x1B[0m\n{:?}", err);
                failed_cnt += 1;
            }
        }
    }

    if failed_cnt != 0 {
        eprintln!("{failed_cnt}/{} tests failed", tests.len());
        std::process::exit(1);
    }
}

/// Splits an expectation file into its map part.
#[allow(unused)]
pub fn input_of(content: &str) -> &str {
    content
        .split_once(SEPARATOR)
        .map_or(content, |(input, _)| input)
        .trim()
}

/// Length of the shortest drive to the target, by plain BFS over (car, toggles).
#[allow(unused)]
pub fn brute_force_len(race: &Race) -> Option<usize> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert((race.car, race.toggles), 0usize);
    queue.push_back((race.car, race.toggles));
    while let Some((car, toggles)) = queue.pop_front() {
        let d = dist[&(car, toggles)];
        if car == race.track.target() {
            return Some(d);
        }
        let open = race.track.traversable_cells(toggles);
        let triggers = race.track.trigger_cells(toggles);
        for next in car.neighbors() {
            if !open.contains(&next) {
                continue;
            }
            let next_toggles = match triggers.get(&next) {
                Some(&color) => toggles.toggled(color),
                None => toggles,
            };
            if !dist.contains_key(&(next, next_toggles)) {
                dist.insert((next, next_toggles), d + 1);
                queue.push_back((next, next_toggles));
            }
        }
    }
    None
}

/// Drives a copy of `race` along `dirs`, failing on any illegal move.
#[allow(unused)]
pub fn replay(race: &Race, dirs: &[Direction]) -> Result<Race> {
    let mut race = race.clone();
    for (&dir, i) in dirs.iter().zip(1..) {
        race.drive(dir.vector())
            .with_context(|| format!("Failed to perform step {i} {dir}"))?;
    }
    Ok(race)
}
