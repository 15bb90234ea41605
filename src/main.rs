use anyhow::{bail, ensure, Context, Result};
use console::{Key, Term};
use indicatif::{ProgressBar, ProgressStyle};
use racetrack_bot::solve::{directions, find_path_with};
use racetrack_bot::{Bot, Direction, Race};
use rayon::prelude::*;

enum Action {
    Exit,
    Go(Direction),
    Bot,
    Undo,
    Reset,
}

impl TryFrom<Key> for Action {
    type Error = ();

    fn try_from(key: Key) -> Result<Self, Self::Error> {
        Ok(match key {
            Key::ArrowLeft | Key::Char('a') => Self::Go(Direction::Left),
            Key::ArrowRight | Key::Char('d') => Self::Go(Direction::Right),
            Key::ArrowUp | Key::Char('w') => Self::Go(Direction::Up),
            Key::ArrowDown | Key::Char('s') => Self::Go(Direction::Down),
            Key::Enter | Key::Char(' ') | Key::Char('b') => Self::Bot,
            Key::Escape | Key::Char('q') => Self::Exit,
            Key::Char('z') => Self::Undo,
            Key::Char('r') => Self::Reset,
            _ => return Err(()),
        })
    }
}

fn load(path: &str) -> Result<Race> {
    let map_data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read the map {path:?}"))?;
    map_data
        .parse::<Race>()
        .with_context(|| format!("Failed to parse the map {path:?}"))
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let cmd = args
        .next()
        .context("Missing command, expecting `play <map>` or `solve <map>...`")?;
    match cmd.as_str() {
        "play" => play(&args.next().context("Missing map file argument")?),
        "solve" => solve(&args.collect::<Vec<_>>()),
        _ => bail!("Unknown command: {cmd:?}"),
    }
}

fn play(path: &str) -> Result<()> {
    let init_race = load(path)?;
    let mut race = init_race.clone();
    let mut bot = Bot::new();
    let mut history = Vec::new();

    let term = Term::stderr();
    loop {
        eprintln!("{race}");
        if race.is_finished() {
            eprintln!("Finished in {} moves", history.len());
        }

        let action = loop {
            if let Ok(action) = Action::try_from(term.read_key()?) {
                break action;
            }
        };

        match action {
            Action::Exit => break,
            Action::Go(dir) => {
                let mut new_race = race.clone();
                if new_race.drive(dir.vector()).is_ok() {
                    history.push(race);
                    race = new_race;
                    // The cached path no longer starts where the car is.
                    bot.reset();
                }
            }
            Action::Bot => {
                let mut new_race = race.clone();
                let moved = bot
                    .next_move(race.car, &race)
                    .context("Bot cannot move")
                    .and_then(|v| new_race.drive(v).context("Bot made an illegal move"));
                match moved {
                    Ok(()) => {
                        history.push(race);
                        race = new_race;
                    }
                    Err(err) => eprintln!("{err:#}"),
                }
            }
            Action::Undo => {
                if let Some(last_race) = history.pop() {
                    race = last_race;
                    bot.reset();
                }
            }
            Action::Reset => {
                history.push(race);
                race = init_race.clone();
                bot.reset();
            }
        }
    }

    Ok(())
}

fn solve(paths: &[String]) -> Result<()> {
    ensure!(!paths.is_empty(), "Missing map file argument");

    let bar = ProgressBar::new(paths.len() as u64)
        .with_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);
    let results = paths
        .par_iter()
        .map(|path| {
            let race = load(path)?;
            let mut expanded = 0u64;
            let steps = find_path_with(
                &race,
                race.car,
                race.track.target(),
                &race.toggles,
                || expanded += 1,
            );
            bar.inc(1);
            Ok((race, steps, expanded))
        })
        .collect::<Vec<Result<_>>>();
    bar.finish_and_clear();

    for (path, result) in paths.iter().zip(results) {
        let (race, steps, expanded) = result?;
        let moves = directions(race.car, &steps).context("Path is not contiguous")?;
        if moves.is_empty() && !race.is_finished() {
            println!("{path}: no path ({expanded} states expanded)");
            continue;
        }
        let moves = moves.iter().map(ToString::to_string).collect::<String>();
        println!(
            "{path}: {} moves ({expanded} states expanded)\n{moves}",
            steps.len(),
        );
    }
    Ok(())
}
