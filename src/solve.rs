use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use arrayvec::ArrayVec;
use indexmap::map::Entry;

use crate::{Cell, Direction, IndexMap, IndexSet, TrackView};

/// Cells to visit in order, excluding the cell the walk starts from.
pub type Path = VecDeque<Cell>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ConfigId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SearchState {
    cell: Cell,
    config: ConfigId,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    parent: usize,
    cost: u32,
}

// Field order is the pop order: estimate first, then insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    estimate: u32,
    order: u64,
    cost: u32,
    state: usize,
}

/// Distinct configurations seen by one search, one snapshot each.
struct Configs<V: TrackView + ?Sized> {
    fingerprints: IndexSet<Box<[u8]>>,
    snapshots: Vec<V::Config>,
    transitions: IndexMap<(ConfigId, V::Toggle), ConfigId>,
}

impl<V: TrackView + ?Sized> Configs<V> {
    fn new() -> Self {
        Self {
            fingerprints: IndexSet::default(),
            snapshots: Vec::new(),
            transitions: IndexMap::default(),
        }
    }

    fn intern(&mut self, view: &V, config: V::Config) -> ConfigId {
        let (idx, inserted) = self.fingerprints.insert_full(view.fingerprint(&config));
        if inserted {
            self.snapshots.push(config);
        }
        ConfigId(idx as u32)
    }

    fn get(&self, id: ConfigId) -> &V::Config {
        &self.snapshots[id.0 as usize]
    }

    fn toggle(&mut self, view: &V, id: ConfigId, toggle: V::Toggle) -> ConfigId {
        if let Some(&next) = self.transitions.get(&(id, toggle)) {
            return next;
        }
        let config = view.apply_toggle(self.get(id), toggle);
        let next = self.intern(view, config);
        self.transitions.insert((id, toggle), next);
        next
    }
}

pub fn find_path<V: TrackView + ?Sized>(
    view: &V,
    start: Cell,
    target: Cell,
    initial: &V::Config,
) -> Path {
    find_path_with(view, start, target, initial, || {})
}

/// A* over (cell, configuration) pairs. `on_step` is called once per expanded state.
///
/// Returns the shortest path from `start` to `target`, where stepping onto a
/// trigger cell changes the configuration for the rest of the walk. The path
/// is empty if `start == target` or the target cannot be reached.
pub fn find_path_with<V: TrackView + ?Sized>(
    view: &V,
    start: Cell,
    target: Cell,
    initial: &V::Config,
    mut on_step: impl FnMut(),
) -> Path {
    let mut configs = Configs::<V>::new();
    let init_config = configs.intern(view, initial.clone());

    let mut visited = IndexMap::default();
    let init_state = SearchState {
        cell: start,
        config: init_config,
    };
    visited.insert(init_state, Node { parent: !0usize, cost: 0 }); // Sentinel.

    let mut order = 0u64;
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse(FrontierEntry {
        estimate: start.manhattan(target),
        order,
        cost: 0,
        state: 0,
    }));

    let final_idx = loop {
        let Some(Reverse(entry)) = frontier.pop() else {
            return Path::new();
        };
        let (&state, &node) = visited.get_index(entry.state).unwrap();
        // Superseded by a cheaper push of the same state.
        if entry.cost > node.cost {
            continue;
        }
        if state.cell == target {
            break entry.state;
        }

        #[cfg(feature = "coz")]
        coz::progress!("Expand");
        on_step();

        let config = configs.get(state.config);
        let moves = state
            .cell
            .neighbors()
            .into_iter()
            .filter(|&next| view.is_traversable(config, next))
            .map(|next| (next, view.trigger_at(config, next)))
            .collect::<ArrayVec<_, 4>>();

        for (next, trigger) in moves {
            let next_config = match trigger {
                Some(toggle) => configs.toggle(view, state.config, toggle),
                None => state.config,
            };
            let next_state = SearchState {
                cell: next,
                config: next_config,
            };
            let cost = entry.cost + 1;
            let new_node = Node {
                parent: entry.state,
                cost,
            };
            let idx = match visited.entry(next_state) {
                Entry::Occupied(mut ent) if cost < ent.get().cost => {
                    *ent.get_mut() = new_node;
                    ent.index()
                }
                Entry::Occupied(_) => continue,
                Entry::Vacant(ent) => {
                    let idx = ent.index();
                    ent.insert(new_node);
                    idx
                }
            };
            order += 1;
            frontier.push(Reverse(FrontierEntry {
                estimate: cost + next.manhattan(target),
                order,
                cost,
                state: idx,
            }));
        }
    };

    let cells = std::iter::successors(Some(final_idx), |&i| {
        let (_, node) = visited.get_index(i)?;
        (node.parent != !0usize).then_some(node.parent)
    })
    .map(|i| visited.get_index(i).unwrap().0.cell)
    .collect::<Vec<_>>();
    // The last collected cell is the start.
    cells.into_iter().rev().skip(1).collect()
}

/// Directions walking `path` from `start`, or `None` if it is not a chain of neighbours.
pub fn directions(start: Cell, path: &Path) -> Option<Vec<Direction>> {
    path.iter()
        .scan(start, |prev, &cell| {
            let dir = Direction::from_vector(cell - *prev);
            *prev = cell;
            Some(dir)
        })
        .collect()
}
