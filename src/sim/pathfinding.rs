//! Breadth-first pathfinding over passable tiles
//!
//! Neighbors are expanded up, down, left, right. That order is what breaks ties
//! between equal-length paths, so it must not change.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};

use super::grid::TileGrid;
use crate::tile_center;

const DIRECTIONS: [IVec2; 4] = [
    IVec2::new(0, -1),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
];

/// Shortest 4-connected path from `start` to `goal`, both inclusive
///
/// Returns `[goal]` when start and goal coincide and an empty path when the
/// goal cannot be reached with at most `max_steps` tiles in the path. Every
/// tile is enqueued at most once, so a call costs O(tiles) in the worst case.
pub fn find_path(start: IVec2, goal: IVec2, grid: &TileGrid, max_steps: usize) -> Vec<IVec2> {
    if start == goal {
        return vec![goal];
    }
    if grid.is_blocked(goal.x, goal.y) || !grid.in_bounds(start) {
        return Vec::new();
    }

    let width = grid.width() as usize;
    let index = |t: IVec2| t.y as usize * width + t.x as usize;

    // parent[i] = previous tile on the shortest path; depth counts tiles
    let mut parent: Vec<Option<IVec2>> = vec![None; width * grid.height() as usize];
    let mut visited = vec![false; parent.len()];
    let mut queue = VecDeque::new();

    visited[index(start)] = true;
    queue.push_back((start, 1usize));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_steps {
            continue;
        }

        for dir in DIRECTIONS {
            let next = current + dir;
            if grid.is_blocked(next.x, next.y) || visited[index(next)] {
                continue;
            }
            visited[index(next)] = true;
            parent[index(next)] = Some(current);

            if next == goal {
                return rebuild(&parent, index, start, goal);
            }
            queue.push_back((next, depth + 1));
        }
    }

    Vec::new()
}

fn rebuild(
    parent: &[Option<IVec2>],
    index: impl Fn(IVec2) -> usize,
    start: IVec2,
    goal: IVec2,
) -> Vec<IVec2> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match parent[index(current)] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Unit vector from a world position toward a tile's center
pub fn direction_to_tile(pos: Vec2, tile: IVec2) -> Vec2 {
    (tile_center(tile) - pos).normalize_or_zero()
}
