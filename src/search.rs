//! Bounded-depth, level-synchronous BFS over alternating actor/film layers,
//! producing a reconstructible shortest path between two actors.

use std::collections::HashSet;

use crate::database::Database;
use crate::film::Film;
use crate::path::Path;

/// Maximum number of film-links a returned path may have.
pub const MAX_DEPTH: usize = 6;

/// Finds a shortest path from `source` to `target` with at most
/// `MAX_DEPTH` film-links. Returns an empty path if none exists within
/// the bound, or if either actor isn't in the database.
///
/// Bounded-depth BFS with visited-deduplication on both actors and films
/// over a bipartite actor/film graph yields a minimum-link-count path:
/// deduplicating films prevents re-expanding identical casts, and
/// deduplicating actors prevents revisiting earlier (and therefore
/// shorter) nodes.
pub fn shortest_path(db: &Database, source: &str, target: &str) -> Path {
    let mut visited_actors: HashSet<String> = HashSet::new();
    let mut visited_films: HashSet<Film> = HashSet::new();
    visited_actors.insert(source.to_string());

    let mut frontier = vec![Path::new(source)];

    // `remaining_depth` counts down from MAX_DEPTH to 0; a target check
    // runs before every expansion, including the final depth-0 frontier,
    // so a path is never expanded past MAX_DEPTH links.
    let mut remaining_depth = MAX_DEPTH;
    loop {
        if let Some(found) = frontier.iter().find(|p| p.last_actor() == target) {
            return found.clone();
        }
        if remaining_depth == 0 {
            return Path::new(source);
        }
        frontier = expand_level(db, &mut visited_actors, &mut visited_films, frontier);
        remaining_depth -= 1;
    }
}

/// Expands every path in `frontier` by one film-link, in insertion order,
/// honoring the per-level marking discipline: a film is only added to
/// `visited_films` once all of one path's credits have been considered,
/// so repeats within the same level are elided rather than starving
/// sibling paths of a film they also share.
fn expand_level(
    db: &Database,
    visited_actors: &mut HashSet<String>,
    visited_films: &mut HashSet<Film>,
    frontier: Vec<Path>,
) -> Vec<Path> {
    let mut next_frontier = Vec::new();

    for path in frontier {
        let credits = db.credits(path.last_actor()).unwrap_or_default();
        let mut newly_seen_films = Vec::new();

        for film in credits {
            if visited_films.contains(&film) {
                continue;
            }
            let cast = db.cast(&film).unwrap_or_default();
            for actor in cast {
                if visited_actors.contains(&actor) {
                    continue;
                }
                visited_actors.insert(actor.clone());
                next_frontier.push(path.extended(film.clone(), actor));
            }
            newly_seen_films.push(film);
        }

        for film in newly_seen_films {
            visited_films.insert(film);
        }
    }

    next_frontier
}
