//! An ordered chain anchored at a starting actor and extended by
//! `(film, actor)` links. Doesn't validate that consecutive links share an
//! actor — that discipline belongs to the search.

use crate::film::Film;

#[derive(Clone, Debug)]
struct Link {
    film: Film,
    actor: String,
}

#[derive(Clone, Debug)]
pub struct Path {
    start: String,
    links: Vec<Link>,
}

impl Path {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            links: Vec::new(),
        }
    }

    /// Appends a new `(film, actor)` link and returns the extended path,
    /// leaving `self` untouched. Each BFS frontier entry owns its own
    /// path prefix, so extension is by value rather than in place.
    pub fn extended(&self, film: Film, actor: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.extend(film, actor);
        next
    }

    pub fn extend(&mut self, film: Film, actor: impl Into<String>) {
        self.links.push(Link {
            film,
            actor: actor.into(),
        });
    }

    /// Removes the last link; a no-op if empty.
    pub fn pop(&mut self) {
        self.links.pop();
    }

    /// The most recently added actor, or the anchor if there are no links.
    pub fn last_actor(&self) -> &str {
        match self.links.last() {
            Some(link) => &link.actor,
            None => &self.start,
        }
    }

    /// The number of `(film, actor)` links in the chain.
    pub fn length(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Renders the canonical multi-line chain:
    /// `\t<start> was in "<title>" (<year>) with <actor>.\n` per link.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut previous = self.start.as_str();
        for link in &self.links {
            out.push_str(&format!(
                "\t{previous} was in \"{}\" ({}) with {}.\n",
                link.film.title, link.film.year, link.actor
            ));
            previous = &link.actor;
        }
        out
    }
}
