//! Composes the two memory-mapped files and the record codec into the two
//! primitive queries the search engine and driver need: `credits` and
//! `cast`.

use std::path::Path;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::codec;
use crate::film::Film;
use crate::index::SortedIndex;
use crate::mapping::FileMapping;

const ACTOR_FILE_NAME: &str = "actors.data";
const MOVIE_FILE_NAME: &str = "movies.data";

/// Composes the actor and film mappings into the two primitive graph
/// queries. Construction never fails outright; a database that could not
/// open one or both files simply reports `good() == false`, mirroring the
/// original `imdb::good()` contract.
pub struct Database {
    actor_mapping: FileMapping,
    film_mapping: FileMapping,
}

impl Database {
    /// Opens `<directory>/actors.data` and `<directory>/movies.data`.
    pub fn open(directory: &Path) -> Self {
        Self {
            actor_mapping: FileMapping::open(&directory.join(ACTOR_FILE_NAME)),
            film_mapping: FileMapping::open(&directory.join(MOVIE_FILE_NAME)),
        }
    }

    /// True iff both underlying files opened and mapped successfully.
    pub fn good(&self) -> bool {
        self.actor_mapping.good() && self.film_mapping.good()
    }

    fn actor_index(&self) -> SortedIndex<'_> {
        SortedIndex::new(self.actor_mapping.view())
    }

    fn film_index(&self) -> SortedIndex<'_> {
        SortedIndex::new(self.film_mapping.view())
    }

    /// Looks up `actor_name`'s list of film credits. `None` if the actor
    /// is absent from the database.
    pub fn credits(&self, actor_name: &str) -> Option<Vec<Film>> {
        let view = self.actor_mapping.view();
        let index = self.actor_index();
        let i = index.find_by_key(&actor_name.to_string(), |off| {
            decode_actor_key(view, off)
        })?;
        let offset = index.ith_offset(i);
        let actor = match codec::decode_actor_record(view, offset as usize) {
            Ok(actor) => actor,
            Err(e) => {
                log::warn!("credits({actor_name}): corrupt actor record: {e}");
                return None;
            }
        };

        let film_view = self.film_mapping.view();
        let mut films = Vec::with_capacity(actor.film_offsets.len());
        for &film_offset in &actor.film_offsets {
            match codec::decode_film(film_view, film_offset as usize) {
                Ok(film) => films.push(film),
                Err(e) => {
                    log::warn!("credits({actor_name}): corrupt film record at {film_offset}: {e}");
                }
            }
        }
        Some(films)
    }

    /// Looks up `film`'s cast. `None` if the film is absent from the
    /// database.
    pub fn cast(&self, film: &Film) -> Option<Vec<String>> {
        let view = self.film_mapping.view();
        let index = self.film_index();
        let i = index.find_by_key(film, |off| decode_film_key(view, off))?;
        let offset = index.ith_offset(i);
        let record = match codec::decode_film_record(view, offset as usize) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("cast({film}): corrupt film record: {e}");
                return None;
            }
        };

        let actor_view = self.actor_mapping.view();
        let mut players = Vec::with_capacity(record.actor_offsets.len());
        for &actor_offset in &record.actor_offsets {
            match codec::decode_actor_name(actor_view, actor_offset as usize) {
                Ok(name) => players.push(name.to_string()),
                Err(e) => {
                    log::warn!("cast({film}): corrupt actor record at {actor_offset}: {e}");
                }
            }
        }
        Some(players)
    }

    /// Returns the name of a uniformly chosen actor. Smoke-test helper
    /// only; the RNG is owned here and seeded once rather than reseeded
    /// (and busy-waited on) for every call.
    pub fn random_player(&self, rng: &mut ThreadRng) -> Option<String> {
        let index = self.actor_index();
        let count = index.count();
        if count == 0 {
            return None;
        }
        let i = rng.gen_range(1..=count);
        let offset = index.ith_offset(i);
        codec::decode_actor_name(self.actor_mapping.view(), offset as usize)
            .ok()
            .map(str::to_string)
    }
}

fn decode_actor_key(view: &[u8], offset: u32) -> Option<String> {
    codec::decode_actor_name(view, offset as usize)
        .ok()
        .map(str::to_string)
}

fn decode_film_key(view: &[u8], offset: u32) -> Option<Film> {
    codec::decode_film(view, offset as usize).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Builds a tiny, fully cross-referenced fixture database on disk:
    /// three actors sharing one film, so `credits`/`cast` are exercised
    /// both ways.
    fn build_fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();

        // Film record for "Apollo 13" (1995), to be referenced by all
        // three actors. Actor offsets filled in once we know them.
        let title = b"Apollo 13";
        let mut film_record = Vec::new();
        film_record.extend_from_slice(title);
        film_record.push(0);
        film_record.push(Film::year_to_byte(1995));
        if film_record.len() % 2 != 0 {
            film_record.push(0);
        }

        // Actor records, in sorted name order: Kevin Bacon, Meryl Streep,
        // Tom Hanks. Each has exactly one credit (the shared film).
        let names = ["Kevin Bacon", "Meryl Streep", "Tom Hanks"];

        // Lay out the actor file: header, then the three actor records.
        let actor_header_len = 4 + 4 * names.len();
        let mut actor_records = Vec::new();
        let mut actor_offsets = Vec::new();
        for name in &names {
            actor_offsets.push((actor_header_len + actor_records.len()) as u32);
            actor_records.extend_from_slice(name.as_bytes());
            actor_records.push(0);
            if actor_records.len() % 2 != 0 {
                actor_records.push(0);
            }
            // film count = 1, placeholder; the actual film offset is
            // appended below once the film file's layout is known.
            actor_records.extend_from_slice(&1u16.to_le_bytes());
            if actor_records.len() % 4 != 0 {
                actor_records.extend_from_slice(&[0, 0]);
            }
            // reserve 4 bytes for the film offset, patched in below.
            actor_records.extend_from_slice(&0u32.to_le_bytes());
        }

        // Lay out the film file: header, then the single film record,
        // followed by the cast's actor offsets.
        let film_header_len = 4 + 4; // one record
        let film_record_start = film_header_len;
        let mut film_bytes = film_record.clone();
        let count_off = film_bytes.len();
        film_bytes.extend_from_slice(&(names.len() as u16).to_le_bytes());
        if film_bytes.len() % 4 != 0 {
            film_bytes.extend_from_slice(&[0, 0]);
        }
        let _ = count_off;
        for off in &actor_offsets {
            film_bytes.extend_from_slice(&off.to_le_bytes());
        }

        // Patch each actor record's film offset (always offset
        // `film_record_start` since there's only one film).
        // Recompute each actor record's offset-field position.
        let mut cursor = 0usize;
        for name in &names {
            let name_field_len = name.len() + 1 + if (name.len() + 1) % 2 != 0 { 1 } else { 0 };
            let count_field_pos = cursor + name_field_len;
            let mut array_pos = count_field_pos + 2;
            if array_pos % 4 != 0 {
                array_pos += 2;
            }
            actor_records[array_pos..array_pos + 4]
                .copy_from_slice(&(film_record_start as u32).to_le_bytes());
            cursor = array_pos + 4;
        }

        // Assemble the actor file.
        let mut actor_file = Vec::new();
        actor_file.extend_from_slice(&(names.len() as u32).to_le_bytes());
        for off in &actor_offsets {
            actor_file.extend_from_slice(&off.to_le_bytes());
        }
        actor_file.extend_from_slice(&actor_records);

        // Assemble the movie file.
        let mut movie_file = Vec::new();
        movie_file.extend_from_slice(&1u32.to_le_bytes());
        movie_file.extend_from_slice(&(film_record_start as u32).to_le_bytes());
        movie_file.extend_from_slice(&film_bytes);

        std::fs::File::create(dir.path().join(ACTOR_FILE_NAME))
            .unwrap()
            .write_all(&actor_file)
            .unwrap();
        std::fs::File::create(dir.path().join(MOVIE_FILE_NAME))
            .unwrap()
            .write_all(&movie_file)
            .unwrap();

        dir
    }

    #[test]
    fn opens_and_is_good() {
        let dir = build_fixture();
        let db = Database::open(dir.path());
        assert!(db.good());
    }

    #[test]
    fn missing_directory_is_not_good() {
        let db = Database::open(Path::new("/nonexistent/for/six-degrees-tests"));
        assert!(!db.good());
    }

    #[test]
    fn credits_and_cast_are_bidirectionally_consistent() {
        let dir = build_fixture();
        let db = Database::open(dir.path());
        assert!(db.good());

        let credits = db.credits("Kevin Bacon").expect("actor should exist");
        assert_eq!(credits, vec![Film::new("Apollo 13", 1995)]);

        let cast = db.cast(&Film::new("Apollo 13", 1995)).expect("film should exist");
        assert_eq!(cast.len(), 3);
        assert!(cast.contains(&"Kevin Bacon".to_string()));
        assert!(cast.contains(&"Meryl Streep".to_string()));
        assert!(cast.contains(&"Tom Hanks".to_string()));
    }

    #[test]
    fn unknown_actor_or_film_returns_none() {
        let dir = build_fixture();
        let db = Database::open(dir.path());
        assert_eq!(db.credits("Nobody"), None);
        assert_eq!(db.cast(&Film::new("Nonexistent Film", 2000)), None);
    }

    #[test]
    fn random_player_samples_an_existing_actor() {
        let dir = build_fixture();
        let db = Database::open(dir.path());
        let mut rng = rand::thread_rng();
        let name = db.random_player(&mut rng).expect("database is non-empty");
        assert!(db.credits(&name).is_some());
    }
}
