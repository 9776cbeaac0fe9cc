//! Pure, read-only functions that decode actor and film records out of a
//! memory-mapped byte view at a given absolute offset. Knows nothing about
//! search, indices, or files — only the record layouts from spec.md §3/§6.

use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

use crate::film::Film;

/// A record's fields could not be decoded from the bytes at an offset.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CorruptRecord {
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),
    #[error("read of {len} bytes at offset {offset} runs past the end of the mapping")]
    OutOfRange { offset: usize, len: usize },
}

type Result<T> = std::result::Result<T, CorruptRecord>;

/// Scans from `off` for a NUL byte and returns the text before it
/// (not including the terminator). Fails if the scan runs past the
/// view's end without finding one.
pub fn read_nul_terminated_string(view: &[u8], off: usize) -> Result<&str> {
    let bytes = view
        .get(off..)
        .ok_or(CorruptRecord::OutOfRange { offset: off, len: 1 })?;
    let nul = bytes
        .iter()
        .position(|&b| b == 0)
        .ok_or(CorruptRecord::UnterminatedString(off))?;
    std::str::from_utf8(&bytes[..nul]).map_err(|_| CorruptRecord::UnterminatedString(off))
}

/// Reads a little-endian `u16` at `off`, tolerant of misalignment.
pub fn read_u16(view: &[u8], off: usize) -> Result<u16> {
    let bytes = view
        .get(off..off + 2)
        .ok_or(CorruptRecord::OutOfRange { offset: off, len: 2 })?;
    Ok(LittleEndian::read_u16(bytes))
}

/// Reads a little-endian `u32` at `off`, tolerant of misalignment.
pub fn read_u32(view: &[u8], off: usize) -> Result<u32> {
    let bytes = view
        .get(off..off + 4)
        .ok_or(CorruptRecord::OutOfRange { offset: off, len: 4 })?;
    Ok(LittleEndian::read_u32(bytes))
}

/// Reads a single byte at `off`.
pub fn read_u8(view: &[u8], off: usize) -> Result<u8> {
    view.get(off)
        .copied()
        .ok_or(CorruptRecord::OutOfRange { offset: off, len: 1 })
}

/// Returns `off` if already 4-byte aligned, else `off + 2` (the layout
/// only ever needs to close a 2-byte gap to reach 4-alignment).
pub fn aligned_to_4(off: usize) -> usize {
    if off % 4 == 0 {
        off
    } else {
        off + 2
    }
}

/// For an actor record whose name occupies `name_end` (the offset just
/// past the NUL terminator), returns the first even byte at or after it —
/// one pad byte is inserted when `name_end` is odd.
fn pad_to_even(off: usize) -> usize {
    if off % 2 == 0 {
        off
    } else {
        off + 1
    }
}

/// Computes the offset of the 16-bit film count that follows an actor's
/// name, given the record's base offset `r`.
pub fn padded_name_end(view: &[u8], r: usize) -> Result<usize> {
    let name = read_nul_terminated_string(view, r)?;
    Ok(pad_to_even(r + name.len() + 1))
}

/// Computes the offset of the 16-bit cast count that follows a film's
/// title and year byte, given the record's base offset `r`.
pub fn padded_title_year_end(view: &[u8], r: usize) -> Result<usize> {
    let title = read_nul_terminated_string(view, r)?;
    Ok(pad_to_even(r + title.len() + 2))
}

/// Reads `count` consecutive little-endian `u32` offsets starting at `off`.
fn read_offset_array(view: &[u8], off: usize, count: u16) -> Result<Vec<u32>> {
    let count = count as usize;
    let len = count * 4;
    let bytes = view
        .get(off..off + len)
        .ok_or(CorruptRecord::OutOfRange { offset: off, len })?;
    Ok((0..count)
        .map(|i| LittleEndian::read_u32(&bytes[i * 4..i * 4 + 4]))
        .collect())
}

/// A decoded actor record: the actor's name plus the byte offsets (into
/// the film file) of each of their credits.
pub struct ActorRecord<'a> {
    pub name: &'a str,
    pub film_offsets: Vec<u32>,
}

/// Decodes the actor record at offset `r`: name, then its padded 16-bit
/// film count, then the 4-aligned array of film-file offsets.
pub fn decode_actor_record(view: &[u8], r: usize) -> Result<ActorRecord<'_>> {
    let name = read_nul_terminated_string(view, r)?;
    let count_off = padded_name_end(view, r)?;
    let count = read_u16(view, count_off)?;
    let array_off = aligned_to_4(count_off + 2);
    let film_offsets = read_offset_array(view, array_off, count)?;
    Ok(ActorRecord { name, film_offsets })
}

/// Decodes just the name of the actor record at offset `r`, without
/// touching the film count or offset array. Used by `cast()`, which only
/// needs names.
pub fn decode_actor_name(view: &[u8], r: usize) -> Result<&str> {
    read_nul_terminated_string(view, r)
}

/// A decoded film record: title, year, plus the byte offsets (into the
/// actor file) of each cast member.
pub struct FilmRecord<'a> {
    pub title: &'a str,
    pub year: u16,
    pub actor_offsets: Vec<u32>,
}

/// Decodes the film record at offset `r`: title, year byte, then its
/// padded 16-bit cast count, then the 4-aligned array of actor-file
/// offsets.
pub fn decode_film_record(view: &[u8], r: usize) -> Result<FilmRecord<'_>> {
    let title = read_nul_terminated_string(view, r)?;
    let year_off = r + title.len() + 1;
    let year = Film::year_from_byte(read_u8(view, year_off)?);
    let count_off = padded_title_year_end(view, r)?;
    let count = read_u16(view, count_off)?;
    let array_off = aligned_to_4(count_off + 2);
    let actor_offsets = read_offset_array(view, array_off, count)?;
    Ok(FilmRecord {
        title,
        year,
        actor_offsets,
    })
}

/// Decodes just the title and year of the film record at offset `r`.
pub fn decode_film(view: &[u8], r: usize) -> Result<Film> {
    let title = read_nul_terminated_string(view, r)?;
    let year_off = r + title.len() + 1;
    let year = Film::year_from_byte(read_u8(view, year_off)?);
    Ok(Film::new(title, year))
}
