//! Pure string-heuristic filters: the title classifier and the
//! location-residency gate. No I/O anywhere in this module tree.

pub mod location;
pub mod title;
