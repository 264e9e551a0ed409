//! Domain models.

mod candidate;
mod film;

pub use candidate::{LinkCandidate, MatchSignal};
pub use film::{CanonicalFilm, DEFAULT_POSTER_URL};

#[cfg(test)]
pub(crate) use film::sample_film;
