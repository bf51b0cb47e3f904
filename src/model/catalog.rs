//! The fixed genre catalog the backend was trained on

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the ten music styles songs are grouped under
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Blues,
    Classical,
    Jazz,
    Reggae,
    Country,
    Rock,
    Metal,
    Disco,
    HipHop,
    Pop,
}

impl Genre {
    /// Catalog order, as presented to the user
    pub const ALL: [Genre; 10] = [
        Genre::Blues,
        Genre::Classical,
        Genre::Jazz,
        Genre::Reggae,
        Genre::Country,
        Genre::Rock,
        Genre::Metal,
        Genre::Disco,
        Genre::HipHop,
        Genre::Pop,
    ];

    /// Identifier used in API paths
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Blues => "blues",
            Genre::Classical => "classical",
            Genre::Jazz => "jazz",
            Genre::Reggae => "reggae",
            Genre::Country => "country",
            Genre::Rock => "rock",
            Genre::Metal => "metal",
            Genre::Disco => "disco",
            Genre::HipHop => "hiphop",
            Genre::Pop => "pop",
        }
    }

    /// Position in [`Genre::ALL`]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|g| *g == self).unwrap_or(0)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown genre: {0}")]
pub struct UnknownGenre(pub String);

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == wanted)
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}

/// Static view over the closed set of genres
pub struct GenreCatalog;

impl GenreCatalog {
    pub fn genres() -> &'static [Genre] {
        &Genre::ALL
    }

    /// Genre the song list opens with: the first catalog entry
    pub fn default_genre() -> Genre {
        Genre::ALL[0]
    }

    pub fn get(index: usize) -> Option<Genre> {
        Genre::ALL.get(index).copied()
    }

    pub fn len() -> usize {
        Genre::ALL.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_ten_genres_starting_with_blues() {
        assert_eq!(GenreCatalog::len(), 10);
        assert_eq!(GenreCatalog::default_genre(), Genre::Blues);
        assert_eq!(GenreCatalog::get(9), Some(Genre::Pop));
        assert_eq!(GenreCatalog::get(10), None);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("HipHop".parse::<Genre>(), Ok(Genre::HipHop));
        assert_eq!(" jazz ".parse::<Genre>(), Ok(Genre::Jazz));
        assert!("polka".parse::<Genre>().is_err());
    }

    #[test]
    fn string_form_round_trips_through_serde_and_display() {
        for genre in Genre::ALL {
            let json = serde_json::to_string(&genre).unwrap();
            assert_eq!(json, format!("\"{}\"", genre));
            assert_eq!(genre.to_string().parse::<Genre>(), Ok(genre));
            assert_eq!(Genre::ALL[genre.index()], genre);
        }
    }
}
