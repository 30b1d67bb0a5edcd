use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Genre {
    Flat,
    FamilyHouse,
    Farm,
    Condominium,
}

impl Genre {
    pub const ALL: [Genre; 4] = [
        Genre::Flat,
        Genre::FamilyHouse,
        Genre::Farm,
        Genre::Condominium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Flat => "FLAT",
            Genre::FamilyHouse => "FAMILYHOUSE",
            Genre::Farm => "FARM",
            Genre::Condominium => "CONDOMINIUM",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown genre token, kept verbatim for error reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown genre '{0}' (expected one of {known})", known = known_genres())]
pub struct UnknownGenre(pub String);

fn known_genres() -> String {
    Genre::ALL.map(|genre| genre.as_str()).join(", ")
}

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_uppercase();
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == token)
            .ok_or_else(|| UnknownGenre(s.trim().to_string()))
    }
}

impl TryFrom<String> for Genre {
    type Error = UnknownGenre;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
