//! The classification level lattice.
//!
//! Three handling levels, totally ordered: U < CUI < CUI//REL TO USA, FVEY.
//! Resolution works exclusively through `join` (least upper bound), which is
//! what makes the resolver order-insensitive: joins commute and associate, so
//! it never matters which signal arrives first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

/// A handling/sensitivity label for report content.
///
/// Variant order is rank order; the derived `Ord` is the lattice order.
/// Unknown tokens are rejected at the parse/deserialize boundary with
/// [`ClassifyError::InvalidLevel`] — there is no catch-all variant.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ClassificationLevel {
    /// Unclassified.
    #[default]
    #[serde(rename = "U")]
    Unclassified,
    /// Controlled Unclassified Information.
    #[serde(rename = "CUI")]
    Cui,
    /// CUI releasable to USA and FVEY partners.
    #[serde(rename = "CUIREL")]
    CuiRel,
}

impl ClassificationLevel {
    /// Numeric rank: U=0, CUI=1, CUIREL=2.
    pub fn rank(self) -> u8 {
        match self {
            Self::Unclassified => 0,
            Self::Cui => 1,
            Self::CuiRel => 2,
        }
    }

    /// Least upper bound of two levels.
    pub fn join(self, other: Self) -> Self {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// Join of an arbitrary collection of levels. Empty joins to U, the
    /// lattice identity.
    pub fn join_all<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        levels.into_iter().fold(Self::Unclassified, Self::join)
    }

    /// Wire token, as stored and exchanged: "U", "CUI", "CUIREL".
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Unclassified => "U",
            Self::Cui => "CUI",
            Self::CuiRel => "CUIREL",
        }
    }

    /// Portion marking used inside rendered output lines: "(U)", "(CUI)",
    /// "(CUI//REL TO USA, FVEY)" without the parentheses.
    pub fn marking(self) -> &'static str {
        match self {
            Self::Unclassified => "U",
            Self::Cui => "CUI",
            Self::CuiRel => "CUI//REL TO USA, FVEY",
        }
    }

    /// Full banner label shown on the classification header.
    pub fn banner_label(self) -> &'static str {
        match self {
            Self::Unclassified => "UNCLASSIFIED",
            Self::Cui => "CUI",
            Self::CuiRel => "CUI//REL TO USA, FVEY",
        }
    }
}

impl fmt::Display for ClassificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for ClassificationLevel {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(Self::Unclassified),
            "CUI" => Ok(Self::Cui),
            "CUIREL" => Ok(Self::CuiRel),
            other => Err(ClassifyError::InvalidLevel(other.to_string())),
        }
    }
}
