use std::{fmt::Display, str::FromStr};

use serde::{Serialize, Serializer};

/// An alias type for better code readability.
pub type Pixel = u32;

/// A mode an output can be driven at, written as `{width}x{height}`.
///
/// The derived ordering is lexicographic by `(width, height)`, which is the
/// order every resolution list of this crate is sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resolution {
    pub width: Pixel,
    pub height: Pixel,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseResolutionError {
    #[error("'{0}' isn't of the form <width>x<height>")]
    Format(String),

    #[error("'{0}' has a zero dimension")]
    Zero(String),
}

impl Resolution {
    pub fn new(width: Pixel, height: Pixel) -> Self {
        Self { width, height }
    }

    /// Returns `true` if `self` is larger than `other` in at least one dimension.
    pub fn exceeds(&self, other: &Resolution) -> bool {
        self.width > other.width || self.height > other.height
    }
}

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || ParseResolutionError::Format(s.to_string());

        let (width, height) = s.trim().split_once('x').ok_or_else(format_err)?;
        let width: Pixel = width.parse().map_err(|_| format_err())?;
        let height: Pixel = height.parse().map_err(|_| format_err())?;

        if width == 0 || height == 0 {
            return Err(ParseResolutionError::Zero(s.to_string()));
        }

        Ok(Self { width, height })
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Serialize for Resolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
