//! Recipe ratings

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Rating must be between 1 and 5, got {0}")]
pub struct RatingError(pub i64);

/// A star rating, 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub fn new(stars: i64) -> Result<Self, RatingError> {
        if (MIN_RATING as i64..=MAX_RATING as i64).contains(&stars) {
            Ok(Self(stars as u8))
        } else {
            Err(RatingError(stars))
        }
    }

    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.0 as i64
    }
}

/// Body for POST /recipes/{id}/rate
#[derive(Debug, Clone, Serialize)]
pub struct RatingRequest {
    pub rating: Rating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).unwrap().stars(), 1);
        assert_eq!(Rating::new(5).unwrap().stars(), 5);
        assert_eq!(Rating::new(6), Err(RatingError(6)));
        assert!(Rating::new(-3).is_err());
    }

    #[test]
    fn test_serde() {
        let body = RatingRequest { rating: Rating::new(4).unwrap() };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"rating":4}"#);
        assert!(serde_json::from_str::<Rating>("9").is_err());
        assert_eq!(serde_json::from_str::<Rating>("3").unwrap().stars(), 3);
    }
}
