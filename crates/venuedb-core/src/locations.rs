//! Venue payloads accepted by the create and update endpoints.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::Coordinate;

const MAX_NAME_LEN: usize = 200;

/// A weekly opening window such as "Monday - Friday, 7:00am to 7:00pm".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningTime {
    pub days: String,
    pub opening: Option<String>,
    pub closing: Option<String>,
    pub closed: bool,
}

/// Raw create/update body.
///
/// `facilities` arrives as a single comma-separated string.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationInput {
    pub name: String,
    pub address: Option<String>,
    #[serde(default)]
    pub facilities: String,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    #[serde(default)]
    pub opening_times: Vec<OpeningTime>,
}

/// A venue that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub address: Option<String>,
    pub facilities: Vec<String>,
    pub coords: Coordinate,
    pub opening_times: Vec<OpeningTime>,
}

#[derive(Debug, Error, PartialEq)]
pub enum LocationInputError {
    #[error("name must be 1–200 characters")]
    InvalidName,

    #[error("lng and lat are required")]
    MissingCoordinates,

    #[error("coordinates out of range: lng {lng}, lat {lat}")]
    CoordinatesOutOfRange { lng: f64, lat: f64 },

    #[error("opening time {index}: {reason}")]
    InvalidOpeningTime { index: usize, reason: &'static str },
}

impl LocationInput {
    /// Validate and normalize the payload.
    ///
    /// # Errors
    ///
    /// Returns [`LocationInputError`] describing the first invalid field.
    pub fn validate(self) -> Result<NewLocation, LocationInputError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(LocationInputError::InvalidName);
        }

        let (Some(lng), Some(lat)) = (self.lng, self.lat) else {
            return Err(LocationInputError::MissingCoordinates);
        };
        if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
            return Err(LocationInputError::CoordinatesOutOfRange { lng, lat });
        }

        for (index, slot) in self.opening_times.iter().enumerate() {
            if slot.days.trim().is_empty() {
                return Err(LocationInputError::InvalidOpeningTime {
                    index,
                    reason: "days is required",
                });
            }
            if !slot.closed && (slot.opening.is_none() || slot.closing.is_none()) {
                return Err(LocationInputError::InvalidOpeningTime {
                    index,
                    reason: "opening and closing are required unless closed",
                });
            }
        }

        let address = self
            .address
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty());

        Ok(NewLocation {
            name,
            address,
            facilities: parse_facilities(&self.facilities),
            coords: Coordinate::new(lng, lat),
            opening_times: self.opening_times,
        })
    }
}

/// Split a comma-separated facility list, trimming entries and dropping empties.
#[must_use]
pub fn parse_facilities(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> LocationInput {
        LocationInput {
            name: "  Starcups ".to_string(),
            address: Some("125 High Street, Reading, RG6 1PS".to_string()),
            facilities: "Hot drinks, Food ,Premium wifi,".to_string(),
            lng: Some(-0.969_089_9),
            lat: Some(51.455_041),
            opening_times: vec![
                OpeningTime {
                    days: "Monday - Friday".to_string(),
                    opening: Some("7:00am".to_string()),
                    closing: Some("7:00pm".to_string()),
                    closed: false,
                },
                OpeningTime {
                    days: "Sunday".to_string(),
                    opening: None,
                    closing: None,
                    closed: true,
                },
            ],
        }
    }

    #[test]
    fn parse_facilities_trims_and_drops_empty_entries() {
        assert_eq!(
            parse_facilities("Hot drinks, Food ,Premium wifi,"),
            vec!["Hot drinks", "Food", "Premium wifi"]
        );
        assert!(parse_facilities("").is_empty());
        assert!(parse_facilities(" , ,").is_empty());
    }

    #[test]
    fn validate_normalizes_fields() {
        let location = input().validate().expect("valid input");
        assert_eq!(location.name, "Starcups");
        assert_eq!(location.facilities.len(), 3);
        assert_eq!(location.coords, Coordinate::new(-0.969_089_9, 51.455_041));
        assert_eq!(location.opening_times.len(), 2);
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut body = input();
        body.name = "   ".to_string();
        assert_eq!(body.validate(), Err(LocationInputError::InvalidName));
    }

    #[test]
    fn validate_requires_both_coordinates() {
        let mut body = input();
        body.lat = None;
        assert_eq!(body.validate(), Err(LocationInputError::MissingCoordinates));
    }

    #[test]
    fn validate_accepts_zero_coordinates() {
        let mut body = input();
        body.lng = Some(0.0);
        body.lat = Some(0.0);
        assert!(body.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_coordinates() {
        let mut body = input();
        body.lat = Some(91.0);
        assert!(matches!(
            body.validate(),
            Err(LocationInputError::CoordinatesOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_requires_hours_for_open_days() {
        let mut body = input();
        body.opening_times[0].closing = None;
        assert_eq!(
            body.validate(),
            Err(LocationInputError::InvalidOpeningTime {
                index: 0,
                reason: "opening and closing are required unless closed",
            })
        );
    }

    #[test]
    fn blank_address_becomes_none() {
        let mut body = input();
        body.address = Some("  ".to_string());
        assert!(body.validate().expect("valid").address.is_none());
    }

    #[test]
    fn input_deserializes_with_defaults() {
        let body: LocationInput =
            serde_json::from_str(r#"{"name":"Cafe","lng":1.5,"lat":2.5}"#).expect("parse");
        assert!(body.facilities.is_empty());
        assert!(body.opening_times.is_empty());
        assert!(body.address.is_none());
    }
}
