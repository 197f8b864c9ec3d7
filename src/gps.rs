//! GNSS location replies.
//!
//! Parses the position fields of a `+QGPSLOC` reply (`ddmm.mmmmN`,
//! `dddmm.mmmmE`) into decimal degrees and builds a map link.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GpsError;

const MAPS_URL: &str = "https://www.google.com/maps/place";

/// A position in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Link to the position on Google Maps.
    pub fn maps_link(&self) -> String {
        format!("{}/{}", MAPS_URL, self)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = GpsError;

    /// Parse a reply such as
    /// `+QGPSLOC: 061951.000,3150.7223N,11711.9293E,0.7,62.2,2,000.00,0.0,0.0,110513,09`.
    ///
    /// Only the second and third comma-separated fields are read.
    fn from_str(reply: &str) -> Result<Self, Self::Err> {
        let mut fields = reply.trim().split(',').skip(1);
        let lat = fields.next().ok_or(GpsError::MissingField("latitude"))?;
        let lon = fields.next().ok_or(GpsError::MissingField("longitude"))?;

        Ok(Self {
            latitude: parse_angle(lat, 2, 'N', 'S', "latitude")?,
            longitude: parse_angle(lon, 3, 'E', 'W', "longitude")?,
        })
    }
}

/// Parse `<degrees><minutes><hemisphere>` where degrees are `deg_digits` wide.
fn parse_angle(
    field: &str,
    deg_digits: usize,
    positive: char,
    negative: char,
    name: &'static str,
) -> Result<f64, GpsError> {
    let field = field.trim();
    let malformed = || GpsError::Malformed {
        field: name,
        value: field.to_string(),
    };

    let hemisphere = field.chars().last().ok_or_else(malformed)?;
    let number = &field[..field.len() - hemisphere.len_utf8()];
    if number.len() <= deg_digits || !number.is_char_boundary(deg_digits) {
        return Err(malformed());
    }

    let (deg, min) = number.split_at(deg_digits);
    let degrees: u32 = deg.parse().map_err(|_| malformed())?;
    let minutes: f64 = min.parse().map_err(|_| malformed())?;
    if !minutes.is_finite() {
        return Err(malformed());
    }
    let value = f64::from(degrees) + minutes / 60.0;

    match hemisphere.to_ascii_uppercase() {
        c if c == positive => Ok(value),
        c if c == negative => Ok(-value),
        _ => Err(GpsError::Hemisphere(hemisphere)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str =
        "+QGPSLOC: 061951.000,3150.7223N,11711.9293E,0.7,62.2,2,000.00,0.0,0.0,110513,09";

    #[test]
    fn test_parse_north_east() {
        let c: Coordinates = REPLY.parse().unwrap();
        assert_eq!(c.to_string(), "31.845372,117.198822");
        assert_eq!(
            c.maps_link(),
            "https://www.google.com/maps/place/31.845372,117.198822"
        );
    }

    #[test]
    fn test_parse_south_west() {
        let c: Coordinates = "+QGPSLOC: 010203.000,3351.0000S,15112.6000W,1.0"
            .parse()
            .unwrap();
        assert_eq!(c.to_string(), "-33.850000,-151.210000");
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            "+QGPSLOC: 061951.000".parse::<Coordinates>(),
            Err(GpsError::MissingField("latitude"))
        );
        assert_eq!(
            "+QGPSLOC: 061951.000,3150.7223N".parse::<Coordinates>(),
            Err(GpsError::MissingField("longitude"))
        );
    }

    #[test]
    fn test_malformed_fields() {
        assert!(matches!(
            "x,31abN,11711.9293E".parse::<Coordinates>(),
            Err(GpsError::Malformed { field: "latitude", .. })
        ));
        assert!(matches!(
            "x,3150.7223N,".parse::<Coordinates>(),
            Err(GpsError::Malformed { field: "longitude", .. })
        ));
        assert!(matches!(
            "x,31N,11711.9293E".parse::<Coordinates>(),
            Err(GpsError::Malformed { field: "latitude", .. })
        ));
    }

    #[test]
    fn test_unknown_hemisphere() {
        assert_eq!(
            "x,3150.7223Q,11711.9293E".parse::<Coordinates>(),
            Err(GpsError::Hemisphere('Q'))
        );
    }

    #[test]
    fn test_lowercase_hemisphere() {
        let c: Coordinates = "x,3351.0000s,15112.6000w".parse().unwrap();
        assert_eq!(c.to_string(), "-33.850000,-151.210000");

        let c: Coordinates = "x,3150.7223n,11711.9293e".parse().unwrap();
        assert_eq!(c.to_string(), "31.845372,117.198822");
    }

    #[test]
    fn test_serializes_as_json() {
        let c: Coordinates = REPLY.parse().unwrap();
        let json = serde_json::to_value(c).unwrap();
        assert!((json["latitude"].as_f64().unwrap() - 31.845372).abs() < 1e-6);
    }
}
