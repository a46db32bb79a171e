use serde::Serialize;

use formwarden_people::{Location, PersonBase};

// -------------------------
// Response DTOs
// -------------------------

/// A person's public fields merged flat with their location.
#[derive(Debug, Serialize)]
pub struct PersonAtLocation<'a> {
    #[serde(flatten)]
    pub person: &'a PersonBase,
    #[serde(flatten)]
    pub location: &'a Location,
}

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    #[serde(rename = "Filename")]
    pub filename: Option<String>,
    #[serde(rename = "Format")]
    pub format: Option<String>,
    #[serde(rename = "Size(kb)")]
    pub size_kb: f64,
}

impl UploadedImage {
    pub fn new(filename: Option<String>, format: Option<String>, len: usize) -> Self {
        Self {
            filename,
            format,
            size_kb: kib_rounded(len),
        }
    }
}

/// Size in KiB rounded to two decimals.
fn kib_rounded(len: usize) -> f64 {
    ((len as f64 / 1024.0) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sizes_round_to_two_decimals() {
        assert_eq!(kib_rounded(0), 0.0);
        assert_eq!(kib_rounded(1024), 1.0);
        assert_eq!(kib_rounded(1536), 1.5);
        assert_eq!(kib_rounded(1000), 0.98);
    }

    #[test]
    fn person_at_location_is_flat() {
        let person = PersonBase {
            first_name: "Miguel".into(),
            last_name: "Torres".into(),
            age: 25,
            hair_color: None,
            is_married: None,
            email: None,
            website: None,
        };
        let location = Location {
            city: "Caracas".into(),
            state: "Distrito Capital".into(),
            country: "Venezuela".into(),
        };

        let value = serde_json::to_value(PersonAtLocation {
            person: &person,
            location: &location,
        })
        .unwrap();
        assert_eq!(value["first_name"], "Miguel");
        assert_eq!(value["country"], "Venezuela");
        assert_eq!(value["hair_color"], json!(null));
    }
}
