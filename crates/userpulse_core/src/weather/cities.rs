//! Bundled city selector data.
//!
//! Read-only reference data for the weather view; parsed once from the
//! embedded JSON document.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// One selectable city with its forecast coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CityRecord {
    pub city: String,
    pub lat: f64,
    pub lng: f64,
}

static CITIES: Lazy<Vec<CityRecord>> = Lazy::new(|| {
    serde_json::from_str(include_str!("cities.json"))
        .expect("bundled cities.json must be a valid city array")
});

/// Returns the bundled city list in selector order.
pub fn cities() -> &'static [CityRecord] {
    &CITIES
}

#[cfg(test)]
mod tests {
    use super::cities;

    #[test]
    fn bundled_cities_parse_and_have_plausible_coordinates() {
        let cities = cities();
        assert!(!cities.is_empty());
        for city in cities {
            assert!(!city.city.is_empty());
            assert!((-90.0..=90.0).contains(&city.lat), "{}", city.city);
            assert!((-180.0..=180.0).contains(&city.lng), "{}", city.city);
        }
    }

    #[test]
    fn tehran_is_present_with_known_coordinates() {
        let tehran = cities()
            .iter()
            .find(|record| record.city == "Tehran")
            .expect("Tehran must be bundled");
        assert!((tehran.lat - 35.7).abs() < 0.2);
        assert!((tehran.lng - 51.4).abs() < 0.2);
    }
}
