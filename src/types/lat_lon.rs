/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use bikeshare_weather::LatLon;
///
/// let dc = LatLon::WASHINGTON_DC;
/// assert_eq!(dc.0, 38.9072); // Latitude
/// assert_eq!(dc.1, -77.0369); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    /// Downtown Washington, DC. All requests default to this location.
    pub const WASHINGTON_DC: LatLon = LatLon(38.9072, -77.0369);

    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lon(&self) -> f64 {
        self.1
    }
}

impl Default for LatLon {
    fn default() -> Self {
        Self::WASHINGTON_DC
    }
}
