//! Region catalog
//!
//! Static table of the regions the dashboard can show. Each region carries
//! the map position of its marker and the provider grid cell its weather is
//! requested for.

use serde::Serialize;

use crate::errors::DomainError;
use crate::value_objects::{GeoLocation, GridCoordinate};

/// A selectable dashboard region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    name: &'static str,
    english_name: &'static str,
    location: GeoLocation,
    grid: GridCoordinate,
}

impl Region {
    const fn new(
        name: &'static str,
        english_name: &'static str,
        latitude: f64,
        longitude: f64,
        nx: i32,
        ny: i32,
    ) -> Self {
        Self {
            name,
            english_name,
            location: GeoLocation::new_unchecked(latitude, longitude),
            grid: GridCoordinate::new_unchecked(nx, ny),
        }
    }

    /// Korean region name, the catalog key
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Romanized alias
    #[must_use]
    pub const fn english_name(&self) -> &'static str {
        self.english_name
    }

    /// Marker position
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        self.location
    }

    /// Provider grid cell
    #[must_use]
    pub const fn grid(&self) -> GridCoordinate {
        self.grid
    }

    fn matches(&self, query: &str) -> bool {
        self.name == query || self.english_name.eq_ignore_ascii_case(query)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.english_name)
    }
}

const REGIONS: [Region; 17] = [
    Region::new("서울", "Seoul", 37.5665, 126.9780, 60, 127),
    Region::new("대구", "Daegu", 35.8714, 128.6014, 89, 90),
    Region::new("부산", "Busan", 35.1796, 129.0756, 98, 76),
    Region::new("인천", "Incheon", 37.4563, 126.7052, 55, 124),
    Region::new("광주", "Gwangju", 35.1595, 126.8526, 58, 74),
    Region::new("대전", "Daejeon", 36.3504, 127.3845, 67, 100),
    Region::new("울산", "Ulsan", 35.5384, 129.3114, 102, 84),
    Region::new("경기", "Gyeonggi", 37.4138, 127.5183, 60, 120),
    Region::new("강원", "Gangwon", 37.8228, 128.1555, 73, 134),
    Region::new("충북", "Chungbuk", 36.6357, 127.4917, 69, 107),
    Region::new("충남", "Chungnam", 36.5184, 126.8000, 68, 100),
    Region::new("전북", "Jeonbuk", 35.7175, 127.1530, 63, 89),
    Region::new("전남", "Jeonnam", 34.8679, 126.9910, 51, 67),
    Region::new("경북", "Gyeongbuk", 36.4919, 128.8889, 87, 106),
    Region::new("경남", "Gyeongnam", 35.4606, 128.2132, 91, 77),
    Region::new("제주", "Jeju", 33.4996, 126.5312, 52, 38),
    Region::new("세종", "Sejong", 36.4800, 127.2890, 66, 103),
];

/// Name of the region selected when none is configured
pub const DEFAULT_REGION: &str = "대구";

/// Lookup over the static region table
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionCatalog;

impl RegionCatalog {
    /// All regions in display order
    #[must_use]
    pub fn all() -> &'static [Region] {
        &REGIONS
    }

    /// Find a region by Korean name or case-insensitive English alias
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownRegion` if no region matches.
    pub fn find(query: &str) -> Result<&'static Region, DomainError> {
        let query = query.trim();
        REGIONS
            .iter()
            .find(|region| region.matches(query))
            .ok_or_else(|| DomainError::unknown_region(query))
    }

    /// The default dashboard region
    #[must_use]
    pub fn default_region() -> &'static Region {
        &REGIONS[1]
    }
}
