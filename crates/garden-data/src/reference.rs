//! Reference locations and the climate profiles the mock data is built from.
//!
//! Every lookup resolves a query coordinate to the nearest entry of
//! [`REFERENCE_POINTS`] and then reads that entry's zone profile.

use crate::types::Coordinate;

/// Zone used when a zone code has no profile of its own.
pub const DEFAULT_ZONE: &str = "7a";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilProfile {
    pub classification: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_SOIL: SoilProfile = SoilProfile {
    classification: "Loam",
    description: "Medium-textured soil with balanced properties",
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub name: &'static str,
    pub coordinate: Coordinate,
    pub zone: &'static str,
    pub soil: Option<SoilProfile>,
}

impl ReferencePoint {
    pub fn soil_or_default(&self) -> SoilProfile {
        self.soil.unwrap_or(DEFAULT_SOIL)
    }
}

/// Reference locations, in lookup priority order.
pub const REFERENCE_POINTS: [ReferencePoint; 5] = [
    ReferencePoint {
        name: "Miami",
        coordinate: Coordinate {
            latitude: 25.0,
            longitude: -80.0,
        },
        zone: "10b",
        soil: Some(SoilProfile {
            classification: "Sandy Loam",
            description: "Well-draining soil with high organic content",
        }),
    },
    ReferencePoint {
        name: "New York",
        coordinate: Coordinate {
            latitude: 40.0,
            longitude: -74.0,
        },
        zone: "7a",
        soil: Some(SoilProfile {
            classification: "Clay Loam",
            description: "Rich soil with good water retention",
        }),
    },
    ReferencePoint {
        name: "Los Angeles",
        coordinate: Coordinate {
            latitude: 34.0,
            longitude: -118.0,
        },
        zone: "10a",
        soil: None,
    },
    ReferencePoint {
        name: "Seattle",
        coordinate: Coordinate {
            latitude: 47.0,
            longitude: -122.0,
        },
        zone: "8b",
        soil: None,
    },
    ReferencePoint {
        name: "Chicago",
        coordinate: Coordinate {
            latitude: 41.0,
            longitude: -87.0,
        },
        zone: "6a",
        soil: None,
    },
];

/// Return the reference closest to `at` by Euclidean distance.
///
/// Ties go to the earliest entry. Returns `None` only for an empty slice.
pub fn nearest_reference<'a>(
    at: &Coordinate,
    references: &'a [ReferencePoint],
) -> Option<&'a ReferencePoint> {
    let mut best: Option<(&ReferencePoint, f64)> = None;
    for reference in references {
        let distance = at.euclidean_distance(&reference.coordinate);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((reference, distance)),
        }
    }
    best.map(|(reference, _)| reference)
}

/// Resolve `at` against the built-in reference set.
pub fn resolve(at: &Coordinate) -> &'static ReferencePoint {
    match nearest_reference(at, &REFERENCE_POINTS) {
        Some(reference) => reference,
        None => &REFERENCE_POINTS[1],
    }
}

/// Find a reference location by name, ignoring case.
pub fn find_by_name(name: &str) -> Option<&'static ReferencePoint> {
    REFERENCE_POINTS
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
}

/// Climate tables for one hardiness zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateProfile {
    pub zone: &'static str,
    /// (month, day) of the typical last spring frost
    pub last_frost: (u32, u32),
    /// (month, day) of the typical first autumn frost
    pub first_frost: (u32, u32),
    /// Days before/after the last-frost anchor
    pub last_frost_spread: (i64, i64),
    /// Days before/after the first-frost anchor
    pub first_frost_spread: (i64, i64),
    /// Monthly rainfall in inches, January first
    pub rainfall_in: [f64; 12],
    /// Monthly mean temperature in °C
    pub temperature_c: [f64; 12],
    /// Mean daily sunshine in minutes
    pub sunshine_mins: [f64; 12],
}

pub const CLIMATE_PROFILES: [ClimateProfile; 5] = [
    // Tropical, wet summer
    ClimateProfile {
        zone: "10b",
        last_frost: (1, 15),
        first_frost: (12, 15),
        last_frost_spread: (7, 7),
        first_frost_spread: (7, 7),
        rainfall_in: [2.2, 2.1, 2.6, 3.4, 5.5, 8.5, 6.5, 8.2, 8.4, 6.3, 3.4, 2.2],
        temperature_c: [20.1, 20.9, 22.3, 24.2, 26.4, 28.0, 28.7, 28.8, 28.1, 26.4, 23.6, 21.3],
        sunshine_mins: [
            471.0, 486.0, 522.0, 558.0, 540.0, 456.0, 498.0, 480.0, 432.0, 438.0, 438.0, 444.0,
        ],
    },
    // Mediterranean
    ClimateProfile {
        zone: "10a",
        last_frost: (2, 1),
        first_frost: (12, 1),
        last_frost_spread: (14, 14),
        first_frost_spread: (14, 14),
        rainfall_in: [3.1, 3.8, 2.5, 0.9, 0.3, 0.1, 0.0, 0.1, 0.2, 0.4, 1.2, 2.3],
        temperature_c: [14.3, 14.8, 15.9, 17.3, 18.8, 20.6, 22.9, 23.4, 22.9, 20.8, 17.3, 14.2],
        sunshine_mins: [
            450.0, 480.0, 516.0, 570.0, 558.0, 576.0, 690.0, 672.0, 588.0, 528.0, 468.0, 438.0,
        ],
    },
    // Maritime
    ClimateProfile {
        zone: "8b",
        last_frost: (3, 15),
        first_frost: (11, 15),
        last_frost_spread: (21, 21),
        first_frost_spread: (21, 21),
        rainfall_in: [5.6, 3.5, 3.7, 2.7, 2.0, 1.5, 0.7, 0.9, 1.6, 3.5, 6.1, 5.6],
        temperature_c: [5.6, 6.3, 8.3, 10.7, 14.0, 16.7, 19.6, 19.8, 17.0, 12.4, 8.1, 5.3],
        sunshine_mins: [
            132.0, 180.0, 276.0, 366.0, 456.0, 498.0, 600.0, 546.0, 414.0, 252.0, 138.0, 108.0,
        ],
    },
    // Humid continental
    ClimateProfile {
        zone: "7a",
        last_frost: (4, 15),
        first_frost: (10, 15),
        last_frost_spread: (30, 30),
        first_frost_spread: (30, 30),
        rainfall_in: [3.6, 3.0, 4.0, 4.1, 4.0, 3.8, 4.6, 4.1, 3.7, 3.5, 3.4, 3.5],
        temperature_c: [0.5, 1.7, 5.6, 11.5, 17.0, 22.1, 25.0, 24.4, 20.5, 14.3, 8.6, 3.2],
        sunshine_mins: [
            300.0, 330.0, 384.0, 420.0, 468.0, 510.0, 540.0, 492.0, 438.0, 402.0, 306.0, 270.0,
        ],
    },
    // Continental
    ClimateProfile {
        zone: "6a",
        last_frost: (5, 1),
        first_frost: (10, 1),
        last_frost_spread: (30, 30),
        first_frost_spread: (30, 30),
        rainfall_in: [1.8, 1.8, 2.5, 3.4, 3.7, 3.8, 3.7, 3.5, 3.3, 2.7, 2.8, 2.2],
        temperature_c: [-3.2, -1.2, 4.4, 10.5, 16.6, 22.2, 24.8, 23.9, 19.9, 12.9, 5.8, -0.3],
        sunshine_mins: [
            270.0, 300.0, 372.0, 432.0, 522.0, 588.0, 606.0, 552.0, 462.0, 378.0, 234.0, 204.0,
        ],
    },
];

/// Climate profile for `zone`, falling back to the default zone's profile.
pub fn profile_for_zone(zone: &str) -> &'static ClimateProfile {
    CLIMATE_PROFILES
        .iter()
        .find(|p| p.zone == zone)
        .or_else(|| CLIMATE_PROFILES.iter().find(|p| p.zone == DEFAULT_ZONE))
        .unwrap_or(&CLIMATE_PROFILES[3])
}
