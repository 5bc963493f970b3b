//! Ring closure and GeoJSON output.

use serde::ser::{Serialize, Serializer};

use super::types::{IsochroneProperties, IsochroneResult};
use crate::coord::Position;

/// Appends `ring[0]` if the ring is not already closed.
///
/// Closure is checked by exact equality. Interior points are never
/// reordered or deduplicated. An empty ring is returned unchanged.
pub fn close_ring(mut ring: Vec<Position>) -> Vec<Position> {
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(first);
        }
    }
    ring
}

/// Returns true if the ring's first and last positions are identical.
pub fn is_closed(ring: &[Position]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) => first == last,
        _ => false,
    }
}

/// Closes `ring` and pairs it with `properties`.
pub fn assemble(ring: Vec<Position>, properties: IsochroneProperties) -> IsochroneResult {
    IsochroneResult {
        ring: close_ring(ring),
        properties,
    }
}

#[derive(serde::Serialize)]
struct FeatureRef<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: PolygonRef<'a>,
    properties: &'a IsochroneProperties,
}

#[derive(serde::Serialize)]
struct PolygonRef<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [&'a [Position]; 1],
}

impl Serialize for IsochroneResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FeatureRef {
            kind: "Feature",
            geometry: PolygonRef {
                kind: "Polygon",
                coordinates: [self.ring.as_slice()],
            },
            properties: &self.properties,
        }
        .serialize(serializer)
    }
}

impl IsochroneResult {
    /// Serialises the result as a GeoJSON Feature string.
    pub fn to_geojson(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
