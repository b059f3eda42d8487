//! Type tags of GeoJSON objects.
//!
//! The `type` member is the only thing that tells what a JSON object in a GeoJSON document is.
//! [`GeometryType`] enumerates the seven geometry tags together with the depth of the
//! coordinate arrays each of them carries, [`GeoJsonType`] adds the two feature tags on top.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::GeoTreeError;

/// Tag of one of the seven GeoJSON geometry types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryType {
    /// Single position.
    Point,
    /// Sequence of positions.
    LineString,
    /// Sequence of linear rings.
    Polygon,
    /// Sequence of positions, each one a separate point.
    MultiPoint,
    /// Sequence of line strings.
    MultiLineString,
    /// Sequence of polygons.
    MultiPolygon,
    /// Sequence of geometries of any type.
    GeometryCollection,
}

impl GeometryType {
    /// All geometry types, in the order of their definition.
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    /// Value of the `type` member for this geometry type.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Nesting depth of the `coordinates` array of the geometry type.
    ///
    /// A position is depth 1, so `Point` is 1 and `MultiPolygon` is 4. Geometry collections have
    /// no coordinates of their own and return `None`.
    pub fn coordinates_depth(&self) -> Option<usize> {
        match self {
            GeometryType::Point => Some(1),
            GeometryType::LineString | GeometryType::MultiPoint => Some(2),
            GeometryType::Polygon | GeometryType::MultiLineString => Some(3),
            GeometryType::MultiPolygon => Some(4),
            GeometryType::GeometryCollection => None,
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = GeoTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GeoTreeError::UnknownGeometryType(s.to_string()))
    }
}

/// Tag of any GeoJSON object: a geometry, a feature or a feature collection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeoJsonType {
    /// One of the geometry types.
    Geometry(GeometryType),
    /// `Feature` object.
    Feature,
    /// `FeatureCollection` object.
    FeatureCollection,
}

impl GeoJsonType {
    /// Value of the `type` member for this object type.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoJsonType::Geometry(geometry_type) => geometry_type.as_str(),
            GeoJsonType::Feature => "Feature",
            GeoJsonType::FeatureCollection => "FeatureCollection",
        }
    }
}

impl Display for GeoJsonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeoJsonType {
    type Err = GeoTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Feature" => Ok(GeoJsonType::Feature),
            "FeatureCollection" => Ok(GeoJsonType::FeatureCollection),
            other => other.parse().map(GeoJsonType::Geometry),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn tags_round_trip() {
        for geometry_type in GeometryType::ALL {
            assert_eq!(
                geometry_type.as_str().parse::<GeometryType>().ok(),
                Some(geometry_type)
            );

            let geojson_type = GeoJsonType::Geometry(geometry_type);
            assert_eq!(geojson_type.to_string(), geometry_type.as_str());
            assert_eq!(
                geojson_type.to_string().parse::<GeoJsonType>().ok(),
                Some(geojson_type)
            );
        }

        for geojson_type in [GeoJsonType::Feature, GeoJsonType::FeatureCollection] {
            assert_eq!(
                geojson_type.to_string().parse::<GeoJsonType>().ok(),
                Some(geojson_type)
            );
        }
        assert_eq!(GeoJsonType::FeatureCollection.to_string(), "FeatureCollection");
    }

    #[test]
    fn depth_table() {
        assert_eq!(GeometryType::Point.coordinates_depth(), Some(1));
        assert_eq!(GeometryType::LineString.coordinates_depth(), Some(2));
        assert_eq!(GeometryType::MultiPoint.coordinates_depth(), Some(2));
        assert_eq!(GeometryType::Polygon.coordinates_depth(), Some(3));
        assert_eq!(GeometryType::MultiLineString.coordinates_depth(), Some(3));
        assert_eq!(GeometryType::MultiPolygon.coordinates_depth(), Some(4));
        assert_eq!(GeometryType::GeometryCollection.coordinates_depth(), None);
    }

    #[test]
    fn unknown_tags() {
        assert_matches!(
            "Circle".parse::<GeometryType>(),
            Err(GeoTreeError::UnknownGeometryType(t)) if t == "Circle"
        );
        assert_matches!(
            "Feature".parse::<GeometryType>(),
            Err(GeoTreeError::UnknownGeometryType(_))
        );
        assert_eq!(
            "Feature".parse::<GeoJsonType>().ok(),
            Some(GeoJsonType::Feature)
        );
        assert_eq!(
            "Polygon".parse::<GeoJsonType>().ok(),
            Some(GeoJsonType::Geometry(GeometryType::Polygon))
        );
        assert_matches!(
            "point".parse::<GeoJsonType>(),
            Err(GeoTreeError::UnknownGeometryType(_))
        );
    }
}
