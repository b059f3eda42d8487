//! Top level GeoJSON objects and reading/writing them as text.

use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::bounding_box::{BoundingBox, HasBoundingBox};
use crate::error::GeoTreeError;
use crate::feature::Feature;
use crate::feature_collection::FeatureCollection;
use crate::geometry::{Geometry, MultiPoint};
use crate::geometry_type::GeoJsonType;
use crate::object::{as_object, read_type};

/// Any GeoJSON object that can appear at the top level of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    /// A bare geometry.
    Geometry(Geometry),
    /// A single feature.
    Feature(Feature),
    /// A collection of features.
    FeatureCollection(FeatureCollection),
}

impl GeoJson {
    /// Resolves an untyped JSON tree, dispatching on its `type` member.
    pub fn from_value(value: &Value) -> Result<Self, GeoTreeError> {
        let object = as_object(value, "root")?;
        let geojson_type: GeoJsonType = read_type(object)?.parse()?;
        log::trace!("Resolving {geojson_type} object");

        Ok(match geojson_type {
            GeoJsonType::Geometry(_) => Self::Geometry(Geometry::from_object(object)?),
            GeoJsonType::Feature => Self::Feature(Feature::from_object(object)?),
            GeoJsonType::FeatureCollection => {
                Self::FeatureCollection(FeatureCollection::from_object(object)?)
            }
        })
    }

    /// Converts the object into an untyped JSON tree.
    pub fn to_value(&self) -> Value {
        match self {
            GeoJson::Geometry(v) => v.to_value(),
            GeoJson::Feature(v) => v.to_value(),
            GeoJson::FeatureCollection(v) => v.to_value(),
        }
    }

    /// Type tag of the object.
    pub fn geojson_type(&self) -> GeoJsonType {
        match self {
            GeoJson::Geometry(v) => GeoJsonType::Geometry(v.geometry_type()),
            GeoJson::Feature(_) => Feature::TYPE,
            GeoJson::FeatureCollection(_) => FeatureCollection::TYPE,
        }
    }

    /// Encodes the object as compact JSON bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>, GeoTreeError> {
        Ok(serde_json::to_vec(&self.to_value())?)
    }

    /// Returns the geometries the object is made of.
    ///
    /// For a feature collection these are the geometries of its features in order, for a
    /// feature its geometry, and for a geometry the geometry itself. Features without a
    /// geometry are skipped.
    pub fn to_geometry_array(&self) -> Vec<Geometry> {
        match self {
            GeoJson::Geometry(geometry) => vec![geometry.clone()],
            GeoJson::Feature(feature) => feature.geometry().cloned().into_iter().collect(),
            GeoJson::FeatureCollection(collection) => collection
                .features()
                .iter()
                .filter_map(Feature::geometry)
                .cloned()
                .collect(),
        }
    }

    /// Collects every position of the object into a single multipoint.
    pub fn to_multi_point(&self) -> MultiPoint {
        MultiPoint::new(
            self.to_geometry_array()
                .iter()
                .flat_map(Geometry::positions)
                .collect(),
        )
    }
}

impl HasBoundingBox for GeoJson {
    fn bbox(&self) -> BoundingBox {
        match self {
            GeoJson::Geometry(v) => v.bbox(),
            GeoJson::Feature(v) => v.bbox(),
            GeoJson::FeatureCollection(v) => v.bbox(),
        }
    }

    fn compute_bbox(&self) -> BoundingBox {
        match self {
            GeoJson::Geometry(v) => v.compute_bbox(),
            GeoJson::Feature(v) => v.compute_bbox(),
            GeoJson::FeatureCollection(v) => v.compute_bbox(),
        }
    }
}

impl From<Geometry> for GeoJson {
    fn from(value: Geometry) -> Self {
        Self::Geometry(value)
    }
}

impl From<Feature> for GeoJson {
    fn from(value: Feature) -> Self {
        Self::Feature(value)
    }
}

impl From<FeatureCollection> for GeoJson {
    fn from(value: FeatureCollection) -> Self {
        Self::FeatureCollection(value)
    }
}

impl FromStr for GeoJson {
    type Err = GeoTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Display for GeoJson {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl Serialize for GeoJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GeoJson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}

/// Parses GeoJSON text.
pub fn parse(text: &str) -> Result<GeoJson, GeoTreeError> {
    let value: Value = serde_json::from_str(text)?;
    GeoJson::from_value(&value)
}

/// Parses GeoJSON from UTF-8 encoded bytes.
pub fn parse_slice(bytes: &[u8]) -> Result<GeoJson, GeoTreeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    GeoJson::from_value(&value)
}

/// Reads and parses a GeoJSON file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<GeoJson, GeoTreeError> {
    let path = path.as_ref();
    log::debug!("Reading GeoJSON from {}", path.display());
    let bytes = std::fs::read(path)?;
    parse_slice(&bytes)
}

/// Writes the object to a file as compact JSON, replacing the file if it exists.
pub fn write_file(geojson: &GeoJson, path: impl AsRef<Path>) -> Result<(), GeoTreeError> {
    let path = path.as_ref();
    log::debug!("Writing {} to {}", geojson.geojson_type(), path.display());
    std::fs::write(path, geojson.to_vec()?)?;
    Ok(())
}
