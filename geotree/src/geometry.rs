//! GeoJSON geometries.
//!
//! [`Geometry`] is a closed set of the seven geometry types defined by GeoJSON. A geometry is
//! resolved from an untyped JSON tree by [`Geometry::from_value`]: the `type` member selects the
//! variant, and the variant determines how deep the `coordinates` array must be. Geometry
//! collections are resolved recursively.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::bounding_box::{BoundingBox, HasBoundingBox};
use crate::coordinates::{
    positions, resolve_coordinates, CoordinateTree, LineStringType, MultiPolygonType, PolygonType,
    Position,
};
use crate::error::GeoTreeError;
use crate::geometry_type::GeometryType;
use crate::object::{
    as_object, read_array, read_bbox, read_type, write_bbox, COORDINATES, GEOMETRIES, GEOMETRY,
    TYPE,
};

macro_rules! coordinate_geometry {
    ($(#[$meta:meta])* $name:ident, $coordinates:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            coordinates: $coordinates,
            bbox: BoundingBox,
        }

        impl $name {
            /// Type tag of the geometry.
            pub const TYPE: GeometryType = GeometryType::$name;

            /// Creates a new geometry without a stored bounding box.
            pub fn new(coordinates: $coordinates) -> Self {
                Self {
                    coordinates,
                    bbox: BoundingBox::empty(),
                }
            }

            /// Sets the stored bounding box of the geometry.
            pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
                self.bbox = bbox;
                self
            }

            /// Coordinates of the geometry.
            pub fn coordinates(&self) -> &$coordinates {
                &self.coordinates
            }

            /// Consumes the geometry and returns its coordinates.
            pub fn into_coordinates(self) -> $coordinates {
                self.coordinates
            }

            fn from_object(object: &Map<String, Value>) -> Result<Self, GeoTreeError> {
                if object.contains_key(GEOMETRIES) {
                    log::warn!("Ignoring `{}` member of a {} geometry", GEOMETRIES, Self::TYPE);
                }

                let depth = <$coordinates as CoordinateTree>::DEPTH;
                debug_assert_eq!(Self::TYPE.coordinates_depth(), Some(depth));

                let coordinates =
                    resolve_coordinates(object.get(COORDINATES)).map_err(|err| match err {
                        GeoTreeError::MalformedCoordinates(reason) => {
                            GeoTreeError::MalformedCoordinates(format!(
                                "{} requires coordinates of depth {}: {}",
                                Self::TYPE,
                                depth,
                                reason
                            ))
                        }
                        err => err,
                    })?;
                Ok(Self::new(coordinates).with_bbox(read_bbox(object)?))
            }

            /// Converts the geometry into an untyped JSON tree.
            pub fn to_value(&self) -> Value {
                let mut object = Map::new();
                object.insert(TYPE.into(), Self::TYPE.as_str().into());
                object.insert(COORDINATES.into(), self.coordinates.to_value());
                write_bbox(&mut object, &self.bbox);
                Value::Object(object)
            }

            pub(crate) fn map_coordinates(&self, f: &dyn Fn(f64) -> f64) -> Self {
                Self {
                    coordinates: self.coordinates.map_leaves(f),
                    bbox: self.bbox,
                }
            }
        }

        impl HasBoundingBox for $name {
            fn bbox(&self) -> BoundingBox {
                self.bbox
            }

            fn compute_bbox(&self) -> BoundingBox {
                BoundingBox::from_coordinates(&self.coordinates)
            }
        }

        impl From<$name> for Geometry {
            fn from(value: $name) -> Self {
                Geometry::$name(value)
            }
        }
    };
}

coordinate_geometry!(
    /// A single position.
    Point,
    Position
);

coordinate_geometry!(
    /// A sequence of positions connected by straight segments.
    LineString,
    LineStringType
);

coordinate_geometry!(
    /// A sequence of linear rings: the exterior ring first, then holes.
    ///
    /// Closure and orientation of the rings are not checked.
    Polygon,
    PolygonType
);

coordinate_geometry!(
    /// A set of positions.
    MultiPoint,
    LineStringType
);

coordinate_geometry!(
    /// A set of line strings.
    MultiLineString,
    PolygonType
);

coordinate_geometry!(
    /// A set of polygons.
    MultiPolygon,
    MultiPolygonType
);

/// Heterogeneous collection of geometries, possibly including other collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
    bbox: BoundingBox,
}

impl GeometryCollection {
    /// Type tag of the geometry.
    pub const TYPE: GeometryType = GeometryType::GeometryCollection;

    /// Creates a new collection without a stored bounding box.
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self {
            geometries,
            bbox: BoundingBox::empty(),
        }
    }

    /// Sets the stored bounding box of the collection.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Member geometries.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Consumes the collection and returns member geometries.
    pub fn into_geometries(self) -> Vec<Geometry> {
        self.geometries
    }

    fn from_object(object: &Map<String, Value>) -> Result<Self, GeoTreeError> {
        if object.contains_key(COORDINATES) {
            log::warn!("Ignoring `{COORDINATES}` member of a geometry collection");
        }

        let geometries = read_array(object, GEOMETRIES)?
            .iter()
            .map(Geometry::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(geometries).with_bbox(read_bbox(object)?))
    }

    /// Converts the collection into an untyped JSON tree.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert(TYPE.into(), Self::TYPE.as_str().into());
        object.insert(
            GEOMETRIES.into(),
            Value::Array(self.geometries.iter().map(Geometry::to_value).collect()),
        );
        write_bbox(&mut object, &self.bbox);
        Value::Object(object)
    }

    pub(crate) fn map_coordinates(&self, f: &dyn Fn(f64) -> f64) -> Self {
        Self {
            geometries: self
                .geometries
                .iter()
                .map(|geometry| geometry.map_coordinates(f))
                .collect(),
            bbox: self.bbox,
        }
    }
}

impl HasBoundingBox for GeometryCollection {
    fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    fn compute_bbox(&self) -> BoundingBox {
        self.geometries
            .iter()
            .map(HasBoundingBox::force_bbox)
            .collect()
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::GeometryCollection(value)
    }
}

/// Any GeoJSON geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Point geometry.
    Point(Point),
    /// LineString geometry.
    LineString(LineString),
    /// Polygon geometry.
    Polygon(Polygon),
    /// MultiPoint geometry.
    MultiPoint(MultiPoint),
    /// MultiLineString geometry.
    MultiLineString(MultiLineString),
    /// MultiPolygon geometry.
    MultiPolygon(MultiPolygon),
    /// GeometryCollection geometry.
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Resolves a geometry from an untyped JSON tree.
    ///
    /// The value must be an object with a `type` member naming one of the geometry types.
    /// `coordinates` must have exactly the nesting depth of that type, a missing member gives a
    /// geometry with no coordinates. Geometry collections resolve each of their `geometries`
    /// recursively.
    pub fn from_value(value: &Value) -> Result<Self, GeoTreeError> {
        Self::from_object(as_object(value, GEOMETRY)?)
    }

    /// Same as [`Geometry::from_value`], for an already unwrapped JSON object.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, GeoTreeError> {
        let geometry_type: GeometryType = read_type(object)?.parse()?;
        log::trace!("Resolving {geometry_type} geometry");

        Ok(match geometry_type {
            GeometryType::Point => Point::from_object(object)?.into(),
            GeometryType::LineString => LineString::from_object(object)?.into(),
            GeometryType::Polygon => Polygon::from_object(object)?.into(),
            GeometryType::MultiPoint => MultiPoint::from_object(object)?.into(),
            GeometryType::MultiLineString => MultiLineString::from_object(object)?.into(),
            GeometryType::MultiPolygon => MultiPolygon::from_object(object)?.into(),
            GeometryType::GeometryCollection => GeometryCollection::from_object(object)?.into(),
        })
    }

    /// Converts the geometry into an untyped JSON tree.
    pub fn to_value(&self) -> Value {
        match self {
            Geometry::Point(v) => v.to_value(),
            Geometry::LineString(v) => v.to_value(),
            Geometry::Polygon(v) => v.to_value(),
            Geometry::MultiPoint(v) => v.to_value(),
            Geometry::MultiLineString(v) => v.to_value(),
            Geometry::MultiPolygon(v) => v.to_value(),
            Geometry::GeometryCollection(v) => v.to_value(),
        }
    }

    /// Type tag of the geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => Point::TYPE,
            Geometry::LineString(_) => LineString::TYPE,
            Geometry::Polygon(_) => Polygon::TYPE,
            Geometry::MultiPoint(_) => MultiPoint::TYPE,
            Geometry::MultiLineString(_) => MultiLineString::TYPE,
            Geometry::MultiPolygon(_) => MultiPolygon::TYPE,
            Geometry::GeometryCollection(_) => GeometryCollection::TYPE,
        }
    }

    /// All positions of the geometry in order, including positions of collection members.
    pub fn positions(&self) -> Vec<Position> {
        match self {
            Geometry::Point(v) => positions(v.coordinates()),
            Geometry::LineString(v) => positions(v.coordinates()),
            Geometry::Polygon(v) => positions(v.coordinates()),
            Geometry::MultiPoint(v) => positions(v.coordinates()),
            Geometry::MultiLineString(v) => positions(v.coordinates()),
            Geometry::MultiPolygon(v) => positions(v.coordinates()),
            Geometry::GeometryCollection(v) => {
                v.geometries().iter().flat_map(Geometry::positions).collect()
            }
        }
    }

    pub(crate) fn map_coordinates(&self, f: &dyn Fn(f64) -> f64) -> Self {
        match self {
            Geometry::Point(v) => v.map_coordinates(f).into(),
            Geometry::LineString(v) => v.map_coordinates(f).into(),
            Geometry::Polygon(v) => v.map_coordinates(f).into(),
            Geometry::MultiPoint(v) => v.map_coordinates(f).into(),
            Geometry::MultiLineString(v) => v.map_coordinates(f).into(),
            Geometry::MultiPolygon(v) => v.map_coordinates(f).into(),
            Geometry::GeometryCollection(v) => v.map_coordinates(f).into(),
        }
    }
}

impl HasBoundingBox for Geometry {
    fn bbox(&self) -> BoundingBox {
        match self {
            Geometry::Point(v) => v.bbox(),
            Geometry::LineString(v) => v.bbox(),
            Geometry::Polygon(v) => v.bbox(),
            Geometry::MultiPoint(v) => v.bbox(),
            Geometry::MultiLineString(v) => v.bbox(),
            Geometry::MultiPolygon(v) => v.bbox(),
            Geometry::GeometryCollection(v) => v.bbox(),
        }
    }

    fn compute_bbox(&self) -> BoundingBox {
        match self {
            Geometry::Point(v) => v.compute_bbox(),
            Geometry::LineString(v) => v.compute_bbox(),
            Geometry::Polygon(v) => v.compute_bbox(),
            Geometry::MultiPoint(v) => v.compute_bbox(),
            Geometry::MultiLineString(v) => v.compute_bbox(),
            Geometry::MultiPolygon(v) => v.compute_bbox(),
            Geometry::GeometryCollection(v) => v.compute_bbox(),
        }
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}

/// Something a geometry can be resolved from.
///
/// Implemented both for untyped JSON trees and for geometries themselves, so code that may see
/// either one (e.g. after a value was converted into a JSON tree and back) can resolve it
/// without checking first. Resolving a geometry returns it unchanged.
pub trait ResolveGeometry {
    /// Resolves the geometry.
    fn resolve_geometry(self) -> Result<Geometry, GeoTreeError>;
}

impl ResolveGeometry for Geometry {
    fn resolve_geometry(self) -> Result<Geometry, GeoTreeError> {
        Ok(self)
    }
}

impl ResolveGeometry for &Geometry {
    fn resolve_geometry(self) -> Result<Geometry, GeoTreeError> {
        Ok(self.clone())
    }
}

impl ResolveGeometry for &Value {
    fn resolve_geometry(self) -> Result<Geometry, GeoTreeError> {
        Geometry::from_value(self)
    }
}

impl ResolveGeometry for Value {
    fn resolve_geometry(self) -> Result<Geometry, GeoTreeError> {
        Geometry::from_value(&self)
    }
}
