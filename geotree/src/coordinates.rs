//! Coordinate arrays of GeoJSON geometries.
//!
//! Every coordinate-carrying geometry stores its coordinates as nested vectors of `f64` with a
//! depth that is fixed by the geometry type: a [`Position`] for a point, a [`LineStringType`]
//! for line strings and multipoints and so on. All of them implement [`CoordinateTree`], which
//! reconstructs such a vector from an untyped JSON array, checking that the nesting depth of
//! the input matches exactly.

use serde_json::{Number, Value};

use crate::bounding_box::BoundingBox;
use crate::error::GeoTreeError;

/// A single position: `[x, y]`, `[x, y, z]` or `[x, y, z, m]`.
pub type Position = Vec<f64>;

/// Coordinates of a `LineString` or a `MultiPoint`.
pub type LineStringType = Vec<Position>;

/// Coordinates of a `Polygon` or a `MultiLineString`.
pub type PolygonType = Vec<LineStringType>;

/// Coordinates of a `MultiPolygon`.
pub type MultiPolygonType = Vec<PolygonType>;

/// Numeric tree of fixed depth.
///
/// Implemented for `f64` (the leaf, depth 0) and for `Vec<T>` of any other coordinate tree, so
/// a single recursive implementation covers positions and all the deeper coordinate arrays.
pub trait CoordinateTree: Sized + Clone + PartialEq {
    /// Number of array levels above the numeric leaves.
    const DEPTH: usize;

    /// Reconstructs the tree from an untyped JSON value.
    ///
    /// Fails with [`GeoTreeError::MalformedCoordinates`] if a node where an array is expected is
    /// not an array, or if a leaf is not a number.
    fn from_value(value: &Value) -> Result<Self, GeoTreeError>;

    /// Converts the tree back into a JSON value.
    fn to_value(&self) -> Value;

    /// Returns the slice as a position if `Self` is a numeric leaf.
    fn as_position(items: &[Self]) -> Option<&[f64]>;

    /// Calls `f` for every position in the tree, depth first.
    fn for_each_position<'a>(&'a self, f: &mut dyn FnMut(&'a [f64]));

    /// Returns a copy of the tree with `f` applied to every numeric leaf.
    fn map_leaves(&self, f: &dyn Fn(f64) -> f64) -> Self;

    /// Bounding box of the tree, merging the boxes of child arrays in order.
    fn bounding_box(&self) -> BoundingBox;
}

impl CoordinateTree for f64 {
    const DEPTH: usize = 0;

    fn from_value(value: &Value) -> Result<Self, GeoTreeError> {
        value.as_f64().ok_or_else(|| {
            GeoTreeError::MalformedCoordinates(format!(
                "expected a number, found {}",
                value_kind(value)
            ))
        })
    }

    fn to_value(&self) -> Value {
        number_value(*self)
    }

    fn as_position(items: &[Self]) -> Option<&[f64]> {
        Some(items)
    }

    fn for_each_position<'a>(&'a self, _f: &mut dyn FnMut(&'a [f64])) {}

    fn map_leaves(&self, f: &dyn Fn(f64) -> f64) -> Self {
        f(*self)
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::empty()
    }
}

impl<T: CoordinateTree> CoordinateTree for Vec<T> {
    const DEPTH: usize = T::DEPTH + 1;

    fn from_value(value: &Value) -> Result<Self, GeoTreeError> {
        let Some(items) = value.as_array() else {
            return Err(GeoTreeError::MalformedCoordinates(format!(
                "expected an array of depth {}, found {}",
                Self::DEPTH,
                value_kind(value)
            )));
        };

        items.iter().map(T::from_value).collect()
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(T::to_value).collect())
    }

    fn as_position(_items: &[Self]) -> Option<&[f64]> {
        None
    }

    fn for_each_position<'a>(&'a self, f: &mut dyn FnMut(&'a [f64])) {
        match T::as_position(self) {
            Some(position) => f(position),
            None => {
                for child in self {
                    child.for_each_position(f);
                }
            }
        }
    }

    fn map_leaves(&self, f: &dyn Fn(f64) -> f64) -> Self {
        self.iter().map(|child| child.map_leaves(f)).collect()
    }

    fn bounding_box(&self) -> BoundingBox {
        match T::as_position(self) {
            Some(position) => BoundingBox::from_position(position),
            None => self.iter().map(T::bounding_box).collect(),
        }
    }
}

/// Resolves an optional `coordinates` member into a coordinate array of the depth `T` requires.
///
/// A missing or `null` member gives an empty array.
pub fn resolve_coordinates<T: CoordinateTree>(
    value: Option<&Value>,
) -> Result<Vec<T>, GeoTreeError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => Vec::<T>::from_value(value),
    }
}

/// Returns all positions of the coordinate tree in order.
pub fn positions<T: CoordinateTree>(coordinates: &T) -> Vec<Position> {
    let mut result = Vec::new();
    coordinates.for_each_position(&mut |position| result.push(position.to_vec()));
    result
}

/// Converts a coordinate value into JSON, writing integral values as integers.
pub(crate) fn number_value(value: f64) -> Value {
    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
