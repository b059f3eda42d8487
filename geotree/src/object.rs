//! Access to the members of untyped GeoJSON objects.

use serde_json::{Map, Value};

use crate::bounding_box::BoundingBox;
use crate::coordinates::{number_value, value_kind};
use crate::error::GeoTreeError;

pub(crate) const TYPE: &str = "type";
pub(crate) const COORDINATES: &str = "coordinates";
pub(crate) const GEOMETRIES: &str = "geometries";
pub(crate) const GEOMETRY: &str = "geometry";
pub(crate) const FEATURES: &str = "features";
pub(crate) const PROPERTIES: &str = "properties";
pub(crate) const ID: &str = "id";
pub(crate) const BBOX: &str = "bbox";

pub(crate) fn as_object<'a>(
    value: &'a Value,
    member: &'static str,
) -> Result<&'a Map<String, Value>, GeoTreeError> {
    value.as_object().ok_or_else(|| GeoTreeError::InvalidMember {
        member,
        reason: format!("expected an object, found {}", value_kind(value)),
    })
}

pub(crate) fn read_type(object: &Map<String, Value>) -> Result<&str, GeoTreeError> {
    match object.get(TYPE) {
        None => Err(GeoTreeError::MissingMember(TYPE)),
        Some(Value::String(tag)) => Ok(tag.as_str()),
        Some(other) => Err(GeoTreeError::InvalidMember {
            member: TYPE,
            reason: format!("expected a string, found {}", value_kind(other)),
        }),
    }
}

/// Returns elements of an array member. Missing and `null` members are treated as empty arrays.
pub(crate) fn read_array<'a>(
    object: &'a Map<String, Value>,
    member: &'static str,
) -> Result<&'a [Value], GeoTreeError> {
    match object.get(member) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(GeoTreeError::InvalidMember {
            member,
            reason: format!("expected an array, found {}", value_kind(other)),
        }),
    }
}

pub(crate) fn read_bbox(object: &Map<String, Value>) -> Result<BoundingBox, GeoTreeError> {
    let values = read_array(object, BBOX)?
        .iter()
        .map(|value| {
            value.as_f64().ok_or_else(|| GeoTreeError::InvalidMember {
                member: BBOX,
                reason: format!("expected a number, found {}", value_kind(value)),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    BoundingBox::try_from(values)
}

pub(crate) fn write_bbox(object: &mut Map<String, Value>, bbox: &BoundingBox) {
    if !bbox.is_empty() {
        object.insert(
            BBOX.into(),
            Value::Array(bbox.to_vec().into_iter().map(number_value).collect()),
        );
    }
}
