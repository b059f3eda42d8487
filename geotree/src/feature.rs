//! GeoJSON features.

use std::fmt::{Display, Formatter};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::bounding_box::{BoundingBox, HasBoundingBox};
use crate::coordinates::{number_value, value_kind};
use crate::error::GeoTreeError;
use crate::geometry::{Geometry, ResolveGeometry};
use crate::geometry_type::GeoJsonType;
use crate::object::{as_object, read_bbox, read_type, write_bbox, GEOMETRY, ID, PROPERTIES, TYPE};

/// Identifier of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    /// String identifier.
    String(String),
    /// Numeric identifier.
    Number(Number),
}

impl FeatureId {
    fn from_value(value: &Value) -> Result<Option<Self>, GeoTreeError> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(FeatureId::String(s.clone()))),
            Value::Number(n) => Ok(Some(FeatureId::Number(n.clone()))),
            other => Err(GeoTreeError::InvalidMember {
                member: ID,
                reason: format!("expected a string or a number, found {}", value_kind(other)),
            }),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            FeatureId::String(s) => Value::String(s.clone()),
            FeatureId::Number(n) => Value::Number(n.clone()),
        }
    }
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureId::String(s) => f.write_str(s),
            FeatureId::Number(n) => f.write_str(&format_number(n)),
        }
    }
}

impl From<String> for FeatureId {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for FeatureId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for FeatureId {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// A geometry with a set of properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    geometry: Option<Geometry>,
    properties: Map<String, Value>,
    id: Option<FeatureId>,
    bbox: BoundingBox,
}

impl Feature {
    /// Type tag of the object.
    pub const TYPE: GeoJsonType = GeoJsonType::Feature;

    /// Creates a new feature with no properties and no identifier.
    pub fn new(geometry: Option<Geometry>) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }

    /// Sets the identifier of the feature.
    pub fn with_id(mut self, id: impl Into<FeatureId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the properties of the feature.
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    /// Sets the stored bounding box of the feature.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Geometry of the feature.
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Replaces the geometry of the feature, resolving it first if needed.
    ///
    /// The stored bounding box is not updated.
    pub fn set_geometry(&mut self, geometry: impl ResolveGeometry) -> Result<(), GeoTreeError> {
        self.geometry = Some(geometry.resolve_geometry()?);
        Ok(())
    }

    /// Identifier of the feature.
    pub fn id(&self) -> Option<&FeatureId> {
        self.id.as_ref()
    }

    /// Identifier of the feature as a string. Empty string if the feature has no identifier.
    pub fn id_str(&self) -> String {
        self.id.as_ref().map(FeatureId::to_string).unwrap_or_default()
    }

    /// Properties of the feature.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Mutable access to the properties of the feature.
    pub fn properties_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.properties
    }

    /// Value of a property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Sets a property, returning the previous value if there was one.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.properties.insert(key.into(), value.into())
    }

    /// Property value as a string.
    ///
    /// Strings are returned as is, numbers and booleans are formatted. Any other value, or a
    /// missing property, gives an empty string.
    pub fn property_string(&self, key: &str) -> String {
        self.property(key)
            .and_then(scalar_string)
            .unwrap_or_default()
    }

    /// Property value as an integer.
    ///
    /// Fractional numbers are truncated toward zero, strings are parsed. Any other value, or a
    /// missing property, gives 0.
    pub fn property_int(&self, key: &str) -> i64 {
        match self.property(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .unwrap_or_else(|| n.as_f64().map_or(0, |v| v as i64)),
            Some(Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .or_else(|_| s.parse::<f64>().map(|v| v as i64))
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Property value as a float.
    ///
    /// Strings are parsed. Any other value, or a missing property, gives NaN.
    pub fn property_float(&self, key: &str) -> f64 {
        match self.property(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// Property value as a list of strings.
    ///
    /// Every element of an array is converted as in [`Feature::property_string`], with nested
    /// arrays and objects written as JSON text. Any other value gives an empty list.
    pub fn property_string_slice(&self, key: &str) -> Vec<String> {
        match self.property(key) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| scalar_string(item).unwrap_or_else(|| item.to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Resolves a feature from an untyped JSON tree.
    pub fn from_value(value: &Value) -> Result<Self, GeoTreeError> {
        Self::from_object(as_object(value, "feature")?)
    }

    /// Same as [`Feature::from_value`], for an already unwrapped JSON object.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, GeoTreeError> {
        let tag = read_type(object)?;
        if tag != Self::TYPE.as_str() {
            return Err(GeoTreeError::InvalidMember {
                member: TYPE,
                reason: format!("expected {}, found {tag}", Self::TYPE),
            });
        }

        let geometry = match object.get(GEOMETRY) {
            None | Some(Value::Null) => None,
            Some(value) => Some(Geometry::from_value(value)?),
        };

        let properties = match object.get(PROPERTIES) {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(properties)) => properties.clone(),
            Some(other) => {
                return Err(GeoTreeError::InvalidMember {
                    member: PROPERTIES,
                    reason: format!("expected an object, found {}", value_kind(other)),
                })
            }
        };

        let id = match object.get(ID) {
            None => None,
            Some(value) => FeatureId::from_value(value)?,
        };

        Ok(Self {
            geometry,
            properties,
            id,
            bbox: read_bbox(object)?,
        })
    }

    /// Converts the feature into an untyped JSON tree.
    ///
    /// Empty properties and a missing identifier are omitted.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert(TYPE.into(), Self::TYPE.as_str().into());
        object.insert(
            GEOMETRY.into(),
            self.geometry
                .as_ref()
                .map_or(Value::Null, Geometry::to_value),
        );
        if !self.properties.is_empty() {
            object.insert(PROPERTIES.into(), Value::Object(self.properties.clone()));
        }
        if let Some(id) = &self.id {
            object.insert(ID.into(), id.to_value());
        }
        write_bbox(&mut object, &self.bbox);
        Value::Object(object)
    }

    pub(crate) fn map_geometry(&self, f: impl FnOnce(&Geometry) -> Geometry) -> Self {
        Self {
            geometry: self.geometry.as_ref().map(f),
            properties: self.properties.clone(),
            id: self.id.clone(),
            bbox: self.bbox,
        }
    }
}

impl From<Geometry> for Feature {
    fn from(geometry: Geometry) -> Self {
        Self::new(Some(geometry))
    }
}

impl HasBoundingBox for Feature {
    fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    fn compute_bbox(&self) -> BoundingBox {
        self.geometry
            .as_ref()
            .map(HasBoundingBox::force_bbox)
            .unwrap_or_default()
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}

fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(v) if n.is_f64() => match number_value(v) {
            Value::Number(integral) => integral.to_string(),
            _ => v.to_string(),
        },
        _ => n.to_string(),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
