//! Collections of features.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::bounding_box::{BoundingBox, HasBoundingBox};
use crate::error::GeoTreeError;
use crate::feature::Feature;
use crate::geometry_type::GeoJsonType;
use crate::object::{as_object, read_array, read_bbox, read_type, write_bbox, FEATURES, TYPE};

/// Ordered list of features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Feature>,
    bbox: BoundingBox,
}

impl FeatureCollection {
    /// Type tag of the object.
    pub const TYPE: GeoJsonType = GeoJsonType::FeatureCollection;

    /// Creates a new collection.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            bbox: BoundingBox::empty(),
        }
    }

    /// Sets the stored bounding box of the collection.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Features of the collection.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Mutable access to the features of the collection.
    pub fn features_mut(&mut self) -> &mut Vec<Feature> {
        &mut self.features
    }

    /// Consumes the collection, returning its features.
    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }

    /// Appends a feature to the end of the collection.
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Number of features in the collection.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub(crate) fn with_features(&self, features: Vec<Feature>) -> Self {
        Self {
            features,
            bbox: self.bbox,
        }
    }

    /// Makes every feature carry the same set of property keys.
    ///
    /// Keys present in any feature are added with a `null` value to the features that miss them.
    /// Existing values are left untouched.
    pub fn fill_properties(&mut self) {
        let mut keys = Map::new();
        for feature in &self.features {
            for key in feature.properties().keys() {
                if !keys.contains_key(key) {
                    keys.insert(key.clone(), Value::Null);
                }
            }
        }

        let mut filled = 0;
        for feature in &mut self.features {
            let properties = feature.properties_mut();
            for key in keys.keys() {
                if !properties.contains_key(key) {
                    properties.insert(key.clone(), Value::Null);
                    filled += 1;
                }
            }
        }

        log::debug!(
            "Filled {filled} missing properties in {} features",
            self.features.len()
        );
    }

    /// Resolves a feature collection from an untyped JSON tree.
    pub fn from_value(value: &Value) -> Result<Self, GeoTreeError> {
        Self::from_object(as_object(value, "feature collection")?)
    }

    /// Same as [`FeatureCollection::from_value`], for an already unwrapped JSON object.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, GeoTreeError> {
        let tag = read_type(object)?;
        if tag != Self::TYPE.as_str() {
            return Err(GeoTreeError::InvalidMember {
                member: TYPE,
                reason: format!("expected {}, found {tag}", Self::TYPE),
            });
        }

        let features = read_array(object, FEATURES)?
            .iter()
            .map(Feature::from_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            features,
            bbox: read_bbox(object)?,
        })
    }

    /// Converts the collection into an untyped JSON tree.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert(TYPE.into(), Self::TYPE.as_str().into());
        object.insert(
            FEATURES.into(),
            Value::Array(self.features.iter().map(Feature::to_value).collect()),
        );
        write_bbox(&mut object, &self.bbox);
        Value::Object(object)
    }
}

impl HasBoundingBox for FeatureCollection {
    fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    fn compute_bbox(&self) -> BoundingBox {
        self.features
            .iter()
            .map(HasBoundingBox::force_bbox)
            .collect()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for FeatureCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FeatureCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}
