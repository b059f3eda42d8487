//! Reducing precision of coordinates.

use crate::feature::Feature;
use crate::feature_collection::FeatureCollection;
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

/// Truncation of coordinates to a fixed number of decimal places.
pub trait Trim {
    /// Returns a copy with every coordinate truncated toward zero to `precision` decimal places.
    ///
    /// Stored bounding boxes are copied as they are.
    fn trim(&self, precision: i32) -> Self;
}

fn truncate(value: f64, precision: i32) -> f64 {
    let scale = 10f64.powi(precision);
    (value * scale).trunc() / scale
}

macro_rules! impl_trim {
    ($($name:ty),*) => {
        $(
            impl Trim for $name {
                fn trim(&self, precision: i32) -> Self {
                    self.map_coordinates(&|v| truncate(v, precision))
                }
            }
        )*
    };
}

impl_trim!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Geometry
);

impl Trim for Feature {
    fn trim(&self, precision: i32) -> Self {
        self.map_geometry(|geometry| geometry.trim(precision))
    }
}

impl Trim for FeatureCollection {
    fn trim(&self, precision: i32) -> Self {
        let features = self
            .features()
            .iter()
            .map(|feature| feature.trim(precision))
            .collect();
        self.with_features(features)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::bounding_box::{BoundingBox, HasBoundingBox};

    #[test]
    fn truncates_toward_zero() {
        assert_abs_diff_eq!(truncate(1.23456, 2), 1.23, epsilon = 1e-9);
        assert_abs_diff_eq!(truncate(-1.23956, 2), -1.23, epsilon = 1e-9);
        assert_abs_diff_eq!(truncate(123.9, 0), 123.0, epsilon = 1e-9);
        assert_abs_diff_eq!(truncate(1234.0, -2), 1200.0, epsilon = 1e-9);
    }

    #[test]
    fn trim_geometry() {
        let line = LineString::new(vec![vec![102.123456, 0.987654], vec![-103.55555, 1.0]]);
        let trimmed = Geometry::from(line).trim(3);
        let Geometry::LineString(trimmed) = trimmed else {
            panic!("invalid geometry type");
        };

        let coordinates = trimmed.coordinates();
        assert_abs_diff_eq!(coordinates[0][0], 102.123, epsilon = 1e-9);
        assert_abs_diff_eq!(coordinates[0][1], 0.987, epsilon = 1e-9);
        assert_abs_diff_eq!(coordinates[1][0], -103.555, epsilon = 1e-9);
        assert_abs_diff_eq!(coordinates[1][1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn trim_keeps_stored_bbox() {
        let stored = BoundingBox::new(0.12345, 0.12345, 0.12345, 0.12345);
        let point = Point::new(vec![0.12345, 0.12345]).with_bbox(stored);
        let trimmed = point.trim(1);
        assert_eq!(trimmed.bbox(), stored);
        assert_abs_diff_eq!(trimmed.coordinates()[0], 0.1, epsilon = 1e-9);
    }

    #[test]
    fn trim_collection() {
        let collection = FeatureCollection::new(vec![
            Feature::from(Geometry::from(GeometryCollection::new(vec![Point::new(vec![
                1.99, -1.99,
            ])
            .into()])))
            .with_id("a"),
            Feature::new(None),
        ]);

        let trimmed = collection.trim(0);
        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed.features()[0].id_str(), "a");
        assert_eq!(trimmed.features()[1].geometry(), None);
        assert_eq!(
            trimmed.force_bbox().to_vec(),
            vec![1.0, -1.0, 1.0, -1.0]
        );
    }
}
