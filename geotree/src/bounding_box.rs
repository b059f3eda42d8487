//! Bounding boxes of geographic objects.
//!
//! A [`BoundingBox`] follows the layout of the GeoJSON `bbox` member: it is either empty, or
//! contains 4 values `[x_min, y_min, x_max, y_max]`, or 6 values
//! `[x_min, y_min, z_min, x_max, y_max, z_max]`.
//!
//! The X axis is longitude, and it wraps around at the antimeridian (±180°). A box whose
//! `x_min` is greater than its `x_max` is not invalid: it covers the band from `x_min` eastward
//! across the antimeridian to `x_max`. Only the Y and Z axes are required to be ordered.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coordinates::CoordinateTree;
use crate::error::GeoTreeError;
use crate::geometry::{Point, Polygon};

/// Longitude of the antimeridian.
pub const ANTIMERIDIAN: f64 = 180.0;

/// Number of fractional digits in the text form of a bounding box.
pub const TEXT_PRECISION: usize = 3;

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// Objects that have a bounding box.
pub trait HasBoundingBox {
    /// Bounding box stored in the object, or an empty box if it has none.
    fn bbox(&self) -> BoundingBox;

    /// Calculates the bounding box from the contents of the object, ignoring the stored one.
    fn compute_bbox(&self) -> BoundingBox;

    /// Returns the stored bounding box if the object has one, or calculates it otherwise.
    fn force_bbox(&self) -> BoundingBox {
        let stored = self.bbox();
        if stored.is_empty() {
            self.compute_bbox()
        } else {
            stored
        }
    }
}

/// Axis aligned box over longitude, latitude and optionally elevation.
///
/// See module documentation for the layout and the antimeridian convention.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct BoundingBox {
    dimensions: usize,
    min: [f64; 3],
    max: [f64; 3],
}

impl BoundingBox {
    /// Empty box. Merging it with any other box gives the other box.
    pub const fn empty() -> Self {
        Self {
            dimensions: 0,
            min: [0.0; 3],
            max: [0.0; 3],
        }
    }

    /// Creates a 2d box. The values are not validated.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            dimensions: 2,
            min: [x_min, y_min, 0.0],
            max: [x_max, y_max, 0.0],
        }
    }

    /// Creates a 3d box. The values are not validated.
    pub fn new_3d(x_min: f64, y_min: f64, z_min: f64, x_max: f64, y_max: f64, z_max: f64) -> Self {
        Self {
            dimensions: 3,
            min: [x_min, y_min, z_min],
            max: [x_max, y_max, z_max],
        }
    }

    /// Box of zero size around a single position.
    ///
    /// The measure (4th) coordinate is ignored. Positions with less than 2 coordinates give an
    /// empty box.
    pub fn from_position(position: &[f64]) -> Self {
        match position {
            [x, y] => Self::new(*x, *y, *x, *y),
            [x, y, z, ..] => Self::new_3d(*x, *y, *z, *x, *y, *z),
            _ => Self::empty(),
        }
    }

    /// Box enclosing all positions of a coordinate array of any depth.
    ///
    /// Boxes are merged level by level: the positions of each innermost array first, then the
    /// boxes of its siblings, and so on up to the root.
    pub fn from_coordinates<C: CoordinateTree>(coordinates: &C) -> Self {
        coordinates.bounding_box()
    }

    /// Merges all the boxes in order, starting from an empty box.
    pub fn from_boxes<'a>(boxes: impl IntoIterator<Item = &'a BoundingBox>) -> Self {
        boxes
            .into_iter()
            .fold(Self::empty(), |acc, bbox| acc.merge(bbox))
    }

    /// Number of values in the GeoJSON representation of the box: 0, 4 or 6.
    pub fn len(&self) -> usize {
        self.dimensions * 2
    }

    /// Whether the box is empty.
    pub fn is_empty(&self) -> bool {
        self.dimensions == 0
    }

    /// Number of axes of the box: 0, 2 or 3.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Western boundary.
    pub fn x_min(&self) -> Option<f64> {
        self.min_of(0)
    }

    /// Southern boundary.
    pub fn y_min(&self) -> Option<f64> {
        self.min_of(1)
    }

    /// Lower elevation boundary, for 3d boxes.
    pub fn z_min(&self) -> Option<f64> {
        self.min_of(2)
    }

    /// Eastern boundary.
    pub fn x_max(&self) -> Option<f64> {
        self.max_of(0)
    }

    /// Northern boundary.
    pub fn y_max(&self) -> Option<f64> {
        self.max_of(1)
    }

    /// Upper elevation boundary, for 3d boxes.
    pub fn z_max(&self) -> Option<f64> {
        self.max_of(2)
    }

    fn min_of(&self, axis: usize) -> Option<f64> {
        (axis < self.dimensions).then(|| self.min[axis])
    }

    fn max_of(&self, axis: usize) -> Option<f64> {
        (axis < self.dimensions).then(|| self.max[axis])
    }

    /// Values of the box in the GeoJSON order: all minimums, then all maximums.
    pub fn to_vec(&self) -> Vec<f64> {
        let dims = self.dimensions;
        self.min[..dims]
            .iter()
            .chain(&self.max[..dims])
            .copied()
            .collect()
    }

    /// Box containing both boxes.
    ///
    /// An empty box is the identity element. Boxes of different dimensions cannot be merged, in
    /// that case `self` is returned unchanged.
    ///
    /// Along the X axis, when one of the boxes starts at -180° and the other one ends at 180°,
    /// they are considered to be two halves of one region crossing the antimeridian, so the
    /// result spans from the western edge of the eastern box to the eastern edge of the western
    /// one instead of covering the whole globe. Otherwise the minimum and maximum longitudes are
    /// taken as they are.
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        if self.dimensions != other.dimensions {
            log::warn!(
                "Cannot merge bounding boxes with {} and {} dimensions, keeping [{}]",
                self.dimensions,
                other.dimensions,
                self
            );
            return *self;
        }

        let mut result = *self;
        (result.min[0], result.max[0]) = merge_longitudes(
            (self.min[0], self.max[0]),
            (other.min[0], other.max[0]),
        );
        for axis in 1..self.dimensions {
            result.min[axis] = self.min[axis].min(other.min[axis]);
            result.max[axis] = self.max[axis].max(other.max[axis]);
        }

        result
    }

    /// Checks that minimums do not exceed maximums along the Y and Z axes.
    ///
    /// The X axis is not checked, since `x_min > x_max` means the box crosses the antimeridian.
    pub fn validate(&self) -> Result<(), GeoTreeError> {
        for axis in 1..self.dimensions {
            if self.min[axis] > self.max[axis] {
                return Err(GeoTreeError::InvalidBoundingBoxOrder(format!(
                    "{} minimum {} is greater than {} maximum {}",
                    AXIS_NAMES[axis], self.min[axis], AXIS_NAMES[axis], self.max[axis]
                )));
            }
        }

        Ok(())
    }

    /// Whether [`BoundingBox::validate`] succeeds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Whether the box is valid and crosses the antimeridian.
    pub fn crosses_antimeridian(&self) -> bool {
        !self.is_empty() && self.is_valid() && self.min[0] > self.max[0]
    }

    /// Whether the interiors of the boxes intersect.
    ///
    /// Boxes that only touch each other do not overlap. Empty boxes and boxes of different
    /// dimensions never overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        if self.is_empty() || other.is_empty() || self.dimensions != other.dimensions {
            return false;
        }

        for axis in 1..self.dimensions {
            if !intervals_overlap(
                (self.min[axis], self.max[axis]),
                (other.min[axis], other.max[axis]),
            ) {
                return false;
            }
        }

        let this = (self.min[0], self.max[0]);
        let that = (other.min[0], other.max[0]);
        match (self.crosses_antimeridian(), other.crosses_antimeridian()) {
            (true, true) => true,
            (true, false) => overlaps_crossing(that, this),
            (false, true) => overlaps_crossing(this, that),
            (false, false) => intervals_overlap(this, that),
        }
    }

    /// Middle point of the box, or `None` for an empty box.
    ///
    /// The middle is taken between the minimum and the maximum of each axis as they are, so
    /// for a box crossing the antimeridian the point lies on the opposite side of the globe.
    pub fn centroid(&self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }

        let coordinates = (0..self.dimensions)
            .map(|axis| (self.min[axis] + self.max[axis]) / 2.0)
            .collect();
        Some(Point::new(coordinates))
    }

    /// Polygon with one closed ring along the X and Y boundaries of the box.
    pub fn polygon(&self) -> Option<Polygon> {
        if self.is_empty() {
            return None;
        }

        let [x_min, y_min, _] = self.min;
        let [x_max, y_max, _] = self.max;
        Some(Polygon::new(vec![vec![
            vec![x_min, y_min],
            vec![x_max, y_min],
            vec![x_max, y_max],
            vec![x_min, y_max],
            vec![x_min, y_min],
        ]]))
    }
}

fn merge_longitudes(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    if a.0 == -ANTIMERIDIAN && b.1 == ANTIMERIDIAN {
        (b.0, a.1)
    } else if b.0 == -ANTIMERIDIAN && a.1 == ANTIMERIDIAN {
        (a.0, b.1)
    } else {
        (a.0.min(b.0), a.1.max(b.1))
    }
}

fn intervals_overlap(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

fn overlaps_crossing(plain: (f64, f64), crossing: (f64, f64)) -> bool {
    intervals_overlap(plain, (crossing.0, ANTIMERIDIAN))
        || intervals_overlap(plain, (-ANTIMERIDIAN, crossing.1))
}

impl TryFrom<&[f64]> for BoundingBox {
    type Error = GeoTreeError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let bbox = match *values {
            [] => Self::empty(),
            [x_min, y_min, x_max, y_max] => Self::new(x_min, y_min, x_max, y_max),
            [x_min, y_min, z_min, x_max, y_max, z_max] => {
                Self::new_3d(x_min, y_min, z_min, x_max, y_max, z_max)
            }
            _ => return Err(GeoTreeError::InvalidBoundingBoxLength(values.len())),
        };

        bbox.validate()?;
        Ok(bbox)
    }
}

impl TryFrom<Vec<f64>> for BoundingBox {
    type Error = GeoTreeError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}

impl From<BoundingBox> for Vec<f64> {
    fn from(value: BoundingBox) -> Self {
        value.to_vec()
    }
}

impl FromStr for BoundingBox {
    type Err = GeoTreeError;

    /// Parses comma separated values, e.g. `10,10,20,20`. Empty string gives an empty box.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::empty());
        }

        let values = s
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| GeoTreeError::InvalidBoundingBoxText(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::try_from(values)
    }
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, value) in self.to_vec().iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{:.*}", TEXT_PRECISION, value)?;
        }

        Ok(())
    }
}

impl<'a> FromIterator<&'a BoundingBox> for BoundingBox {
    fn from_iter<T: IntoIterator<Item = &'a BoundingBox>>(iter: T) -> Self {
        Self::from_boxes(iter)
    }
}

impl FromIterator<BoundingBox> for BoundingBox {
    fn from_iter<T: IntoIterator<Item = BoundingBox>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, bbox| acc.merge(&bbox))
    }
}
