//! Dynamic GeoJSON geometry resolution with antimeridian aware bounding boxes.
//!
//! GeoJSON documents are parsed into untyped [`serde_json::Value`] trees and then resolved into
//! strongly typed [`Geometry`], [`Feature`] and [`FeatureCollection`] values, with the
//! coordinate nesting depth checked against the declared geometry type. Every object can
//! report a [`BoundingBox`], either the one stored in the document or one computed from its
//! coordinates. Bounding boxes follow RFC 7946 in allowing the X range to cross the
//! antimeridian (`x_min > x_max`).
//!
//! ```
//! use geotree::{parse, HasBoundingBox};
//!
//! let geojson = parse(
//!     r#"{"type":"MultiLineString","coordinates":[[[170,10],[180,15]],[[-180,15],[-170,20]]]}"#,
//! )?;
//! let bbox = geojson.force_bbox();
//! assert!(bbox.crosses_antimeridian());
//! assert_eq!(bbox.to_string(), "170.000,10.000,-170.000,20.000");
//! # Ok::<(), geotree::error::GeoTreeError>(())
//! ```

pub mod bounding_box;
pub use bounding_box::{BoundingBox, HasBoundingBox};

pub mod coordinates;
pub mod error;

pub mod feature;
pub use feature::{Feature, FeatureId};

pub mod feature_collection;
pub use feature_collection::FeatureCollection;

pub mod geojson;
pub use geojson::{parse, parse_file, write_file, GeoJson};

pub mod geometry;
pub use geometry::{Geometry, ResolveGeometry};

pub mod geometry_type;
pub use geometry_type::{GeoJsonType, GeometryType};

mod object;

pub mod trim;
pub use trim::Trim;
