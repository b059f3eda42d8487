use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use geotree::{
    parse, BoundingBox, Feature, FeatureCollection, GeoJson, GeoJsonType, Geometry, GeometryType,
    HasBoundingBox, ResolveGeometry, Trim,
};

const POINT: &str = include_str!("../test-data/point.geojson");
const LINE_STRING: &str = include_str!("../test-data/linestring.geojson");
const POLYGON: &str = include_str!("../test-data/polygon.geojson");
const POLYGON_DATELINE: &str = include_str!("../test-data/polygon-dateline.geojson");
const POLYGON_HOLE: &str = include_str!("../test-data/polygon-hole.geojson");
const MULTI_POINT: &str = include_str!("../test-data/multipoint.geojson");
const MULTI_LINE_STRING: &str = include_str!("../test-data/multilinestring.geojson");
const MULTI_POLYGON: &str = include_str!("../test-data/multipolygon.geojson");
const MULTI_POLYGON_ANTIMERIDIAN: &str = include_str!("../test-data/multipolygon2.geojson");
const GEOMETRY_COLLECTION: &str = include_str!("../test-data/geometrycollection.geojson");
const FEATURE: &str = include_str!("../test-data/feature.geojson");
const FEATURE_COLLECTION: &str = include_str!("../test-data/featureCollection.geojson");
const SAMPLE: &str = include_str!("../test-data/sample.geojson");
const BOUNDING_BOX: &str = include_str!("../test-data/boundingbox.geojson");

const ALL_FILES: [&str; 14] = [
    POINT,
    LINE_STRING,
    POLYGON,
    POLYGON_DATELINE,
    POLYGON_HOLE,
    MULTI_POINT,
    MULTI_LINE_STRING,
    MULTI_POLYGON,
    MULTI_POLYGON_ANTIMERIDIAN,
    GEOMETRY_COLLECTION,
    FEATURE,
    FEATURE_COLLECTION,
    SAMPLE,
    BOUNDING_BOX,
];

fn bbox(s: &str) -> BoundingBox {
    s.parse().expect("valid bounding box")
}

#[test]
fn all_files_survive_re_encoding() {
    for text in ALL_FILES {
        let geojson = parse(text).expect("valid file");
        let encoded = geojson.to_string();
        let reparsed = parse(&encoded).expect("valid re-encoded file");
        assert_eq!(reparsed, geojson);
        assert_eq!(reparsed.to_string(), encoded);
        assert!(!geojson.force_bbox().is_empty());
    }
}

#[test]
fn geometry_types() {
    let expected = [
        (POINT, GeometryType::Point),
        (LINE_STRING, GeometryType::LineString),
        (POLYGON, GeometryType::Polygon),
        (POLYGON_HOLE, GeometryType::Polygon),
        (MULTI_POINT, GeometryType::MultiPoint),
        (MULTI_LINE_STRING, GeometryType::MultiLineString),
        (MULTI_POLYGON, GeometryType::MultiPolygon),
        (GEOMETRY_COLLECTION, GeometryType::GeometryCollection),
    ];

    for (text, geometry_type) in expected {
        let geojson = parse(text).expect("valid file");
        assert_eq!(geojson.geojson_type(), GeoJsonType::Geometry(geometry_type));
    }
}

#[test]
fn point_output() {
    let geojson = parse(POINT).expect("valid file");
    assert_eq!(
        geojson.to_string(),
        r#"{"type":"Point","coordinates":[100,0]}"#
    );
}

#[test]
fn feature_file() {
    let GeoJson::Feature(feature) = parse(FEATURE).expect("valid file") else {
        panic!("invalid object type");
    };

    assert_eq!(feature.id_str(), "98765");
    assert_eq!(feature.property_string("prop0"), "value0");
    assert_eq!(feature.property_string("prop1"), "0");
    assert_eq!(feature.property_int("prop1"), 0);
    assert_eq!(
        feature.geometry().map(Geometry::geometry_type),
        Some(GeometryType::LineString)
    );
    assert_eq!(feature.force_bbox(), bbox("102,0,105,1"));
}

#[test]
fn joined_boxes_cross_antimeridian() {
    let joined = BoundingBox::from_boxes(&[bbox("-180,10,-170,20"), bbox("170,10,180,20")]);
    assert!(joined.is_valid());
    assert!(joined.crosses_antimeridian());

    let other = bbox("-180,-70,-179,70");
    assert!(joined.overlaps(&other));
    assert!(other.overlaps(&joined));

    let GeoJson::FeatureCollection(collection) =
        parse(FEATURE_COLLECTION).expect("valid file")
    else {
        panic!("invalid object type");
    };
    let collection_bbox = collection.force_bbox();
    assert_eq!(collection_bbox, bbox("100,0,105,1"));
    assert!(!joined.overlaps(&collection_bbox));
    assert!(!collection_bbox.overlaps(&joined));
}

#[test]
fn multipolygon_across_antimeridian() {
    let geojson = parse(MULTI_POLYGON_ANTIMERIDIAN).expect("valid file");
    let GeoJson::Geometry(Geometry::MultiPolygon(polygons)) = &geojson else {
        panic!("invalid geometry type");
    };

    let bbox = polygons.force_bbox();
    assert!(bbox.crosses_antimeridian());
    assert_eq!(bbox.to_vec(), vec![170.0, 40.0, -170.0, 50.0]);
}

#[test]
fn stored_boxes_take_precedence() {
    let geojson = parse(POLYGON_DATELINE).expect("valid file");
    assert!(geojson.bbox().crosses_antimeridian());
    assert_eq!(geojson.force_bbox(), bbox("170,-10,-170,10"));
    assert_eq!(geojson.compute_bbox(), bbox("170,-10,190,10"));

    let GeoJson::FeatureCollection(collection) = parse(BOUNDING_BOX).expect("valid file") else {
        panic!("invalid object type");
    };
    assert_eq!(collection.force_bbox(), bbox("100,0,105,1"));
    assert_eq!(collection.features()[0].bbox(), bbox("102,0,105,1"));
    assert!(collection.features()[1].bbox().is_empty());
    assert_eq!(collection.features()[1].force_bbox(), bbox("100,0,101,1"));
}

#[test]
fn collection_box_is_merge_of_feature_boxes() {
    for text in [FEATURE_COLLECTION, SAMPLE, BOUNDING_BOX] {
        let collection: FeatureCollection = serde_json::from_str(text).expect("valid file");
        let expected = collection
            .features()
            .iter()
            .fold(BoundingBox::empty(), |acc, feature| {
                acc.merge(&feature.force_bbox())
            });
        assert_eq!(collection.compute_bbox(), expected);
    }
}

#[test]
fn sample_collection() {
    let GeoJson::FeatureCollection(mut collection) = parse(SAMPLE).expect("valid file") else {
        panic!("invalid object type");
    };
    assert_eq!(collection.len(), 10);

    let bbox = collection.force_bbox();
    assert_abs_diff_eq!(bbox.x_min().expect("not empty"), -122.4783);
    assert_abs_diff_eq!(bbox.y_min().expect("not empty"), -36.8485);
    assert_abs_diff_eq!(bbox.x_max().expect("not empty"), 174.7633);
    assert_abs_diff_eq!(bbox.y_max().expect("not empty"), 51.5007);

    collection.fill_properties();
    assert_eq!(collection.features()[3].property_string("name"), "Big Ben");
    assert_eq!(collection.features()[3].id_str(), "4");

    let trimmed = collection.trim(1);
    assert_eq!(trimmed.features()[0].force_bbox(), crate::bbox("-77,38.8,-77,38.8"));
}

#[test]
fn fill_properties_in_mixed_collection() {
    let GeoJson::FeatureCollection(mut collection) =
        parse(FEATURE_COLLECTION).expect("valid file")
    else {
        panic!("invalid object type");
    };

    collection.fill_properties();
    for feature in collection.features() {
        let keys: Vec<_> = feature.properties().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"prop0".to_string()));
        assert!(keys.contains(&"prop1".to_string()));
        assert!(keys.contains(&"prop2".to_string()));
    }
    assert_eq!(
        collection.features()[3].property_string_slice("prop2"),
        vec!["a", "b"]
    );
    assert_eq!(collection.features()[3].id_str(), "no-geometry");
}

#[test]
fn geometry_extraction() {
    let geojson = parse(FEATURE_COLLECTION).expect("valid file");
    let geometries = geojson.to_geometry_array();
    assert_eq!(
        geometries
            .iter()
            .map(Geometry::geometry_type)
            .collect::<Vec<_>>(),
        vec![
            GeometryType::Point,
            GeometryType::LineString,
            GeometryType::Polygon
        ]
    );
    assert_eq!(geojson.to_multi_point().coordinates().len(), 10);
}

#[test]
fn resolve_from_generic_tree() {
    let value: serde_json::Value = serde_json::from_str(MULTI_POLYGON).expect("valid json");
    let geometry = (&value).resolve_geometry().expect("valid geometry");
    let again = geometry.clone().resolve_geometry().expect("valid geometry");
    assert_eq!(again, geometry);
    assert_matches!(geometry, Geometry::MultiPolygon(_));

    let empty_feature = Feature::new(None);
    assert_eq!(
        GeoJson::from(empty_feature).to_string(),
        r#"{"type":"Feature","geometry":null}"#
    );
}
