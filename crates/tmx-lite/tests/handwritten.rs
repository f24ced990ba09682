use std::collections::HashMap;

use tmx_lite::{
    data::TileDataError, load_map, parse_map, FlipFlags, Gid, MapData, MapParseError, TileLayer,
};

#[test]
fn full_parse() {
    let map = load_map("./tests/maps/handwritten.tmx").unwrap();

    assert_eq!((map.width, map.height), (4, 3));
    assert_eq!((map.tile_width, map.tile_height), (16, 16));
    assert_eq!(map.pixel_size(), (64, 48));

    let names: Vec<&str> = map.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["ground", "decor", "fog"]);
    assert_eq!(map.layers[0].ids, [1, 1, 2, 2, 1, 3, 3, 2, 4, 4, 4, 4]);
    assert!(map.layers.iter().all(|l| l.ids.len() == 12));

    assert_eq!(
        map.properties,
        HashMap::from([
            ("mode".to_owned(), "b".to_owned()),
            ("title".to_owned(), "Handwritten".to_owned()),
        ])
    );
}

#[test]
fn flipped_tiles() {
    let map = load_map("./tests/maps/handwritten.tmx").unwrap();

    let flipped = map.tile(1, 1, 1).unwrap();
    assert_eq!(flipped.raw(), 2_147_483_653);
    assert_eq!(flipped.id(), 5);
    assert_eq!(flipped.flags(), FlipFlags::HORIZONTAL);

    assert_eq!(map.tile(1, 3, 2), Some(Gid::from_raw(7)));
    assert_eq!(map.tile(1, 4, 0), None);

    let decor = map.layer("decor").unwrap();
    assert_eq!(decor.gids().filter(|g| !g.is_empty()).count(), 2);
}

#[test]
fn loading_twice_is_equal() {
    let first = load_map("./tests/maps/handwritten.tmx").unwrap();
    let second = load_map("./tests/maps/handwritten.tmx").unwrap();
    assert_eq!(first, second);
}

#[test]
fn bare_tileset_and_defaults() {
    let map = load_map("./tests/maps/bare-tileset.tmx").unwrap();

    assert_eq!(
        map,
        MapData {
            width: 0,
            height: 2,
            tile_width: 8,
            tile_height: 0,
            layers: vec![TileLayer {
                name: "only".to_owned(),
                ids: vec![1, 2, 3, 4],
            }],
            properties: HashMap::new(),
        }
    );
}

#[test]
fn missing_file() {
    let err = load_map("./tests/maps/does-not-exist.tmx").unwrap_err();
    assert!(matches!(err, MapParseError::MissingFile { .. }));
    assert!(err.to_string().contains("does-not-exist.tmx"));

    // A directory is not a regular file either.
    let err = load_map("./tests/maps").unwrap_err();
    assert!(matches!(err, MapParseError::MissingFile { .. }));
}

#[test]
fn missing_tileset() {
    let err = load_map("./tests/maps/no-tileset.tmx").unwrap_err();
    assert!(matches!(err, MapParseError::MissingTileset { .. }));
    assert_eq!(err.to_string(), "TMX missing <tileset> definition");
}

#[test]
fn missing_layer_data() {
    let err = load_map("./tests/maps/empty-data.tmx").unwrap_err();
    match &err {
        MapParseError::MissingLayerData { layer, .. } => assert_eq!(layer, "broken"),
        other => panic!("expected MissingLayerData, got {other:?}"),
    }
    assert!(err.to_string().contains("'broken'"));
}

#[test]
fn invalid_root_attribute() {
    let err = load_map("./tests/maps/bad-width.tmx").unwrap_err();
    match err {
        MapParseError::InvalidAttribute {
            attribute, value, ..
        } => {
            assert_eq!(attribute, "width");
            assert_eq!(value, "abc");
        }
        other => panic!("expected InvalidAttribute, got {other:?}"),
    }
}

#[test]
fn invalid_tile_id() {
    let err = load_map("./tests/maps/bad-tile.tmx").unwrap_err();
    match &err {
        MapParseError::InvalidTileId {
            layer,
            source: TileDataError::InvalidId { token, .. },
            ..
        } => {
            assert_eq!(layer, "ground");
            assert_eq!(token, "x");
        }
        other => panic!("expected InvalidTileId, got {other:?}"),
    }
    assert_eq!(err.to_string(), "invalid tile id in layer 'ground'");
}

#[test]
fn invalid_property() {
    let err = load_map("./tests/maps/bad-property.tmx").unwrap_err();
    assert!(matches!(err, MapParseError::InvalidProperty { .. }));
    assert_eq!(err.to_string(), "invalid property without name or value");
}

#[test]
fn unsupported_encoding() {
    let err = load_map("./tests/maps/base64.tmx").unwrap_err();
    match err {
        MapParseError::UnsupportedEncoding {
            layer, encoding, ..
        } => {
            assert_eq!(layer, "packed");
            assert_eq!(encoding, "base64");
        }
        other => panic!("expected UnsupportedEncoding, got {other:?}"),
    }
}

#[test]
fn malformed_xml() {
    let err = load_map("./tests/maps/malformed.tmx").unwrap_err();
    assert!(matches!(err, MapParseError::MalformedXml { span: Some(_), .. }));
    assert!(err.to_string().starts_with("failed to parse TMX: "));
}

#[test]
fn empty_map_parses() {
    let map = parse_map(r#"<map><tileset firstgid="1"/></map>"#).unwrap();
    assert_eq!(map, MapData::default());
}

#[test]
fn tileset_may_be_nested() {
    let map = parse_map(
        r#"<map width="1" height="1">
             <editorsettings><tileset/></editorsettings>
             <layer><data>5</data></layer>
           </map>"#,
    )
    .unwrap();

    assert_eq!(map.layers[0].name, "");
    assert_eq!(map.layers[0].ids, [5]);
}

#[test]
fn whitespace_only_data_is_missing() {
    let err = parse_map(
        r#"<map><tileset/><layer name="blank"><data encoding="csv">
           </data></layer></map>"#,
    )
    .unwrap_err();
    assert!(matches!(err, MapParseError::MissingLayerData { layer, .. } if layer == "blank"));
}

#[test]
fn layer_without_data_element() {
    let err = parse_map(r#"<map><tileset/><layer name="hollow"/></map>"#).unwrap_err();
    assert!(matches!(err, MapParseError::MissingLayerData { layer, .. } if layer == "hollow"));
}

#[test]
fn negative_sizes_are_rejected() {
    let err = parse_map(r#"<map tileheight="-16"><tileset/></map>"#).unwrap_err();
    assert!(matches!(
        err,
        MapParseError::InvalidAttribute { attribute: "tileheight", .. }
    ));
}

#[test]
fn first_failure_wins() {
    // Both the tile data and the property are broken; layers are read first.
    let err = parse_map(
        r#"<map><tileset/>
             <properties><property value="x"/></properties>
             <layer name="l"><data>1,?</data></layer>
           </map>"#,
    )
    .unwrap_err();
    assert!(matches!(err, MapParseError::InvalidTileId { .. }));
}
