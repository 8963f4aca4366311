use super::*;
use crate::GeometryError;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "pngstack_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn parses_with_defaults() {
    let m: StackManifest = serde_json::from_str(
        r#"{ "width": 4, "height": 2,
             "tiles": [{ "source": "a.raw", "x": 1, "y": 0, "w": 2, "h": 2 }] }"#,
    )
    .unwrap();
    assert_eq!(m.format, PixelFormat::Rgb);
    assert_eq!(m.compression, Compression::Default);
    assert_eq!(m.tiles[0].rect, TileRect::new(1, 0, 2, 2));
    assert_eq!(m.tile_format(&m.tiles[0]), PixelFormat::Rgb);
}

#[test]
fn rejects_unknown_format_token() {
    let res = serde_json::from_str::<StackManifest>(
        r#"{ "width": 4, "height": 2, "format": "argb" }"#,
    );
    assert!(res.is_err());
}

#[test]
fn validate_catches_bad_values() {
    let mut m = StackManifest {
        width: 0,
        height: 2,
        format: PixelFormat::Rgba,
        compression: Compression::Fast,
        tiles: vec![],
    };
    assert!(m.validate().is_err());

    m.width = 2;
    m.validate().unwrap();

    m.tiles.push(TileSpec {
        source: "../escape.raw".to_string(),
        format: None,
        rect: TileRect::new(0, 0, 1, 1),
    });
    assert!(matches!(m.validate(), Err(PngStackError::Validation(_))));
}

#[test]
fn normalize_path_cross_platform() {
    assert_eq!(normalize_rel_path("a/b.raw").unwrap(), "a/b.raw");
    assert_eq!(normalize_rel_path("a\\b.raw").unwrap(), "a/b.raw");
    assert_eq!(normalize_rel_path("./a//b.raw").unwrap(), "a/b.raw");
    assert!(normalize_rel_path("../x.raw").is_err());
    assert!(normalize_rel_path("/abs.raw").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn normalize_path_rejects_drive_and_stream_prefixes() {
    for bad in [
        "C:/tiles/a.raw",
        "C:\\tiles\\a.raw",
        "c:a.raw",
        "a.raw:stream",
        "\\\\srv\\share\\a.raw",
    ] {
        assert!(
            matches!(normalize_rel_path(bad), Err(PngStackError::Validation(_))),
            "{bad:?} was accepted"
        );
    }
    assert_eq!(normalize_rel_path("tiles\\a.raw").unwrap(), "tiles/a.raw");
}

#[test]
fn validate_rejects_drive_prefixed_tile() {
    let m = StackManifest {
        width: 2,
        height: 2,
        format: PixelFormat::Rgb,
        compression: Compression::Default,
        tiles: vec![TileSpec {
            source: "D:/elsewhere.raw".to_string(),
            format: None,
            rect: TileRect::new(0, 0, 1, 1),
        }],
    };
    assert!(matches!(m.validate(), Err(PngStackError::Validation(_))));
}

#[test]
fn build_canvas_blits_tiles_in_order() {
    let tmp = temp_dir("manifest_build");
    std::fs::create_dir_all(tmp.join("tiles")).unwrap();
    std::fs::write(tmp.join("tiles/red.raw"), [255u8, 0, 0].repeat(4)).unwrap();
    std::fs::write(tmp.join("tiles/blue.bgra"), [255u8, 0, 0, 128]).unwrap();

    let m = StackManifest {
        width: 3,
        height: 2,
        format: PixelFormat::Rgb,
        compression: Compression::Default,
        tiles: vec![
            TileSpec {
                source: "tiles/red.raw".to_string(),
                format: None,
                rect: TileRect::new(0, 0, 2, 2),
            },
            TileSpec {
                source: "tiles/blue.bgra".to_string(),
                format: Some(PixelFormat::Bgra),
                rect: TileRect::new(1, 1, 1, 1),
            },
        ],
    };

    let canvas = build_canvas(&m, &tmp).unwrap();
    assert_eq!(canvas.pixel(0, 0), Some([255, 0, 0, 0]));
    assert_eq!(canvas.pixel(1, 1), Some([0, 0, 255, 128]));
    assert_eq!(canvas.pixel(2, 0), Some([0xFF; 4]));

    let png = compose_manifest(&m, &tmp).unwrap();
    assert_eq!(png.bytes(), canvas.finish().unwrap().bytes());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_tile_and_bad_geometry_are_errors() {
    let tmp = temp_dir("manifest_errors");
    std::fs::create_dir_all(&tmp).unwrap();

    let mut m = StackManifest {
        width: 2,
        height: 2,
        format: PixelFormat::Rgba,
        compression: Compression::Default,
        tiles: vec![TileSpec {
            source: "nope.raw".to_string(),
            format: None,
            rect: TileRect::new(0, 0, 1, 1),
        }],
    };
    assert!(matches!(build_canvas(&m, &tmp), Err(PngStackError::Other(_))));

    std::fs::write(tmp.join("t.raw"), [0u8; 16]).unwrap();
    m.tiles[0].source = "t.raw".to_string();
    m.tiles[0].rect = TileRect::new(1, 0, 2, 2);
    let err = build_canvas(&m, &tmp).unwrap_err();
    assert!(matches!(
        err.as_geometry(),
        Some(GeometryError::ExceedsWidth { .. })
    ));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn from_path_reads_json() {
    let tmp = temp_dir("manifest_from_path");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("stack.json");
    std::fs::write(&path, r#"{ "width": 1, "height": 1, "format": "bgra" }"#).unwrap();

    let m = StackManifest::from_path(&path).unwrap();
    assert_eq!(m.format, PixelFormat::Bgra);
    assert!(m.tiles.is_empty());
    assert!(StackManifest::from_path(&tmp.join("missing.json")).is_err());

    std::fs::remove_dir_all(&tmp).ok();
}
