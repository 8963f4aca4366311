use super::*;
use crate::PngStackError;

#[test]
fn encodes_buffer_in_its_own_order() {
    let px = [1u8, 2, 3, 4, 5, 6];
    let flat = FlatImage::new(&px, 2, 1, PixelFormat::Rgb);
    assert_eq!((flat.width(), flat.height()), (2, 1));
    assert_eq!(flat.format(), PixelFormat::Rgb);

    let png = flat.encode().unwrap();
    let img = image::load_from_memory(png.bytes()).unwrap();
    assert_eq!(img.color(), image::ColorType::Rgb8);
    assert_eq!(img.to_rgb8().into_raw(), px.to_vec());
}

#[test]
fn bgra_buffer_keeps_alpha() {
    let px = [9u8, 8, 7, 0];
    let png = FlatImage::new(&px, 1, 1, PixelFormat::Bgra).encode().unwrap();
    let img = image::load_from_memory(png.bytes()).unwrap();
    assert_eq!(img.to_rgba8().into_raw(), vec![7, 8, 9, 0]);
}

#[test]
fn undersized_buffer_is_rejected_by_codec() {
    let px = [0u8; 5];
    let err = FlatImage::new(&px, 2, 1, PixelFormat::Rgb)
        .encode()
        .unwrap_err();
    assert!(matches!(err, PngStackError::Encoding(_)));
}
