use std::io::Cursor;

use super::*;

fn encode(img: image::RgbaImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    match format {
        image::ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut buf), format)
            .unwrap(),
        _ => image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), format)
            .unwrap(),
    }
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();
    let buf = encode(img, image::ImageFormat::Png);

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.size(), ImageSize::new(1, 1).unwrap());
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_jpeg_is_opaque() {
    let img = image::RgbaImage::from_pixel(16, 8, image::Rgba([200, 20, 20, 255]));
    let buf = encode(img, image::ImageFormat::Jpeg);

    let prepared = decode_image(&buf).unwrap();
    assert_eq!((prepared.width, prepared.height), (16, 8));
    assert!(prepared.rgba8_premul.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn decode_garbage_is_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, FramefitError::Decode(_)));
}

#[test]
fn decode_rejects_sides_the_rasterizer_cannot_draw() {
    let img = image::RgbaImage::from_pixel(70_000, 1, image::Rgba([1, 2, 3, 255]));
    let buf = encode(img, image::ImageFormat::Png);
    let err = decode_image(&buf).unwrap_err();
    assert!(matches!(err, FramefitError::Decode(_)));

    let img = image::RgbaImage::from_pixel(1, 70_000, image::Rgba([1, 2, 3, 255]));
    let buf = encode(img, image::ImageFormat::Png);
    assert!(matches!(decode_image(&buf), Err(FramefitError::Decode(_))));

    assert!(check_drawable(65_535, 1).is_ok());
}

#[test]
fn declared_type_check_accepts_png_and_jpeg_only() {
    assert_eq!(
        ImageKind::from_declared_type("image/png").unwrap(),
        ImageKind::Png
    );
    assert_eq!(
        ImageKind::from_declared_type("IMAGE/JPEG").unwrap(),
        ImageKind::Jpeg
    );
    assert_eq!(
        ImageKind::from_declared_type("image/jpeg; q=0.9").unwrap(),
        ImageKind::Jpeg
    );
    for bad in ["image/gif", "image/jpg", "image/webp", "", "text/plain"] {
        let err = ImageKind::from_declared_type(bad).unwrap_err();
        assert!(matches!(err, FramefitError::UnsupportedType(_)), "{bad}");
    }
    assert_eq!(ImageKind::Jpeg.mime(), "image/jpeg");
}

#[test]
fn declared_type_follows_extension() {
    assert_eq!(declared_type_for_path(Path::new("a/b.PNG")), "image/png");
    assert_eq!(declared_type_for_path(Path::new("me.jpg")), "image/jpeg");
    assert_eq!(declared_type_for_path(Path::new("me.jpeg")), "image/jpeg");
    assert_eq!(declared_type_for_path(Path::new("anim.gif")), "image/gif");
    assert_eq!(
        declared_type_for_path(Path::new("noext")),
        "application/octet-stream"
    );
}
