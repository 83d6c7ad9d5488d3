use std::io::Cursor;
use std::sync::Arc;

use super::*;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([0, 128, 255, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn spawned_decode_settles_ready() {
    let mut p = PendingImage::spawn(png_bytes(3, 2));
    let LoadState::Ready(img) = p.wait() else {
        panic!("expected ready, got {:?}", p.state());
    };
    assert_eq!((img.width, img.height), (3, 2));
    assert!(p.state().is_settled());
    assert!(p.image().is_some());
}

#[test]
fn spawned_decode_of_garbage_settles_failed() {
    let mut p = PendingImage::spawn(b"nope".to_vec());
    let LoadState::Failed(msg) = p.wait() else {
        panic!("expected failure");
    };
    assert!(msg.contains("decode error"));
    assert!(p.image().is_none());
}

#[test]
fn poll_eventually_settles_and_then_stays() {
    let mut p = PendingImage::spawn(png_bytes(1, 1));
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
    while !p.poll().is_settled() {
        assert!(std::time::Instant::now() < deadline, "decode never settled");
        std::thread::yield_now();
    }
    assert!(matches!(p.poll(), LoadState::Ready(_)));
    assert!(matches!(p.wait(), LoadState::Ready(_)));
}

#[test]
fn ready_and_failed_constructors_are_settled() {
    let img = PreparedImage {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![0, 0, 0, 255]),
    };
    let mut ready = PendingImage::ready(img);
    assert!(matches!(ready.poll(), LoadState::Ready(_)));

    let mut failed = PendingImage::failed("boom");
    assert!(matches!(failed.wait(), LoadState::Failed(m) if m == "boom"));
}

#[test]
fn missing_file_fails_without_spawning() {
    let p = PendingImage::from_path(Path::new("no/such/frame.png"));
    assert!(matches!(p.state(), LoadState::Failed(m) if m.contains("no/such/frame.png")));
}
