//! End-to-end encode/decode tests against conformant PNG decoders.

use std::io::Write;

use image::{ColorType, ImageFormat};
use pngstream_core::{
    encode, BitDepth, ByteSink, EncodeError, FormatError, PixelLayout, PixelSource, SinkError,
    WriteSink, QUALITY_MAX, QUALITY_MIN,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn encode_to_vec(source: PixelSource<'_>, quality: i32) -> Vec<u8> {
    let mut out = Vec::new();
    encode(source, quality, &mut out).expect("encode should succeed");
    out
}

/// Decode with the png crate, keeping samples exactly as stored.
fn decode_png(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().expect("valid PNG header");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("valid PNG data");
    buf.truncate(info.buffer_size());
    (info, buf)
}

#[test]
fn test_red_rgba_2x2() {
    init_logging();
    let pixels: Vec<u8> = [255u8, 0, 0, 255].repeat(4);
    let source = PixelSource::new(2, 2, PixelLayout::Rgba, BitDepth::Eight, 8, &pixels);

    let png_bytes = encode_to_vec(source, 50);
    let img = image::load_from_memory_with_format(&png_bytes, ImageFormat::Png).unwrap();

    assert_eq!(img.color(), ColorType::Rgba8);
    let rgba = img.to_rgba8();
    assert_eq!(rgba.dimensions(), (2, 2));
    assert!(rgba.pixels().all(|p| p.0 == [255, 0, 0, 255]));
}

#[test]
fn test_single_gray_pixel() {
    init_logging();
    let pixels = [128u8];
    let source = PixelSource::new(1, 1, PixelLayout::Gray, BitDepth::Eight, 1, &pixels);

    let png_bytes = encode_to_vec(source, 50);
    let img = image::load_from_memory_with_format(&png_bytes, ImageFormat::Png).unwrap();

    assert_eq!(img.color(), ColorType::L8);
    assert_eq!(img.to_luma8().get_pixel(0, 0).0, [128]);
}

#[test]
fn test_padded_stride_is_not_encoded() {
    init_logging();
    // 3x2 RGB, stride 16: 9 data bytes and 7 bytes of 0xAB padding per row
    let mut pixels = vec![0xABu8; 32];
    pixels[..9].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    pixels[16..25].copy_from_slice(&[10, 11, 12, 13, 14, 15, 16, 17, 18]);
    let source = PixelSource::new(3, 2, PixelLayout::Rgb, BitDepth::Eight, 16, &pixels);

    let (info, decoded) = decode_png(&encode_to_vec(source, 50));

    assert_eq!((info.width, info.height), (3, 2));
    assert_eq!(decoded, (1..=18).collect::<Vec<u8>>());
}

#[test]
fn test_sixteen_bit_samples_are_big_endian() {
    init_logging();
    // One GrayAlpha pixel: gray 0x1234, alpha 0xFFFF
    let pixels = [0x12u8, 0x34, 0xFF, 0xFF];
    let source = PixelSource::packed(1, 1, PixelLayout::GrayAlpha, BitDepth::Sixteen, &pixels);

    let png_bytes = encode_to_vec(source, 50);
    let (info, decoded) = decode_png(&png_bytes);
    assert_eq!(info.bit_depth, png::BitDepth::Sixteen);
    assert_eq!(info.color_type, png::ColorType::GrayscaleAlpha);
    assert_eq!(decoded, pixels);

    let img = image::load_from_memory_with_format(&png_bytes, ImageFormat::Png).unwrap();
    assert_eq!(img.to_luma_alpha16().get_pixel(0, 0).0, [0x1234, 0xFFFF]);
}

#[test]
fn test_short_buffer_writes_nothing() {
    init_logging();
    let pixels = vec![0u8; 2 * 8 - 1];
    let source = PixelSource::new(2, 2, PixelLayout::Rgba, BitDepth::Eight, 8, &pixels);
    let mut out = Vec::new();

    let err = encode(source, 50, &mut out).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::InvalidInput(FormatError::BufferTooShort { .. })
    ));
    assert!(out.is_empty());
}

#[test]
fn test_quality_boundaries_clamp() {
    init_logging();
    let pixels: Vec<u8> = (0..64u32).map(|i| (i * 37 % 251) as u8).collect();
    let source = PixelSource::packed(4, 4, PixelLayout::Rgba, BitDepth::Eight, &pixels);

    let at_min = encode_to_vec(source, QUALITY_MIN);
    let below_min = encode_to_vec(source, QUALITY_MIN - 1);
    let at_max = encode_to_vec(source, QUALITY_MAX);
    let above_max = encode_to_vec(source, QUALITY_MAX + 1);

    assert_eq!(below_min, at_min);
    assert_eq!(above_max, at_max);
    for bytes in [&at_min, &at_max] {
        assert_eq!(decode_png(bytes).1, pixels);
    }
}

#[test]
fn test_write_sink_over_io_writer() {
    init_logging();
    let pixels = [9u8, 8, 7, 6];
    let source = PixelSource::packed(2, 2, PixelLayout::Gray, BitDepth::Eight, &pixels);

    let mut sink = WriteSink::new(std::io::BufWriter::new(Vec::new()));
    encode(source, 90, &mut sink).unwrap();
    let mut writer = sink.into_inner();
    writer.flush().unwrap();

    assert_eq!(decode_png(writer.get_ref()).1, pixels);
}

#[test]
fn test_from_decoded_image() {
    init_logging();
    let img = image::DynamicImage::ImageLumaA8(image::GrayAlphaImage::from_fn(5, 3, |x, y| {
        image::LumaA([(x * 40 + y) as u8, 200])
    }));
    let source = PixelSource::from_image(&img).unwrap();

    let png_bytes = encode_to_vec(source, 75);
    let decoded = image::load_from_memory_with_format(&png_bytes, ImageFormat::Png).unwrap();
    assert_eq!(decoded, img);
}

#[test]
fn test_sink_rejecting_everything() {
    struct Closed;

    impl ByteSink for Closed {
        fn write_chunk(&mut self, _chunk: &[u8]) -> Result<(), SinkError> {
            Err(SinkError::rejected("stream closed"))
        }
    }

    init_logging();
    let pixels = [0u8; 3];
    let source = PixelSource::packed(1, 1, PixelLayout::Rgb, BitDepth::Eight, &pixels);
    let err = encode(source, 50, &mut Closed).unwrap_err();
    assert!(matches!(err, EncodeError::SinkWrite(SinkError::Rejected(_))));
}
