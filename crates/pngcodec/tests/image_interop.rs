//! Cross-checks encoder output against an independent PNG decoder.
use image::GenericImageView;
use pngcodec::{decode, encode, ChunkReader, ChunkType, ColorType, Compression, Encoder};

fn gradient(width: u32, height: u32, channels: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * channels);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width.max(1)) as u8);
            pixels.push((y * 255 / height.max(1)) as u8);
            pixels.push(((x + y) % 256) as u8);
            if channels == 4 {
                pixels.push(if (x + y) % 3 == 0 { 0 } else { 255 });
            }
        }
    }
    pixels
}

#[test]
fn rgba_output_decodes_with_image_crate() {
    let pixels = gradient(37, 19, 4);
    let bytes = encode(37, 19, ColorType::Rgba, &pixels).unwrap();

    let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap();
    assert_eq!(decoded.dimensions(), (37, 19));
    assert_eq!(decoded.color(), image::ColorType::Rgba8);
    assert_eq!(decoded.to_rgba8().into_raw(), pixels);
}

#[test]
fn rgb_output_decodes_with_image_crate() {
    let pixels = gradient(8, 33, 3);
    let bytes = Encoder::new()
        .with_compression(Compression::Best)
        .encode(8, 33, ColorType::Rgb, &pixels)
        .unwrap();

    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgb8);
    assert_eq!(decoded.to_rgb8().into_raw(), pixels);
}

#[test]
fn every_chunk_crc_covers_tag_and_payload() {
    let bytes = encode(3, 3, ColorType::Rgba, &gradient(3, 3, 4)).unwrap();
    let mut offset = 8;
    while offset < bytes.len() {
        let length = u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap()) as usize;
        let tagged = &bytes[offset + 4..offset + 8 + length];
        let stored = u32::from_be_bytes(
            bytes[offset + 8 + length..offset + 12 + length]
                .try_into()
                .unwrap(),
        );
        assert_eq!(stored, pngcodec::crc32(tagged));
        offset += 12 + length;
    }
    assert_eq!(offset, bytes.len());
}

#[test]
fn strict_decoder_recovers_what_was_encoded() {
    for color in [ColorType::Rgb, ColorType::Rgba] {
        let pixels = gradient(21, 7, color.channels());
        let bytes = encode(21, 7, color, &pixels).unwrap();
        let image = decode(&bytes).unwrap();
        assert_eq!((image.width, image.height, image.color), (21, 7, color));
        assert_eq!(image.pixels, pixels);

        let idat_chunks = ChunkReader::new(&bytes)
            .unwrap()
            .filter(|chunk| chunk.as_ref().unwrap().kind == ChunkType::IDAT)
            .count();
        assert_eq!(idat_chunks, 1);
    }
}
