use crate::chunk::{ChunkReader, ChunkType};
use crate::header::Header;
use crate::{ColorType, PngError};

/// Pixels recovered from a stream written by [`crate::Encoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
    /// Row-major pixel bytes without filter bytes.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Channel bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.color.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        self.pixels.get(start..start + channels)
    }
}

/// Header plus the concatenated `IDAT` payloads of a stream.
#[derive(Debug)]
pub(crate) struct ImageStream {
    pub header: Header,
    pub compressed: Vec<u8>,
}

/// Walks the chunk stream and enforces `IHDR` first, at least one `IDAT`,
/// and `IEND` last. Unknown chunks between them are skipped.
pub(crate) fn read_stream(bytes: &[u8]) -> Result<ImageStream, PngError> {
    let mut header: Option<Header> = None;
    let mut compressed = Vec::new();
    let mut idat_count = 0usize;
    let mut saw_end = false;

    for (index, chunk) in ChunkReader::new(bytes)?.enumerate() {
        let chunk = chunk?;
        match chunk.kind {
            ChunkType::IHDR => {
                if index != 0 {
                    return Err(PngError::Layout(
                        "IHDR must be the first chunk and appear once".to_string(),
                    ));
                }
                header = Some(Header::parse(chunk.data)?);
            }
            kind if index == 0 => {
                return Err(PngError::Layout(format!(
                    "stream starts with {kind} instead of IHDR"
                )));
            }
            ChunkType::IDAT => {
                idat_count += 1;
                compressed.extend_from_slice(chunk.data);
            }
            ChunkType::IEND => {
                if !chunk.data.is_empty() {
                    return Err(PngError::Layout("IEND carries a payload".to_string()));
                }
                saw_end = true;
            }
            _ => {}
        }
    }

    let header = header.ok_or_else(|| PngError::Layout("missing IHDR".to_string()))?;
    if idat_count == 0 {
        return Err(PngError::Layout("missing IDAT".to_string()));
    }
    if !saw_end {
        return Err(PngError::Layout("missing IEND".to_string()));
    }
    Ok(ImageStream { header, compressed })
}

pub(crate) fn inflate(data: &[u8]) -> Result<Vec<u8>, PngError> {
    miniz_oxide::inflate::decompress_to_vec_zlib(data)
        .map_err(|err| PngError::Inflate(format!("{:?}", err.status)))
}

/// Decodes a stream whose scanlines all use filter type 0.
///
/// This is the inverse of [`crate::Encoder::encode`], not a general PNG
/// decoder: palette, greyscale, 16-bit, interlaced and filtered images are
/// rejected.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, PngError> {
    let stream = read_stream(bytes)?;
    let header = stream.header;
    let color = header.ensure_supported()?;
    let raw = inflate(&stream.compressed)?;

    let line = header.scanline_len(color.channels());
    let expected = line * header.height as usize;
    if raw.len() < expected {
        return Err(PngError::Truncated("scanlines"));
    }

    let mut pixels = Vec::with_capacity(expected - header.height as usize);
    for (row, scanline) in raw[..expected].chunks_exact(line).enumerate() {
        let filter = scanline[0];
        if filter != 0 {
            return Err(PngError::Filter {
                row: row as u32,
                filter,
            });
        }
        pixels.extend_from_slice(&scanline[1..]);
    }

    Ok(DecodedImage {
        width: header.width,
        height: header.height,
        color,
        pixels,
    })
}
