use std::fmt;

use crate::{PngError, SIGNATURE};

/// Four-byte ASCII chunk tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Ancillary chunks carry a lowercase first letter.
    pub fn is_ancillary(&self) -> bool {
        self.0[0].is_ascii_lowercase()
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            if byte.is_ascii_graphic() {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

const CRC_TABLE: [u32; 256] = build_crc_table();

const fn build_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 {
                0xedb8_8320 ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

/// Incremental CRC-32 (ISO-HDLC, the variant PNG and zlib use).
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, bytes: &[u8]) {
        let mut c = self.state;
        for &byte in bytes {
            c = CRC_TABLE[((c ^ byte as u32) & 0xff) as usize] ^ (c >> 8);
        }
        self.state = c;
    }

    pub fn finish(&self) -> u32 {
        self.state ^ 0xffff_ffff
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self { state: 0xffff_ffff }
    }
}

/// One-shot CRC-32 of `bytes`.
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(bytes);
    crc.finish()
}

/// An owned chunk ready to be framed into a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: ChunkType,
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(kind: ChunkType, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// CRC over the tag followed by the payload.
    pub fn crc(&self) -> u32 {
        let mut crc = Crc32::new();
        crc.update(self.kind.as_bytes());
        crc.update(&self.data);
        crc.finish()
    }

    /// Number of bytes `write_to` appends.
    pub fn framed_len(&self) -> usize {
        12 + self.data.len()
    }

    /// Appends length, tag, payload and CRC, all big-endian.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), PngError> {
        let length = u32::try_from(self.data.len())
            .ok()
            .filter(|len| *len <= crate::MAX_DIMENSION)
            .ok_or_else(|| {
                PngError::Layout(format!(
                    "{} payload of {} bytes exceeds the chunk size limit",
                    self.kind,
                    self.data.len()
                ))
            })?;
        out.reserve(self.framed_len());
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(self.kind.as_bytes());
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.crc().to_be_bytes());
        Ok(())
    }
}

/// A chunk borrowed from an input stream whose CRC has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'a> {
    pub kind: ChunkType,
    pub data: &'a [u8],
}

/// Walks the chunks of a PNG stream after checking its signature.
///
/// Iteration stops after `IEND` or at the end of input; trailing bytes after
/// `IEND` are ignored.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    rest: &'a [u8],
    done: bool,
}

impl<'a> ChunkReader<'a> {
    pub fn new(stream: &'a [u8]) -> Result<Self, PngError> {
        if stream.len() < SIGNATURE.len() {
            return Err(PngError::Truncated("signature"));
        }
        let (signature, rest) = stream.split_at(SIGNATURE.len());
        if signature != SIGNATURE {
            return Err(PngError::Signature);
        }
        Ok(Self { rest, done: false })
    }

    fn read_chunk(&mut self) -> Result<RawChunk<'a>, PngError> {
        if self.rest.len() < 8 {
            return Err(PngError::Truncated("chunk header"));
        }
        let length = read_u32(&self.rest[0..4]) as usize;
        let kind = ChunkType([self.rest[4], self.rest[5], self.rest[6], self.rest[7]]);
        let body = &self.rest[8..];
        if body.len() < length.saturating_add(4) {
            return Err(PngError::Truncated("chunk body"));
        }
        let data = &body[..length];
        let stored = read_u32(&body[length..length + 4]);

        let mut crc = Crc32::new();
        crc.update(kind.as_bytes());
        crc.update(data);
        let computed = crc.finish();
        if stored != computed {
            return Err(PngError::Crc {
                kind,
                stored,
                computed,
            });
        }

        self.rest = &body[length + 4..];
        Ok(RawChunk { kind, data })
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<RawChunk<'a>, PngError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.rest.is_empty() {
            return None;
        }
        let result = self.read_chunk();
        match &result {
            Ok(chunk) if chunk.kind == ChunkType::IEND => self.done = true,
            Err(_) => self.done = true,
            Ok(_) => {}
        }
        Some(result)
    }
}

pub(crate) fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
