// crates/regiondb-core/src/storage.rs

//! # Index Storage
//!
//! Single-file binary format for a [`RegionIndex`]:
//!
//! | offset | size | field                                   |
//! |--------|------|-----------------------------------------|
//! | 0      | 4    | magic `RIDX`                            |
//! | 4      | 1    | format version                          |
//! | 5      | 1    | flags (bit 0 = payload compressed)      |
//! | 6      | 8    | payload length, little-endian u64       |
//! | 14     | N    | payload (bincode, optionally zlib)      |
//! | 14+N   | 32   | SHA-256 of the payload bytes as stored  |
//!
//! Any digest mismatch is fatal: a corrupted index is never decoded.

use crate::common::LogContext;
use crate::config::CompressionMode;
use crate::error::{RegionDbError, Result};
use crate::index::RegionIndex;
use crate::loader::common_io;
use bincode::Options;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

pub const MAGIC: [u8; 4] = *b"RIDX";
pub const FORMAT_VERSION: u8 = 1;
pub const FLAG_COMPRESSED: u8 = 0b0000_0001;
pub const HEADER_LEN: usize = 14;
pub const DIGEST_LEN: usize = 32;

/// Header fields of a stored index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: u8,
    pub flags: u8,
    pub payload_len: u64,
}

impl FrameHeader {
    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }
}

/// Saves and loads [`RegionIndex`] files.
#[derive(Debug, Clone)]
pub struct IndexStorage {
    compression: CompressionMode,
    log: LogContext,
}

impl IndexStorage {
    pub fn new(compression: CompressionMode) -> Self {
        Self {
            compression,
            log: LogContext::default().child("storage"),
        }
    }

    pub fn with_log(mut self, log: LogContext) -> Self {
        self.log = log;
        self
    }

    pub fn compression(&self) -> CompressionMode {
        self.compression
    }

    // -------------------------------------------------------------------------
    // SAVE
    // -------------------------------------------------------------------------

    pub fn save(&self, path: impl AsRef<Path>, index: &RegionIndex) -> Result<()> {
        let path = path.as_ref();
        let result = File::create(path)
            .map_err(RegionDbError::Io)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                self.write_to(&mut writer, index)?;
                writer.flush()?;
                Ok(())
            });
        match &result {
            Ok(()) => log::debug!(target: self.log.target(), "saved index to {}", path.display()),
            Err(e) => log::error!(
                target: self.log.target(),
                "failed to save index to {}: {e}",
                path.display()
            ),
        }
        result
    }

    /// Encodes the full frame into memory.
    pub fn to_bytes(&self, index: &RegionIndex) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out, index)?;
        Ok(out)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, index: &RegionIndex) -> Result<()> {
        let (flags, payload) = self.encode_payload(index)?;
        let digest = Sha256::digest(&payload);

        writer.write_all(&MAGIC)?;
        writer.write_all(&[FORMAT_VERSION, flags])?;
        writer.write_all(&(payload.len() as u64).to_le_bytes())?;
        writer.write_all(&payload)?;
        writer.write_all(&digest)?;
        Ok(())
    }

    fn encode_payload(&self, index: &RegionIndex) -> Result<(u8, Vec<u8>)> {
        let encoded = encode_options().serialize(index)?;
        match self.compression {
            CompressionMode::None => Ok((0, encoded)),
            CompressionMode::Zlib => {
                #[cfg(feature = "compact")]
                {
                    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                    encoder.write_all(&encoded)?;
                    Ok((FLAG_COMPRESSED, encoder.finish()?))
                }
                #[cfg(not(feature = "compact"))]
                {
                    Err(RegionDbError::InvalidArgument(
                        "zlib compression requested but 'compact' is disabled".into(),
                    ))
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // LOAD
    // -------------------------------------------------------------------------

    pub fn load(&self, path: impl AsRef<Path>) -> Result<RegionIndex> {
        let path = path.as_ref();
        let result = common_io::open_file(path).and_then(|file| {
            let file_len = file.metadata()?.len();
            read_frame(&mut BufReader::new(file), Some(file_len))
        });
        match &result {
            Ok(index) => log::debug!(
                target: self.log.target(),
                "loaded index with {} regions from {}",
                index.region_count(),
                path.display()
            ),
            Err(e) => log::error!(
                target: self.log.target(),
                "failed to load index from {}: {e}",
                path.display()
            ),
        }
        result
    }

    pub fn from_bytes(&self, bytes: &[u8]) -> Result<RegionIndex> {
        read_frame(&mut &bytes[..], Some(bytes.len() as u64))
    }

    /// Reads only the header of a stored index.
    pub fn inspect(&self, path: impl AsRef<Path>) -> Result<FrameHeader> {
        let mut reader = BufReader::new(common_io::open_file(path.as_ref())?);
        read_header(&mut reader)
    }
}

impl Default for IndexStorage {
    fn default() -> Self {
        Self::new(CompressionMode::default())
    }
}

fn encode_options() -> impl Options {
    bincode::DefaultOptions::new()
}

// Decoding may never claim more bytes than the buffer actually holds.
fn decode_options(available: usize) -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(available as u64)
        .allow_trailing_bytes()
}

fn truncated(what: &str) -> impl FnOnce(std::io::Error) -> RegionDbError + '_ {
    move |e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            RegionDbError::Format(format!("truncated {what}"))
        } else {
            RegionDbError::Io(e)
        }
    }
}

fn read_header<R: Read>(reader: &mut R) -> Result<FrameHeader> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(truncated("header"))?;
    if magic != MAGIC {
        return Err(RegionDbError::Format(format!(
            "bad magic {magic:02x?}, expected {MAGIC:02x?}"
        )));
    }

    let mut rest = [0u8; HEADER_LEN - 4];
    reader.read_exact(&mut rest).map_err(truncated("header"))?;
    let mut len = [0u8; 8];
    len.copy_from_slice(&rest[2..]);

    Ok(FrameHeader {
        version: rest[0],
        flags: rest[1],
        payload_len: u64::from_le_bytes(len),
    })
}

fn read_frame<R: Read>(reader: &mut R, total_len: Option<u64>) -> Result<RegionIndex> {
    let header = read_header(reader)?;
    // Forward-compatibility guard: a newer writer may change the payload layout.
    if header.version > FORMAT_VERSION {
        return Err(RegionDbError::Format(format!(
            "unsupported format version {}",
            header.version
        )));
    }

    let framed = (HEADER_LEN + DIGEST_LEN) as u64;
    let declared_fits = match total_len {
        Some(total) => total >= framed && header.payload_len <= total - framed,
        None => true,
    };
    if !declared_fits {
        return Err(RegionDbError::Format(format!(
            "declared payload length {} exceeds file size",
            header.payload_len
        )));
    }

    let mut payload = vec![0u8; header.payload_len as usize];
    reader.read_exact(&mut payload).map_err(truncated("payload"))?;
    let mut stored = [0u8; DIGEST_LEN];
    reader.read_exact(&mut stored).map_err(truncated("digest"))?;

    if Sha256::digest(&payload).as_slice() != stored {
        return Err(RegionDbError::Integrity(
            "payload digest does not match stored SHA-256".into(),
        ));
    }

    let decoded = if header.is_compressed() {
        decompress(&payload)?
    } else {
        payload
    };
    Ok(decode_options(decoded.len()).deserialize(&decoded)?)
}

#[cfg(feature = "compact")]
fn decompress(payload: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(payload).read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(not(feature = "compact"))]
fn decompress(_payload: &[u8]) -> Result<Vec<u8>> {
    Err(RegionDbError::Decompress)
}

// -----------------------------------------------------------------------------
// CONVENIENCE (on the index itself)
// -----------------------------------------------------------------------------

impl RegionIndex {
    /// Writes the index with the default compression.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        IndexStorage::default().save(path, self)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        IndexStorage::default().load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::builder::IndexBuilder;
    use crate::model::RegionRaw;

    fn index() -> RegionIndex {
        IndexBuilder::new(vec![
            RegionRaw::new("440000", "广东省", "省级").with_pinyin("guang dong sheng", "gd"),
            RegionRaw::new("440600", "佛山市", "市级")
                .with_parent("440000", "广东省")
                .with_pinyin("fo shan shi", "fs"),
        ])
        .build_all_indices()
    }

    #[test]
    fn header_layout_is_fixed() {
        let bytes = IndexStorage::new(CompressionMode::None)
            .to_bytes(&index())
            .unwrap();
        assert_eq!(&bytes[0..4], b"RIDX");
        assert_eq!(bytes[4], FORMAT_VERSION);
        assert_eq!(bytes[5], 0);
        let len = u64::from_le_bytes(bytes[6..14].try_into().unwrap()) as usize;
        assert_eq!(bytes.len(), HEADER_LEN + len + DIGEST_LEN);
        let digest = Sha256::digest(&bytes[HEADER_LEN..HEADER_LEN + len]);
        assert_eq!(&bytes[HEADER_LEN + len..], digest.as_slice());
    }

    #[cfg(feature = "compact")]
    #[test]
    fn compressed_frame_sets_flag_and_round_trips() {
        let storage = IndexStorage::new(CompressionMode::Zlib);
        let original = index();
        let bytes = storage.to_bytes(&original).unwrap();
        assert_eq!(bytes[5] & FLAG_COMPRESSED, FLAG_COMPRESSED);
        assert_eq!(storage.from_bytes(&bytes).unwrap(), original);
    }

    #[test]
    fn bad_magic_is_format_error() {
        let storage = IndexStorage::new(CompressionMode::None);
        let mut bytes = storage.to_bytes(&index()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(storage.from_bytes(&bytes), Err(RegionDbError::Format(_))));
    }

    #[test]
    fn flipped_payload_byte_is_integrity_error() {
        let storage = IndexStorage::new(CompressionMode::None);
        let bytes = storage.to_bytes(&index()).unwrap();
        let len = bytes.len() - HEADER_LEN - DIGEST_LEN;
        for offset in [0, len / 2, len - 1] {
            let mut tampered = bytes.clone();
            tampered[HEADER_LEN + offset] ^= 0xff;
            assert!(matches!(
                storage.from_bytes(&tampered),
                Err(RegionDbError::Integrity(_))
            ));
        }
    }

    #[test]
    fn truncated_or_oversized_frames_are_rejected() {
        let storage = IndexStorage::new(CompressionMode::None);
        let bytes = storage.to_bytes(&index()).unwrap();
        assert!(matches!(
            storage.from_bytes(&bytes[..bytes.len() - 1]),
            Err(RegionDbError::Format(_))
        ));
        assert!(matches!(storage.from_bytes(&bytes[..3]), Err(RegionDbError::Format(_))));

        let mut oversized = bytes.clone();
        oversized[6..14].copy_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(storage.from_bytes(&oversized), Err(RegionDbError::Format(_))));
    }

    // Serializes `times` copies of `chunk` without materialising the whole blob.
    struct Repeated<'a> {
        chunk: &'a [u8],
        times: usize,
    }

    struct Chunk<'a>(&'a [u8]);

    impl serde::Serialize for Chunk<'_> {
        fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
            s.serialize_bytes(self.0)
        }
    }

    impl serde::Serialize for Repeated<'_> {
        fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
            use serde::ser::SerializeSeq;
            let mut seq = s.serialize_seq(Some(self.times))?;
            for _ in 0..self.times {
                seq.serialize_element(&Chunk(self.chunk))?;
            }
            seq.end()
        }
    }

    #[test]
    fn encoding_has_no_size_cap() {
        let chunk = vec![0u8; 1024 * 1024];
        let blob = Repeated { chunk: &chunk, times: 300 };
        let size = encode_options().serialized_size(&blob).unwrap();
        assert!(size > 300 * 1024 * 1024);
    }

    #[test]
    fn decoding_is_bounded_by_available_bytes() {
        // A length prefix claiming more elements than the buffer holds.
        let bogus = encode_options().serialize(&(u32::MAX as u64)).unwrap();
        let res: std::result::Result<Vec<u8>, _> = decode_options(bogus.len()).deserialize(&bogus);
        assert!(res.is_err());

        let ok = encode_options().serialize(&vec![7u8; 64]).unwrap();
        let back: Vec<u8> = decode_options(ok.len()).deserialize(&ok).unwrap();
        assert_eq!(back, vec![7u8; 64]);
    }

    #[cfg(feature = "compact")]
    #[test]
    fn large_compressed_frame_round_trips() {
        let mut raw = vec![RegionRaw::new("440000", "广东省", "省级").with_pinyin("guang dong sheng", "gd")];
        for i in 0..3000 {
            raw.push(
                RegionRaw::new(format!("440000{i:06}"), format!("村{i}"), "村级")
                    .with_parent("440000", "广东省")
                    .with_pinyin(format!("cun {i}"), "c"),
            );
        }
        let original = IndexBuilder::new(raw).build_all_indices();
        let storage = IndexStorage::new(CompressionMode::Zlib);
        let bytes = storage.to_bytes(&original).unwrap();
        assert_eq!(storage.from_bytes(&bytes).unwrap(), original);
    }

    #[test]
    fn newer_version_is_rejected() {
        let storage = IndexStorage::new(CompressionMode::None);
        let mut bytes = storage.to_bytes(&index()).unwrap();
        bytes[4] = FORMAT_VERSION + 1;
        assert!(matches!(storage.from_bytes(&bytes), Err(RegionDbError::Format(_))));
    }
}
