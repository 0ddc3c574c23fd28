//! Media records and binary-signature sniffing.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::errors::MediaError;

/// Media formats recognized by their leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Png,
    Jpg,
    Webp,
    Gif,
    Webm,
    Mp4,
    Avi,
    Mov,
    Flv,
    Mkv,
}

impl MediaKind {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Png => "png",
            MediaKind::Jpg => "jpg",
            MediaKind::Webp => "webp",
            MediaKind::Gif => "gif",
            MediaKind::Webm => "webm",
            MediaKind::Mp4 => "mp4",
            MediaKind::Avi => "avi",
            MediaKind::Mov => "mov",
            MediaKind::Flv => "flv",
            MediaKind::Mkv => "mkv",
        }
    }

    /// Classify `bytes` by their signature.
    ///
    /// WebM and Matroska share the EBML header. The header's doc type picks
    /// between them; an unreadable doc type is reported as WebM.
    pub fn sniff(bytes: &[u8]) -> Option<MediaKind> {
        let starts = |sig: &[u8]| bytes.starts_with(sig);
        let riff = |fourcc: &[u8]| starts(b"RIFF") && bytes.get(8..12) == Some(fourcc);

        if starts(&[0x89, 0x50, 0x4e, 0x47]) {
            Some(MediaKind::Png)
        } else if starts(&[0xff, 0xd8, 0xff]) {
            Some(MediaKind::Jpg)
        } else if riff(b"WEBP") {
            Some(MediaKind::Webp)
        } else if starts(b"GIF8") {
            Some(MediaKind::Gif)
        } else if starts(&EBML_MAGIC) {
            Some(ebml_doc_type(bytes))
        } else if starts(&[0x00, 0x00, 0x00, 0x18, 0x66, 0x74, 0x79, 0x70]) {
            Some(MediaKind::Mp4)
        } else if riff(b"AVI ") {
            Some(MediaKind::Avi)
        } else if starts(&[0x00, 0x00, 0x00, 0x14, 0x66, 0x74, 0x79, 0x70]) {
            Some(MediaKind::Mov)
        } else if starts(&[0x46, 0x4c, 0x56, 0x01]) {
            Some(MediaKind::Flv)
        } else {
            None
        }
    }
}

const EBML_MAGIC: [u8; 4] = [0x1a, 0x45, 0xdf, 0xa3];

/// How far into an EBML header to look for the doc type.
const EBML_HEADER_SCAN: usize = 64;

fn ebml_doc_type(bytes: &[u8]) -> MediaKind {
    let header = &bytes[..bytes.len().min(EBML_HEADER_SCAN)];
    if header.windows(8).any(|w| w == b"matroska") {
        MediaKind::Mkv
    } else {
        MediaKind::Webm
    }
}

/// A stored media file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaRecord {
    pub kind: MediaKind,
    /// `<hash>.<extension>`
    pub filename: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Media records keyed by the design tool's content hash.
#[derive(Debug, Clone, Default)]
pub struct MediaStore {
    records: IndexMap<String, MediaRecord>,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and store `bytes` under `hash`. The first store for a hash
    /// wins; later calls return the existing record untouched.
    pub fn store(&mut self, hash: &str, bytes: Vec<u8>) -> Result<&MediaRecord, MediaError> {
        if !self.records.contains_key(hash) {
            let kind = MediaKind::sniff(&bytes).ok_or_else(|| MediaError::UnknownType {
                hash: hash.to_string(),
            })?;
            let filename = format!("{hash}.{}", kind.extension());
            debug!(%hash, %filename, size = bytes.len(), "stored media");
            self.records
                .insert(hash.to_string(), MediaRecord { kind, filename, bytes });
        }
        self.records
            .get(hash)
            .ok_or_else(|| MediaError::UnknownType { hash: hash.to_string() })
    }

    pub fn get(&self, hash: &str) -> Option<&MediaRecord> {
        self.records.get(hash)
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.records.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Take every record out of the store, in insertion order.
    pub fn drain(&mut self) -> Vec<MediaRecord> {
        self.records.drain(..).map(|(_, record)| record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_sniff_signatures() {
        assert_eq!(MediaKind::sniff(PNG), Some(MediaKind::Png));
        assert_eq!(MediaKind::sniff(&[0xff, 0xd8, 0xff, 0xe0]), Some(MediaKind::Jpg));
        assert_eq!(MediaKind::sniff(b"RIFF\0\0\0\0WEBPVP8 "), Some(MediaKind::Webp));
        assert_eq!(MediaKind::sniff(b"RIFF\0\0\0\0AVI LIST"), Some(MediaKind::Avi));
        assert_eq!(MediaKind::sniff(b"GIF89a"), Some(MediaKind::Gif));
        assert_eq!(MediaKind::sniff(&[0x1a, 0x45, 0xdf, 0xa3]), Some(MediaKind::Webm));
        let mut mkv = vec![0x1a, 0x45, 0xdf, 0xa3, 0x42, 0x82, 0x88];
        mkv.extend_from_slice(b"matroska");
        assert_eq!(MediaKind::sniff(&mkv), Some(MediaKind::Mkv));
        assert_eq!(
            MediaKind::sniff(&[0, 0, 0, 0x18, b'f', b't', b'y', b'p']),
            Some(MediaKind::Mp4)
        );
        assert_eq!(
            MediaKind::sniff(&[0, 0, 0, 0x14, b'f', b't', b'y', b'p']),
            Some(MediaKind::Mov)
        );
        assert_eq!(MediaKind::sniff(b"FLV\x01"), Some(MediaKind::Flv));
    }

    #[test]
    fn test_sniff_short_or_unknown() {
        assert_eq!(MediaKind::sniff(&[]), None);
        assert_eq!(MediaKind::sniff(b"RIFF"), None);
        assert_eq!(MediaKind::sniff(b"hello world"), None);
    }

    #[test]
    fn test_store_names_file_by_hash() {
        let mut store = MediaStore::new();
        let record = store.store("abc123", PNG.to_vec()).unwrap();
        assert_eq!(record.filename, "abc123.png");
        assert_eq!(record.kind, MediaKind::Png);
    }

    #[test]
    fn test_first_store_wins() {
        let mut store = MediaStore::new();
        store.store("h", PNG.to_vec()).unwrap();
        let record = store.store("h", b"GIF89a".to_vec()).unwrap();
        assert_eq!(record.kind, MediaKind::Png);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_bytes_fail() {
        let mut store = MediaStore::new();
        let err = store.store("h", vec![1, 2, 3]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown image type");
        assert!(store.is_empty());
    }

    #[test]
    fn test_drain_empties_store() {
        let mut store = MediaStore::new();
        store.store("a", PNG.to_vec()).unwrap();
        let drained = store.drain();
        assert_eq!(drained.len(), 1);
        assert!(store.is_empty());
    }
}
