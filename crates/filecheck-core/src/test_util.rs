//! Test utilities for the filecheck-core crate

/// JFIF header: SOI marker followed by an APP0 segment
pub const JPEG_HEADER: [u8; 20] = [
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00,
];

/// A JPEG-looking body longer than the header window
pub fn jpeg_bytes() -> Vec<u8> {
    let mut bytes = JPEG_HEADER.to_vec();
    bytes.resize(1024, 0x00);
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}
