// SPDX-License-Identifier: MIT

//! Checksum primitives shared by the on-disk records.
//!
//! - [`crc32`]: CRC-32/IEEE (reflected `0xEDB88320`, init and final xor `0xFFFFFFFF`)
//! - [`xor8`]: byte-wise XOR fold

/// CRC-32/IEEE of `data`.
#[inline]
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// CRC-32/IEEE over several slices, as if they were concatenated.
pub fn crc32_parts(parts: &[&[u8]]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

/// XOR of every byte of `data`.
#[inline]
pub fn xor8(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc ^ b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_check_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn test_crc32_parts_matches_contiguous() {
        let whole = crc32(b"hello mvfs world");
        assert_eq!(crc32_parts(&[b"hello ", b"mvfs", b" world"]), whole);
    }

    #[test]
    fn test_xor8() {
        assert_eq!(xor8(&[]), 0);
        assert_eq!(xor8(&[0x0F, 0xF0]), 0xFF);
        assert_eq!(xor8(&[0xAA, 0xAA]), 0);
    }
}
