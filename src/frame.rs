//Framing shared by every command: 16bit words travel MSB first, each
//one followed directly by its checksum byte.

use crate::crc;

pub const BYTES_PER_WORD: usize = 3;

//A response word whose checksum byte didn't match.
#[derive(Debug, PartialEq)]
pub struct ChecksumMismatch;

pub fn encode_words(words: &[u16], out: &mut [u8]) {
    debug_assert_eq!(out.len(), words.len() * BYTES_PER_WORD);

    for (word, group) in words.iter().zip(out.chunks_exact_mut(BYTES_PER_WORD)) {
        let [high, low] = word.to_be_bytes();
        group[0] = high;
        group[1] = low;
        group[2] = crc::checksum(*word);
    }
}

//Words are checked in wire order and the first bad checksum fails the
//whole frame; bytes after a corrupted word can't be trusted as framing.
pub fn decode_words(bytes: &[u8], words: &mut [u16]) -> Result<(), ChecksumMismatch> {
    debug_assert_eq!(bytes.len(), words.len() * BYTES_PER_WORD);

    for (group, word) in bytes.chunks_exact(BYTES_PER_WORD).zip(words.iter_mut()) {
        let value = u16::from_be_bytes([group[0], group[1]]);
        if crc::checksum(value) != group[2] {
            return Err(ChecksumMismatch);
        }
        *word = value;
    }
    Ok(())
}

#[cfg(test)]
mod frame_tests {
    use super::*;

    #[test]
    fn encode_layout() {
        let mut buf = [0u8; 6];
        encode_words(&[0x0190, 0x0000], &mut buf);

        assert_eq!(buf[0], 0x01);
        assert_eq!(buf[1], 0x90);
        assert_eq!(buf[2], crc::checksum(0x0190));
        assert_eq!(buf[3], 0x00);
        assert_eq!(buf[4], 0x00);
        assert_eq!(buf[5], crc::checksum(0x0000));
    }

    #[test]
    fn round_trip() {
        let words = [0x0102u16, 0x0304, 0x0506];
        let mut buf = [0u8; 9];
        encode_words(&words, &mut buf);

        let mut decoded = [0u16; 3];
        assert_eq!(decode_words(&buf, &mut decoded), Ok(()));
        assert_eq!(decoded, words);
    }

    #[test]
    fn any_single_bit_flip_is_caught() {
        let words = [0x0190u16, 0x0000];
        let mut reference = [0u8; 6];
        encode_words(&words, &mut reference);

        for position in 0..reference.len() {
            for bit in 0..8 {
                let mut corrupted = reference;
                corrupted[position] ^= 1 << bit;

                let mut decoded = [0u16; 2];
                assert_eq!(
                    decode_words(&corrupted, &mut decoded),
                    Err(ChecksumMismatch),
                    "flip of bit {} in byte {} got through",
                    bit,
                    position
                );
            }
        }
    }
}
