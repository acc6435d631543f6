/*
 * Filename: crc.rs
 * Description: CRC-8 checksum covering each 16bit word on the bus.
 */

//Polynomial 0x31 (x^8 + x^5 + x^4 + 1), initial value 0xFF, MSB first.
//The table is walked a nibble at a time: row is the high nibble of the
//running CRC, column the low nibble.
const CRC_LOOKUP: [[u8; 16]; 16] = crc_lookup();

const fn crc_lookup() -> [[u8; 16]; 16] {
    let mut table = [[0u8; 16]; 16];
    let mut byte = 0usize;
    while byte < 256 {
        let mut crc = byte as u8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[byte >> 4][byte & 0x0F] = crc;
        byte += 1;
    }
    table
}

//The device appends one checksum byte to every word it sends and wants
//the same after every word it's given.
pub fn checksum(word: u16) -> u8 {
    let [high, low] = word.to_be_bytes();
    let mut crc: u8 = 0xFF;
    crc ^= high;
    crc = CRC_LOOKUP[(crc >> 4) as usize][(crc & 0x0F) as usize];
    crc ^= low;
    crc = CRC_LOOKUP[(crc >> 4) as usize][(crc & 0x0F) as usize];
    crc
}

#[cfg(test)]
mod crc_tests {
    use super::*;

    //Plain bitwise version, kept here to pin the table down.
    fn checksum_bitwise(word: u16) -> u8 {
        let mut crc: u8 = 0xFF;
        for byte in word.to_be_bytes() {
            crc ^= byte;
            for _ in 0..8 {
                if crc & 0x80 != 0 {
                    crc = (crc << 1) ^ 0x31;
                } else {
                    crc <<= 1;
                }
            }
        }
        crc
    }

    #[test]
    fn known_words() {
        //0xBEEF is the datasheet's worked example.
        assert_eq!(checksum(0xBEEF), 0x92);
        assert_eq!(checksum(0x0000), 0x81);
    }

    #[test]
    fn matches_bitwise_for_every_word() {
        for word in 0..=u16::MAX {
            assert_eq!(
                checksum(word),
                checksum_bitwise(word),
                "table disagrees at {:#06x}",
                word
            );
        }
    }
}
