//! Random short id generation backed by `nanoid`.

use crate::domain::ports::ShortIdGenerator;

/// `[a-zA-Z0-9]`
const ALPHABET: [char; 62] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J',
    'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1',
    '2', '3', '4', '5', '6', '7', '8', '9',
];

#[derive(Debug, Default, Clone, Copy)]
pub struct NanoShortIdGenerator;

impl ShortIdGenerator for NanoShortIdGenerator {
    fn new_short_id(&self, length: usize) -> String {
        nanoid::nanoid!(length, &ALPHABET)
    }
}
