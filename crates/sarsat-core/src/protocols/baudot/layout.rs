/// Modified Baudot alphabet used for text fields in beacon identifiers.
///
/// Letters and space carry the high bit; figures and punctuation do not, which
/// is what lets the 5-bit form address letters by fixing that bit to 1.
pub const SYMBOLS: [(char, u8); 39] = [
    ('A', 0b111000),
    ('B', 0b110011),
    ('C', 0b101110),
    ('D', 0b110010),
    ('E', 0b110000),
    ('F', 0b110110),
    ('G', 0b101011),
    ('H', 0b100101),
    ('I', 0b101100),
    ('J', 0b111010),
    ('K', 0b111110),
    ('L', 0b101001),
    ('M', 0b100111),
    ('N', 0b100110),
    ('O', 0b100011),
    ('P', 0b101101),
    ('Q', 0b111101),
    ('R', 0b101010),
    ('S', 0b110100),
    ('T', 0b100001),
    ('U', 0b111100),
    ('V', 0b101111),
    ('W', 0b111001),
    ('X', 0b110111),
    ('Y', 0b110101),
    ('Z', 0b110001),
    (' ', 0b100100),
    ('-', 0b011000),
    ('/', 0b010111),
    ('0', 0b001101),
    ('1', 0b011101),
    ('2', 0b011001),
    ('3', 0b010000),
    ('4', 0b001010),
    ('5', 0b000001),
    ('6', 0b010101),
    ('7', 0b011100),
    ('8', 0b001100),
    ('9', 0b000011),
];

pub const CODE_SPACE: usize = 64;
pub const SHORT_FORM_MARKER: u8 = 0b100000;
pub const PAD: char = ' ';

/// Reverse lookup indexed by 6-bit code.
pub const DECODE_TABLE: [Option<char>; CODE_SPACE] = build_decode_table();

const fn build_decode_table() -> [Option<char>; CODE_SPACE] {
    let mut table = [None; CODE_SPACE];
    let mut i = 0;
    while i < SYMBOLS.len() {
        let (symbol, code) = SYMBOLS[i];
        table[code as usize] = Some(symbol);
        i += 1;
    }
    table
}
