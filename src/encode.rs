use std::collections::HashMap;

use bitvec::{order::Msb0, vec::BitVec, view::BitView};

use crate::{
    code::{code_table, Code},
    errors::EncodeError,
    freq::byte_frequencies,
    tree,
};

/// Most distinct symbols the 8-bit count field can describe.
const MAX_SYMBOLS: usize = u8::MAX as usize;

/// Longest code the 8-bit length field can describe.
const MAX_CODE_BITS: usize = u8::MAX as usize;

/// Compress `input` into a self-describing stream.
///
/// Layout: a pad-count byte, then one long MSB-first bit sequence holding
/// the symbol table (count byte, then symbol/length/code triplets) and the
/// payload, zero-padded to a byte boundary. Empty input encodes as the
/// canonical two-byte stream `[0, 0]`.
pub fn encode(input: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let frequencies = byte_frequencies(input);
    if frequencies.len() > MAX_SYMBOLS {
        return Err(EncodeError::AlphabetOverflow(frequencies.len()));
    }

    let table = match tree::build(&frequencies) {
        Some(root) => code_table(&root),
        None => HashMap::new(),
    };

    let mut bits: BitVec<u8, Msb0> = BitVec::new();
    push_byte(&mut bits, table.len() as u8);

    // Table entries go out in ascending symbol order, so the header is
    // byte-reproducible run to run.
    let mut entries: Vec<(&u8, &Code)> = table.iter().collect();
    entries.sort_unstable_by_key(|&(&symbol, _)| symbol);
    for (&symbol, code) in entries {
        if code.len() > MAX_CODE_BITS {
            return Err(EncodeError::CodeOverflow {
                symbol,
                bits: code.len(),
            });
        }
        push_byte(&mut bits, symbol);
        push_byte(&mut bits, code.len() as u8);
        bits.extend_from_bitslice(code);
    }

    for byte in input {
        bits.extend_from_bitslice(&table[byte]);
    }

    let pad_bits = (8 - bits.len() % 8) % 8;
    for _ in 0..pad_bits {
        bits.push(false);
    }

    let mut out = Vec::with_capacity(1 + bits.len() / 8);
    out.push(pad_bits as u8);
    out.extend_from_slice(bits.as_raw_slice());
    Ok(out)
}

fn push_byte(bits: &mut BitVec<u8, Msb0>, byte: u8) {
    bits.extend_from_bitslice(byte.view_bits::<Msb0>());
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn empty_input_encodes_as_the_canonical_empty_stream() {
        assert_eq!(encode(b"").unwrap(), vec![0x00, 0x00]);
    }

    /// One table entry (`a` -> `0`), four payload bits, three pad bits.
    #[test]
    fn single_symbol_stream_layout() {
        let encoded = encode(b"aaaa").unwrap();
        assert_eq!(hex::encode(encoded), "0301610100");
    }

    /// Two one-bit codes (`a` -> `0`, `b` -> `1`) and the payload `011`.
    #[test]
    fn two_symbol_stream_layout() {
        let encoded = encode(b"abb").unwrap();
        assert_eq!(hex::encode(encoded), "030261013100d8");
    }

    #[test]
    fn declared_padding_matches_the_bit_count() {
        let input = b"entropy coding";
        let encoded = encode(input).unwrap();
        let pad = encoded[0] as usize;
        assert!(pad < 8);

        let root = tree::build(&byte_frequencies(input)).unwrap();
        let table = code_table(&root);
        let header_bits = 8 + table.values().map(|code| 16 + code.len()).sum::<usize>();
        let payload_bits = input.iter().map(|byte| table[byte].len()).sum::<usize>();
        assert_eq!(header_bits + payload_bits + pad, (encoded.len() - 1) * 8);
    }

    #[test_case(b"Hello world!".as_slice())]
    #[test_case(b"abc")]
    #[test_case(b"aaaa")]
    #[test_case(b"mississippi")]
    #[test_case(b"")]
    fn encoding_is_deterministic(input: &[u8]) {
        assert_eq!(encode(input).unwrap(), encode(input).unwrap());
    }

    #[test]
    fn alphabet_of_256_symbols_is_rejected() {
        let input: Vec<u8> = (0u8..=255).collect();
        assert!(matches!(
            encode(&input),
            Err(EncodeError::AlphabetOverflow(256))
        ));
    }
}
