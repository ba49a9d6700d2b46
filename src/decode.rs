use std::collections::HashMap;

use bitvec::{order::Msb0, slice::BitSlice, view::BitView};

use crate::{code::Code, errors::DecodeError};

/// Reverse table rebuilt from the stream header: code bits -> symbol.
type ReverseTable = HashMap<Code, u8>;

/// Decompress a stream produced by [`encode`].
///
/// [`encode`]: crate::encode::encode
pub fn decode(stream: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let (&pad_count, rest) = stream
        .split_first()
        .ok_or_else(|| DecodeError::Header("missing pad-count byte".into()))?;
    if pad_count > 7 {
        return Err(DecodeError::Header(format!(
            "pad count {pad_count} out of range (max 7)"
        )));
    }

    let bits = rest.view_bits::<Msb0>();
    let unpadded_len = bits.len().checked_sub(pad_count as usize).ok_or_else(|| {
        DecodeError::Header(format!(
            "{pad_count} padding bits declared but only {} bits present",
            bits.len()
        ))
    })?;

    let mut reader = BitReader::new(&bits[..unpadded_len]);
    let reverse = read_code_table(&mut reader)?;
    replay(&reverse, reader.rest())
}

/// Parse the symbol table: a count byte, then (symbol, length, code bits)
/// triplets.
fn read_code_table(reader: &mut BitReader<'_>) -> Result<ReverseTable, DecodeError> {
    let header_eof = || DecodeError::Header("symbol table runs past end of stream".into());

    let symbol_count = reader
        .read_u8()
        .ok_or_else(|| DecodeError::Header("missing symbol-count byte".into()))?;

    let mut reverse = ReverseTable::with_capacity(symbol_count as usize);
    for _ in 0..symbol_count {
        let symbol = reader.read_u8().ok_or_else(header_eof)?;
        let length = reader.read_u8().ok_or_else(header_eof)?;
        if length == 0 {
            return Err(DecodeError::Header(format!(
                "zero-length code for symbol {symbol:#04x}"
            )));
        }

        let code = reader.read_bits(length as usize).ok_or_else(header_eof)?;
        if reverse.insert(code.to_bitvec(), symbol).is_some() {
            return Err(DecodeError::Header(format!(
                "duplicate code in symbol table (symbol {symbol:#04x})"
            )));
        }
    }

    Ok(reverse)
}

/// Replay payload bits against the reverse table.
///
/// Grow a candidate code one bit at a time and emit on exact match. The
/// table is prefix-free, so the greedy match never needs backtracking.
fn replay(reverse: &ReverseTable, payload: &BitSlice<u8, Msb0>) -> Result<Vec<u8>, DecodeError> {
    let mut output = Vec::new();
    let mut candidate = Code::new();

    for bit in payload {
        candidate.push(*bit);
        if let Some(&symbol) = reverse.get(&candidate) {
            output.push(symbol);
            candidate.clear();
        }
    }

    if candidate.is_empty() {
        Ok(output)
    } else {
        Err(DecodeError::Payload(format!(
            "{} unmatched trailing bits",
            candidate.len()
        )))
    }
}

/// Cursor over a bit slice; reads past the end return `None`.
struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
}

impl<'a> BitReader<'a> {
    fn new(bits: &'a BitSlice<u8, Msb0>) -> Self {
        Self { bits }
    }

    fn read_u8(&mut self) -> Option<u8> {
        let bits = self.read_bits(8)?;
        Some(bits.iter().fold(0, |acc, bit| (acc << 1) | *bit as u8))
    }

    fn read_bits(&mut self, n: usize) -> Option<&'a BitSlice<u8, Msb0>> {
        if n > self.bits.len() {
            return None;
        }
        let (taken, rest) = self.bits.split_at(n);
        self.bits = rest;
        Some(taken)
    }

    /// Everything not yet consumed.
    fn rest(self) -> &'a BitSlice<u8, Msb0> {
        self.bits
    }
}
