use std::collections::HashMap;

use bitvec::{order::Msb0, vec::BitVec};

use crate::tree::Node;

/// A symbol's code: its root-to-leaf path, left = 0, right = 1.
///
/// Stored as packed bits rather than characters; `Msb0` matches the
/// stream's most-significant-bit-first packing.
pub type Code = BitVec<u8, Msb0>;

/// Walk the tree and collect the code for every symbol.
///
/// Iterative depth-first traversal; each stack entry owns the path prefix
/// leading to it, so no shared accumulator is threaded through the walk.
/// Leaf-only assignment makes the resulting table prefix-free.
pub fn code_table(root: &Node) -> HashMap<u8, Code> {
    let mut table = HashMap::new();
    let mut stack = vec![(root, Code::new())];

    while let Some((node, path)) = stack.pop() {
        match node {
            Node::Leaf { symbol, .. } => {
                // A lone-leaf root is reached by the empty path; substitute
                // the fixed one-bit code 0 so the payload stays decodable.
                let code = if path.is_empty() {
                    let mut zero = Code::new();
                    zero.push(false);
                    zero
                } else {
                    path
                };
                table.insert(*symbol, code);
            }
            Node::Internal { left, right, .. } => {
                let mut left_path = path.clone();
                left_path.push(false);
                let mut right_path = path;
                right_path.push(true);
                stack.push((right.as_ref(), right_path));
                stack.push((left.as_ref(), left_path));
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{freq::byte_frequencies, tree};

    fn table_for(input: &[u8]) -> HashMap<u8, Code> {
        let root = tree::build(&byte_frequencies(input)).unwrap();
        code_table(&root)
    }

    #[test]
    fn lone_leaf_gets_the_fixed_one_bit_code() {
        let table = table_for(b"aaaa");
        assert_eq!(table.len(), 1);
        let code = &table[&b'a'];
        assert_eq!(code.len(), 1);
        assert!(!code[0]);
    }

    #[test]
    fn two_symbol_codes_differ_in_one_bit() {
        let table = table_for(b"abb");
        assert_eq!(table[&b'a'].len(), 1);
        assert_eq!(table[&b'b'].len(), 1);
        assert_ne!(table[&b'a'], table[&b'b']);
    }

    #[test]
    fn heavier_symbols_never_get_longer_codes() {
        let table = table_for(b"aaaaaaaaaabbbbbcc");
        assert!(table[&b'a'].len() <= table[&b'b'].len());
        assert!(table[&b'b'].len() <= table[&b'c'].len());
    }

    #[test]
    fn no_code_is_a_prefix_of_another() {
        let table = table_for(b"mississippi riverbank");
        assert!(table.len() > 2);

        for (a, code_a) in &table {
            for (b, code_b) in &table {
                if a == b {
                    continue;
                }
                let shorter = code_a.len().min(code_b.len());
                assert_ne!(
                    &code_a[..shorter],
                    &code_b[..shorter],
                    "code for {a:#04x} is a prefix of the code for {b:#04x}"
                );
            }
        }
    }
}
