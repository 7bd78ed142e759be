use rlp::RlpStream;
use trie_root::{Hasher, TrieStream, Value};

/// `TrieStream` impl matching Ethereum's RLP-encoded trie node layout.
#[derive(Default)]
pub struct Hash256RlpTrieStream {
    stream: RlpStream,
}

impl TrieStream for Hash256RlpTrieStream {
    fn new() -> Self {
        Self { stream: RlpStream::new() }
    }

    fn append_empty_data(&mut self) {
        self.stream.append_empty_data();
    }

    fn begin_branch(
        &mut self,
        _maybe_key: Option<&[u8]>,
        _maybe_value: Option<Value>,
        _has_children: impl Iterator<Item = bool>,
    ) {
        // one slot per nibble plus one for an inline value.
        self.stream.begin_list(17);
    }

    fn append_empty_child(&mut self) {
        self.stream.append_empty_data();
    }

    fn end_branch(&mut self, value: Option<Value>) {
        match value {
            Some(Value::Inline(value)) => {
                self.stream.append(&value);
            }
            Some(Value::Node(value)) => {
                self.stream.append(&value);
            }
            None => {
                self.stream.append_empty_data();
            }
        }
    }

    fn append_leaf(&mut self, key: &[u8], value: Value) {
        self.stream.begin_list(2);
        self.stream.append_iter(hex_prefix_encode(key, true));
        match value {
            Value::Inline(value) => self.stream.append(&value),
            Value::Node(value) => self.stream.append(&value),
        };
    }

    fn append_extension(&mut self, key: &[u8]) {
        self.stream.begin_list(2);
        self.stream.append_iter(hex_prefix_encode(key, false));
    }

    fn append_substream<H: Hasher>(&mut self, other: Self) {
        let out = other.out();
        match out.len() {
            0..=31 => self.stream.append_raw(&out, 1),
            _ => {
                self.stream.append(&H::hash(&out).as_ref());
            }
        };
    }

    fn out(self) -> Vec<u8> {
        self.stream.out().freeze().into()
    }
}

/// Hex-prefix notation: first nibble carries oddness/termination flags.
/// Copied from the `triehash` crate's original implementation.
fn hex_prefix_encode(nibbles: &[u8], leaf: bool) -> impl Iterator<Item = u8> + '_ {
    let inlen = nibbles.len();
    let oddness_factor = inlen % 2;

    let first_byte = {
        #[allow(clippy::cast_possible_truncation)]
        let mut bits = ((inlen as u8 & 1) + (2 * u8::from(leaf))) << 4;
        if oddness_factor == 1 {
            bits += nibbles[0];
        }
        bits
    };
    core::iter::once(first_byte).chain(nibbles[oddness_factor..].chunks(2).map(|ch| ch[0] << 4 | ch[1]))
}
