use crate::{hasher::KeccakHasher, trie_stream::Hash256RlpTrieStream};
use primitive_types::H256;

/// Builds the Merkle root of an ordered list: each element is inserted at
/// key `rlp(index)`, matching the transaction-list and receipt-list root
/// construction in `spec.md` §4.8.
#[must_use]
pub fn ordered_trie_root<I, V>(input: I) -> H256
where
    I: IntoIterator<Item = V>,
    V: AsRef<[u8]>,
{
    trie_root::trie_root::<KeccakHasher, Hash256RlpTrieStream, _, _, _>(
        input.into_iter().enumerate().map(|(i, v)| (rlp::encode(&i), v)),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::ordered_trie_root;

    #[test]
    fn empty_list_differs_from_non_empty() {
        let empty = ordered_trie_root::<_, Vec<u8>>(Vec::new());
        let non_empty = ordered_trie_root(vec![vec![1u8, 2, 3]]);
        assert_ne!(empty, non_empty);
    }

    #[test]
    fn is_deterministic() {
        let items: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(ordered_trie_root(items.clone()), ordered_trie_root(items));
    }
}
