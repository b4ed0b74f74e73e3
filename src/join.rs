//! Ordered key/value sequences and the left join used to pair the two
//! per-decile average series on country code.

use itertools::{EitherOrBoth, Itertools};

#[derive(Debug, Clone, PartialEq)]
pub struct KeyVal<K, V> {
    pub key: K,
    pub val: V,
}

/// Left join of two sequences of `KeyVal` that are sorted ascending
/// by key (`BTreeMap` iteration order is). Every key of `a` is kept,
/// paired with `Some` value from `b` where the key matches and `None`
/// where it does not; keys present only in `b` are dropped. The
/// output is ordered ascending by key.
///
/// The asymmetry (right-only keys silently dropped) is deliberate:
/// the left side is the primary key set. Callers needing full
/// coverage must union the key sets themselves.
pub fn keyval_left_join_2<K: Ord, V1, V2>(
    a: impl IntoIterator<Item = KeyVal<K, V1>>,
    b: impl IntoIterator<Item = KeyVal<K, V2>>,
) -> impl Iterator<Item = KeyVal<K, (V1, Option<V2>)>> {
    a.into_iter()
        .merge_join_by(b.into_iter(), |a, b| a.key.cmp(&b.key))
        .filter_map(|eob| match eob {
            EitherOrBoth::Both(a, b) => Some(KeyVal {
                key: a.key,
                val: (a.val, Some(b.val)),
            }),
            EitherOrBoth::Left(a) => Some(KeyVal {
                key: a.key,
                val: (a.val, None),
            }),
            EitherOrBoth::Right(_) => None,
        })
}
