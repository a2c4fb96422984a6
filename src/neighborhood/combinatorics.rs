//! Counting and enumeration helpers for exhaustive neighborhoods.
//!
//! Counts are `Option<u128>`: `None` means the count overflowed, which
//! callers treat as "too many to enumerate".

/// `C(n, k)`, or `None` on overflow.
pub(crate) fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // result * (n - i) is divisible by (i + 1) at every step.
        result = result.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(result)
}

/// Number of ways to pick `pairs` disjoint unordered pairs out of `n` items.
///
/// `C(n, 2k) * (2k - 1)!!`
pub(crate) fn disjoint_pair_count(n: usize, pairs: usize) -> Option<u128> {
    let chosen = pairs.checked_mul(2)?;
    let mut count = binomial(n, chosen)?;
    let mut odd = chosen as u128;
    while odd > 1 {
        odd -= 1;
        count = count.checked_mul(odd)?;
        odd -= 1;
    }
    Some(count)
}

/// Elementary symmetric polynomial `e_k` of `weights`.
///
/// With `weights[i]` the number of alternatives at position `i`, this is
/// the number of ways to change exactly `k` positions.
pub(crate) fn elementary_symmetric(weights: &[u128], k: usize) -> Option<u128> {
    if k > weights.len() {
        return Some(0);
    }
    let mut e = vec![0u128; k + 1];
    e[0] = 1;
    for &w in weights {
        for j in (1..=k).rev() {
            e[j] = e[j].checked_add(e[j - 1].checked_mul(w)?)?;
        }
    }
    Some(e[k])
}

/// Lexicographic `k`-combinations of `0..n`.
pub(crate) struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    pub(crate) fn new(n: usize, k: usize) -> Self {
        let current = (k <= n).then(|| (0..k).collect());
        Self { n, current }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        let k = current.len();

        let mut next = current.clone();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if next[i] < self.n - k + i {
                next[i] += 1;
                for j in i + 1..k {
                    next[j] = next[j - 1] + 1;
                }
                self.current = Some(next);
                break;
            }
        }
        Some(current)
    }
}

/// Every way to split `items` (even length) into unordered pairs.
pub(crate) fn perfect_matchings(items: &[usize]) -> Vec<Vec<(usize, usize)>> {
    let Some((&first, rest)) = items.split_first() else {
        return vec![Vec::new()];
    };
    let mut out = Vec::new();
    for (pos, &partner) in rest.iter().enumerate() {
        let remaining: Vec<usize> = rest
            .iter()
            .enumerate()
            .filter(|&(p, _)| p != pos)
            .map(|(_, &v)| v)
            .collect();
        for mut matching in perfect_matchings(&remaining) {
            matching.insert(0, (first, partner));
            out.push(matching);
        }
    }
    out
}

/// Cartesian product of the given choice lists.
pub(crate) fn cartesian_product<T: Copy>(choices: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut out: Vec<Vec<T>> = vec![Vec::with_capacity(choices.len())];
    for options in choices {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                options.iter().map(move |&o| {
                    let mut row = prefix.clone();
                    row.push(o);
                    row
                })
            })
            .collect();
    }
    out
}
