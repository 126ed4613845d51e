use std::collections::HashMap;
use std::ops::Range;

/// Paired index ranges into the two input sequences, in input order.
pub type MatchGroup = (Range<usize>, Range<usize>);

/// Levenshtein distance over chars, unit cost for insert, delete and substitute.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, a_char) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_char != b_char);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Dissimilarity in `[0, 1]` of two trimmed strings: the edit distance divided
/// by their combined length. Identical strings give 0.
pub fn distance(a: &str, b: &str) -> f64 {
    let a = a.trim();
    let b = b.trim();
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 0.0;
    }
    levenshtein(a, b) as f64 / total as f64
}

/// Split two sequences into groups around their most similar pairs.
///
/// The globally closest pair becomes its own 1:1 group and the items before
/// and after it are split the same way, until a side runs out or fewer than
/// three items remain. `distance` is called with indices into the two
/// sequences and each pair is evaluated at most once.
pub fn rematch<F>(a_len: usize, b_len: usize, mut distance: F) -> Vec<MatchGroup>
where
    F: FnMut(usize, usize) -> f64,
{
    let mut cache: HashMap<(usize, usize), f64> = HashMap::new();
    let mut groups = Vec::new();
    // Popped last-in-first-out, so tails are pushed before heads.
    let mut pending: Vec<MatchGroup> = vec![(0..a_len, 0..b_len)];

    while let Some((a, b)) = pending.pop() {
        let best = if a.len() + b.len() < 3 {
            None
        } else {
            find_best_match(&a, &b, &mut cache, &mut distance)
        };

        let Some((i, j)) = best else {
            groups.push((a, b));
            continue;
        };

        if i + 1 < a.end || j + 1 < b.end {
            pending.push((i + 1..a.end, j + 1..b.end));
        }
        pending.push((i..i + 1, j..j + 1));
        if i > a.start || j > b.start {
            pending.push((a.start..i, b.start..j));
        }
    }

    groups
}

fn find_best_match<F>(
    a: &Range<usize>,
    b: &Range<usize>,
    cache: &mut HashMap<(usize, usize), f64>,
    distance: &mut F,
) -> Option<(usize, usize)>
where
    F: FnMut(usize, usize) -> f64,
{
    let mut best: Option<(usize, usize)> = None;
    let mut best_distance = f64::INFINITY;

    for i in a.clone() {
        for j in b.clone() {
            let d = *cache.entry((i, j)).or_insert_with(|| distance(i, j));
            if d < best_distance {
                best_distance = d;
                best = Some((i, j));
            }
        }
    }

    best
}

/// [`rematch`] over two slices, returning sub-slices.
pub fn rematch_slices<'s, T, F>(a: &'s [T], b: &'s [T], distance: F) -> Vec<(&'s [T], &'s [T])>
where
    F: Fn(&T, &T) -> f64,
{
    rematch(a.len(), b.len(), |i, j| distance(&a[i], &b[j]))
        .into_iter()
        .map(|(a_range, b_range)| (&a[a_range], &b[b_range]))
        .collect()
}
