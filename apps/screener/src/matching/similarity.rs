//! Ratcliff/Obershelp (gestalt pattern matching) sequence similarity.
//!
//! ratio = 2·M / T, where M is the total size of the matching blocks found by
//! recursively taking the longest common substring, and T the combined
//! length. No junk heuristics: inputs are short role names.

use std::collections::HashMap;

pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, size)`.
/// Ties resolve to the earliest start in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // j -> length of the match ending at a[i - 1], b[j]
    let mut run_at: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_run: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_at.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_run.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        run_at = next_run;
    }
    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_strings() {
        assert!(approx(sequence_ratio("data science", "data science"), 1.0));
    }

    #[test]
    fn test_disjoint_strings() {
        assert!(approx(sequence_ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_known_ratio_values() {
        assert!(approx(sequence_ratio("abcd", "bcde"), 0.75));
        // "ab" and "cd" match, "x" does not
        assert!(approx(sequence_ratio("abxcd", "abcd"), 8.0 / 9.0));
        assert!(approx(sequence_ratio("python developer", "java developer"), 20.0 / 30.0));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(approx(sequence_ratio("", ""), 1.0));
        assert!(approx(sequence_ratio("", "hr"), 0.0));
    }

    #[test]
    fn test_ratio_is_bounded() {
        let r = sequence_ratio("devops engineer", "web designing");
        assert!((0.0..=1.0).contains(&r));
    }
}
