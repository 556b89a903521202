// storefront/src/search/distance.rs

/// Levenshtein distance between `a` and `b` if it is at most `max`.
///
/// Works on chars, and gives up as soon as every cell of a DP row exceeds `max`.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> Option<usize> {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();
  if a.len().abs_diff(b.len()) > max {
    return None;
  }
  if a.is_empty() || b.is_empty() {
    return Some(a.len().max(b.len()));
  }

  let mut prev: Vec<usize> = (0..=b.len()).collect();
  let mut curr = vec![0; b.len() + 1];
  for (i, ca) in a.iter().enumerate() {
    curr[0] = i + 1;
    let mut row_min = curr[0];
    for (j, cb) in b.iter().enumerate() {
      let cost = usize::from(ca != cb);
      curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
      row_min = row_min.min(curr[j + 1]);
    }
    if row_min > max {
      return None;
    }
    std::mem::swap(&mut prev, &mut curr);
  }

  let distance = prev[b.len()];
  (distance <= max).then_some(distance)
}
