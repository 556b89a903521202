// storefront/src/search/rank.rs

use super::distance::levenshtein_within;
use super::normalize::normalize;
use crate::models::Product;

/// Tunable scoring constants.
///
/// The defaults were picked by hand against grocery-catalog searches. Tests
/// assert orderings, not these exact numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchWeights {
  /// Whole normalized query found as a substring of the name.
  pub phrase_in_name: f64,
  /// Whole normalized query found as a substring of the description.
  pub phrase_in_description: f64,
  /// A query word equal to a field word.
  pub exact_word: f64,
  /// A query word containing, or contained in, a field word.
  pub containment: f64,
  /// Best possible edit-distance match; scaled down by the distance.
  pub fuzzy: f64,
  /// Multiplier applied to description word matches.
  pub description_factor: f64,
  /// Scaled by the fraction of query words that matched, for multi-word queries.
  pub multi_term_bonus: f64,
  /// Shorter query words are ignored.
  pub min_word_len: usize,
  /// Both sides of a containment match must be at least this long.
  pub min_containment_len: usize,
  /// Upper cap on the allowed edit distance (the bound is also `len / 3`).
  pub max_edit_distance: usize,
}

impl Default for SearchWeights {
  fn default() -> Self {
    Self {
      phrase_in_name: 100.0,
      phrase_in_description: 40.0,
      exact_word: 30.0,
      containment: 15.0,
      fuzzy: 10.0,
      description_factor: 0.5,
      multi_term_bonus: 20.0,
      min_word_len: 2,
      min_containment_len: 3,
      max_edit_distance: 2,
    }
  }
}

/// A parsed search term: the normalized phrase and its scoring words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  pub phrase: String,
  pub words: Vec<String>,
}

impl SearchQuery {
  /// Returns `None` when no word survives normalization and the length filter.
  pub fn parse(term: &str, weights: &SearchWeights) -> Option<Self> {
    let phrase = normalize(term);
    let words: Vec<String> = phrase
      .split(' ')
      .filter(|w| w.chars().count() >= weights.min_word_len)
      .map(str::to_string)
      .collect();
    if words.is_empty() {
      return None;
    }
    Some(Self { phrase, words })
  }
}

/// Ranks `products` against `term` with the default weights.
///
/// An empty term (or one with no usable words) returns the input unchanged.
/// Otherwise zero-score products are dropped and the rest are stably sorted by
/// descending score.
pub fn filter_and_rank_products(products: &[Product], term: &str) -> Vec<Product> {
  filter_and_rank_with(products, term, &SearchWeights::default())
}

pub fn filter_and_rank_with(products: &[Product], term: &str, weights: &SearchWeights) -> Vec<Product> {
  let Some(query) = SearchQuery::parse(term, weights) else {
    return products.to_vec();
  };

  let mut scored: Vec<(f64, &Product)> = products
    .iter()
    .map(|p| (score_product(p, &query, weights), p))
    .filter(|(score, _)| *score > 0.0)
    .collect();
  // sort_by is stable: equal scores keep catalog order.
  scored.sort_by(|a, b| b.0.total_cmp(&a.0));
  scored.into_iter().map(|(_, p)| p.clone()).collect()
}

pub fn score_product(product: &Product, query: &SearchQuery, weights: &SearchWeights) -> f64 {
  let name = normalize(&product.name);
  let description = product.description.as_deref().map(normalize).unwrap_or_default();

  let mut score = 0.0;
  if name.contains(&query.phrase) {
    score += weights.phrase_in_name;
  }
  if !description.is_empty() && description.contains(&query.phrase) {
    score += weights.phrase_in_description;
  }

  let mut matched = 0usize;
  for word in &query.words {
    let in_name = field_score(word, &name, weights);
    let in_description = field_score(word, &description, weights) * weights.description_factor;
    let best = in_name.max(in_description);
    if best > 0.0 {
      matched += 1;
      score += best;
    }
  }

  if query.words.len() > 1 && matched > 0 {
    score += weights.multi_term_bonus * matched as f64 / query.words.len() as f64;
  }
  score
}

fn field_score(word: &str, field: &str, weights: &SearchWeights) -> f64 {
  field
    .split(' ')
    .filter(|t| !t.is_empty())
    .map(|token| word_score(word, token, weights))
    .fold(0.0, f64::max)
}

fn word_score(word: &str, token: &str, weights: &SearchWeights) -> f64 {
  if word == token {
    return weights.exact_word;
  }

  let word_len = word.chars().count();
  let token_len = token.chars().count();
  if word_len >= weights.min_containment_len
    && token_len >= weights.min_containment_len
    && (token.contains(word) || word.contains(token))
  {
    return weights.containment;
  }

  let bound = (word_len / 3).min(weights.max_edit_distance);
  if bound == 0 {
    return 0.0;
  }
  match levenshtein_within(word, token, bound) {
    Some(distance) => weights.fuzzy * (1.0 - distance as f64 / (bound as f64 + 1.0)),
    None => 0.0,
  }
}
