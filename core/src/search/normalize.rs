// storefront/src/search/normalize.rs

/// Lowercases, strips diacritics, turns punctuation into spaces and collapses
/// runs of whitespace, so "Selección  Tucapel-1kg" becomes "seleccion tucapel 1kg".
pub fn normalize(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut pending_space = false;
  for c in text.chars().flat_map(char::to_lowercase) {
    let c = fold_diacritic(c);
    if c.is_alphanumeric() {
      if pending_space && !out.is_empty() {
        out.push(' ');
      }
      pending_space = false;
      out.push(c);
    } else {
      pending_space = true;
    }
  }
  out
}

/// Maps an accented lowercase Latin letter to its base letter.
fn fold_diacritic(c: char) -> char {
  match c {
    'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' => 'a',
    'é' | 'è' | 'ê' | 'ë' | 'ē' => 'e',
    'í' | 'ì' | 'î' | 'ï' | 'ī' => 'i',
    'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' | 'ō' => 'o',
    'ú' | 'ù' | 'û' | 'ü' | 'ū' => 'u',
    'ñ' => 'n',
    'ç' => 'c',
    'ý' | 'ÿ' => 'y',
    other => other,
  }
}
