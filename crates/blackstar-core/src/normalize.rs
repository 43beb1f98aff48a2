//! Normalización de nombres (títulos, artistas, compositores, género libre).
//!
//! Se aplica al recibir los datos, nunca al mostrarlos: lo que se persiste ya
//! está normalizado.

/// Artículos, preposiciones y conjunciones (portugués e inglés) que van en
/// minúscula cuando no están al principio ni al final.
const STOP_WORDS: &[&str] = &[
  // inglés
  "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "nor", "of", "on", "or",
  "per", "the", "to", "v", "v.", "vs", "vs.", "via",
  // portugués
  "o", "os", "um", "uns", "uma", "umas", "de", "do", "da", "dos", "das", "em", "na", "no", "nas",
  "nos", "por", "para", "e", "ou",
];

fn is_stop_word(word: &str) -> bool {
  let lower = word.to_lowercase();
  STOP_WORDS.contains(&lower.as_str())
}

/// Primera letra en mayúscula, resto en minúscula.
///
/// Si la mayúscula de la primera letra no es un único carácter que vuelva a
/// la misma minúscula (`ß`, `ı`...), la letra se deja tal cual, así el
/// resultado es estable al normalizar de nuevo.
fn capitalize(word: &str) -> String {
  let mut chars = word.chars();
  let Some(first) = chars.next() else {
    return String::new();
  };

  let mut upper = first.to_uppercase();
  let head = match (upper.next(), upper.next()) {
    (Some(u), None) if u.to_lowercase().eq(first.to_lowercase()) => u,
    _ => first,
  };

  let mut out = String::with_capacity(word.len());
  out.push(head);
  out.push_str(&chars.as_str().to_lowercase());
  out
}

/// Normaliza un nombre a "title case" inteligente.
///
/// Separa por espacios simples, capitaliza cada palabra y deja en minúscula
/// las palabras vacías salvo la primera y la última. Entrada vacía devuelve
/// cadena vacía.
///
/// ```
/// use blackstar_core::normalize::normalize_name;
///
/// assert_eq!(normalize_name("NOITE DE VERÃO"), "Noite de Verão");
/// assert_eq!(normalize_name("the end of the road"), "The End of the Road");
/// ```
pub fn normalize_name(s: &str) -> String {
  if s.is_empty() {
    return String::new();
  }

  let words: Vec<&str> = s.split(' ').collect();
  let last = words.len() - 1;

  words
    .iter()
    .enumerate()
    .map(|(i, word)| {
      if i > 0 && i < last && is_stop_word(word) { word.to_lowercase() } else { capitalize(word) }
    })
    .collect::<Vec<_>>()
    .join(" ")
}

/// Normaliza cada nombre de una lista, conservando el orden.
pub fn normalize_names(names: &[String]) -> Vec<String> {
  names.iter().map(|n| normalize_name(n)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;
  use rstest::rstest;

  #[rstest]
  #[case("", "")]
  #[case("mc kevin", "Mc Kevin")]
  #[case("JOÃO DA SILVA", "João da Silva")]
  #[case("de volta pra casa", "De Volta Pra Casa")]
  #[case("amor e paz", "Amor e Paz")]
  #[case("quem é de", "Quem É De")]
  #[case("THE BEST OF THE BEST", "The Best of the Best")]
  #[case("rock vs. rap", "Rock vs. Rap")]
  #[case("eletrônica", "Eletrônica")]
  #[case("dois  espaços", "Dois  Espaços")]
  fn test_normalize_name(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_name(input), expected);
  }

  #[test]
  fn test_single_stop_word_is_capitalized() {
    assert_eq!(normalize_name("the"), "The");
    assert_eq!(normalize_name("of the"), "Of The");
  }

  #[test]
  fn test_unstable_capitals_are_left_alone() {
    assert_eq!(normalize_name("ßa"), "ßa");
    assert_eq!(normalize_name("ın"), "ın");
  }

  proptest! {
    #[test]
    fn prop_normalize_name_is_idempotent(s in "\\PC{0,40}") {
      let once = normalize_name(&s);
      prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn prop_word_count_is_preserved(words in prop::collection::vec("[a-zA-Z]{0,8}", 0..6)) {
      let s = words.join(" ");
      prop_assert_eq!(normalize_name(&s).split(' ').count(), s.split(' ').count());
    }
  }
}
