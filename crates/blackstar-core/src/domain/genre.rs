use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Género de un lanzamiento.
///
/// Las opciones fijas son las que ofrece el formulario de envío. Cuando el
/// artista elige "Outros" debe escribir un sub-género libre, que se guarda
/// (ya normalizado) como [`Genre::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Genre {
  Funk,
  Trap,
  Rap,
  Pop,
  Pagode,
  Sertanejo,
  Eletronica,
  /// Género libre escrito por el artista.
  Custom(String),
}

/// Valor del selector que obliga a informar un sub-género.
pub const OTHER_GENRE_LABELS: &[&str] = &["Outros", "Other"];

impl Genre {
  /// Opciones fijas, en el orden en que se muestran.
  pub const OPTIONS: [Genre; 7] = [
    Genre::Funk,
    Genre::Trap,
    Genre::Rap,
    Genre::Pop,
    Genre::Pagode,
    Genre::Sertanejo,
    Genre::Eletronica,
  ];

  /// `true` si la etiqueta elegida es la opción "Outros".
  pub fn is_other_label(label: &str) -> bool {
    let label = label.trim();
    OTHER_GENRE_LABELS.iter().any(|other| other.eq_ignore_ascii_case(label))
  }
}

impl FromStr for Genre {
  type Err = std::convert::Infallible;

  /// Convierte una cadena en un `Genre`.
  ///
  /// Las opciones conocidas se reconocen sin distinguir mayúsculas ni
  /// acentos en "Eletrônica". Cualquier otro valor queda como `Custom`,
  /// así que parsear nunca falla.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase().replace('ô', "o");

    let genre = match normalized.as_str() {
      "funk" => Genre::Funk,
      "trap" => Genre::Trap,
      "rap" => Genre::Rap,
      "pop" => Genre::Pop,
      "pagode" => Genre::Pagode,
      "sertanejo" => Genre::Sertanejo,
      "eletronica" | "electronic" => Genre::Eletronica,
      _ => Genre::Custom(s.trim().to_string()),
    };

    Ok(genre)
  }
}

impl fmt::Display for Genre {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Genre::Funk => write!(f, "Funk"),
      Genre::Trap => write!(f, "Trap"),
      Genre::Rap => write!(f, "Rap"),
      Genre::Pop => write!(f, "Pop"),
      Genre::Pagode => write!(f, "Pagode"),
      Genre::Sertanejo => write!(f, "Sertanejo"),
      Genre::Eletronica => write!(f, "Eletrônica"),
      Genre::Custom(s) => write!(f, "{s}"),
    }
  }
}

impl From<Genre> for String {
  fn from(genre: Genre) -> Self {
    genre.to_string()
  }
}

impl From<String> for Genre {
  fn from(s: String) -> Self {
    match s.parse() {
      Ok(genre) => genre,
      Err(never) => match never {},
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_known_genres_round_trip_through_display() {
    for genre in Genre::OPTIONS {
      assert_eq!(genre.to_string().parse::<Genre>(), Ok(genre.clone()));
    }
  }

  #[test]
  fn test_unknown_genre_is_custom() {
    assert_eq!("Piseiro".parse::<Genre>(), Ok(Genre::Custom("Piseiro".into())));
  }

  #[test]
  fn test_other_label() {
    assert!(Genre::is_other_label("Outros"));
    assert!(Genre::is_other_label(" other "));
    assert!(!Genre::is_other_label("Funk"));
  }
}
