//! Informes sobre el catálogo. Funciones puras sobre una lista de lanzamientos.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::domain::{Genre, Release, ReleaseStatus};

/// Lanzamientos todavía en el flujo de revisión.
pub fn active(releases: &[Release]) -> Vec<&Release> {
  releases.iter().filter(|r| !r.status.is_closed()).collect()
}

/// Lanzamientos finalizados o rechazados.
pub fn history(releases: &[Release]) -> Vec<&Release> {
  releases.iter().filter(|r| r.status.is_closed()).collect()
}

/// Contadores del panel del staff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dashboard {
  /// `UnderReview` y `NotUploaded`.
  pub pending: usize,
  /// `Approved`, a la espera de enviarse a la distribuidora.
  pub awaiting_distribution: usize,
  /// `Finalized` entregados en el mes de `today`.
  pub finalized_this_month: usize,
}

pub fn dashboard(releases: &[Release], today: NaiveDate) -> Dashboard {
  let same_month = |r: &Release| {
    let created = r.created_at.date_naive();
    created.year() == today.year() && created.month() == today.month()
  };

  releases.iter().fold(Dashboard::default(), |mut acc, r| {
    match r.status {
      ReleaseStatus::UnderReview | ReleaseStatus::NotUploaded => acc.pending += 1,
      ReleaseStatus::Approved => acc.awaiting_distribution += 1,
      ReleaseStatus::Finalized if same_month(r) => acc.finalized_this_month += 1,
      _ => {}
    }
    acc
  })
}

/// Cantidad de lanzamientos por género, del más usado al menos usado.
///
/// Incluye todas las opciones fijas aunque no tengan lanzamientos, más los
/// géneros libres en uso. A igual cantidad se respeta el orden de las
/// opciones y después el alfabético.
pub fn genre_breakdown(releases: &[Release]) -> Vec<(Genre, usize)> {
  let mut counts: HashMap<Genre, usize> = Genre::OPTIONS.into_iter().map(|g| (g, 0)).collect();
  for release in releases {
    *counts.entry(release.genre.clone()).or_default() += 1;
  }

  let mut rows: Vec<(Genre, usize)> = counts.into_iter().collect();
  rows.sort_by(|(ga, na), (gb, nb)| nb.cmp(na).then_with(|| ga.cmp(gb)));
  rows
}

/// Compositores que ya aparecen en el catálogo, para sugerencias.
pub fn known_composers(releases: &[Release]) -> Vec<String> {
  releases
    .iter()
    .flat_map(|r| r.tracks.iter())
    .flat_map(|t| t.composers.iter())
    .map(|c| c.trim())
    .filter(|c| !c.is_empty())
    .map(str::to_string)
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Checklist, MediaRef, ReleaseId, ReleaseType, Track, TrackId};
  use chrono::{TimeZone, Utc};
  use pretty_assertions::assert_eq;

  fn release(status: ReleaseStatus, genre: Genre, created: (i32, u32, u32)) -> Release {
    Release {
      id: ReleaseId::new(),
      release_type: ReleaseType::Single,
      title: "Faixa".into(),
      main_artists: vec!["Mc Kevin".into()],
      genre,
      release_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
      created_at: Utc.with_ymd_and_hms(created.0, created.1, created.2, 12, 0, 0).unwrap(),
      has_cover: false,
      cover: MediaRef::Absent,
      status,
      checklist: Checklist::default(),
      tracks: vec![Track {
        id: TrackId::new(),
        title: "Faixa".into(),
        artists: vec!["Mc Kevin".into()],
        composers: vec!["Ana Souza".into(), "Bruno Lima".into()],
        has_isrc: false,
        isrc: None,
        audio: MediaRef::Absent,
        audio_fingerprint: None,
        lyrics: None,
      }],
      purged: false,
      admin_notes: None,
      downloads: Vec::new(),
    }
  }

  fn catalog() -> Vec<Release> {
    vec![
      release(ReleaseStatus::UnderReview, Genre::Funk, (2025, 6, 2)),
      release(ReleaseStatus::NotUploaded, Genre::Funk, (2025, 6, 3)),
      release(ReleaseStatus::Approved, Genre::Trap, (2025, 5, 20)),
      release(ReleaseStatus::Distributed, Genre::Custom("Piseiro".into()), (2025, 5, 1)),
      release(ReleaseStatus::Finalized, Genre::Funk, (2025, 6, 1)),
      release(ReleaseStatus::Finalized, Genre::Pop, (2025, 5, 31)),
      release(ReleaseStatus::Rejected, Genre::Rap, (2025, 6, 4)),
    ]
  }

  #[test]
  fn test_active_and_history_partition_the_catalog() {
    let releases = catalog();
    let active = active(&releases);
    let history = history(&releases);

    assert_eq!(active.len() + history.len(), releases.len());
    assert!(history.iter().all(|r| r.status.is_closed()));
    assert_eq!(active.len(), 4);
  }

  #[test]
  fn test_dashboard_counts() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    assert_eq!(
      dashboard(&catalog(), today),
      Dashboard { pending: 2, awaiting_distribution: 1, finalized_this_month: 1 }
    );
  }

  #[test]
  fn test_genre_breakdown_keeps_empty_options_and_sorts_by_count() {
    let rows = genre_breakdown(&catalog());

    assert_eq!(rows.len(), Genre::OPTIONS.len() + 1);
    assert_eq!(rows[0], (Genre::Funk, 3));
    assert!(rows.contains(&(Genre::Sertanejo, 0)));
    assert!(rows.contains(&(Genre::Custom("Piseiro".into()), 1)));
    assert!(rows.windows(2).all(|w| w[0].1 >= w[1].1));
  }

  #[test]
  fn test_known_composers_are_sorted_and_unique() {
    assert_eq!(
      known_composers(&catalog()),
      vec!["Ana Souza".to_string(), "Bruno Lima".to_string()]
    );
  }
}
