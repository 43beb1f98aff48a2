use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado editorial de un lanzamiento.
///
/// Salvo `Rejected`, siempre es función pura del [`Checklist`]
/// (ver [`derive_status`]). `Rejected` es una asignación manual, fuera de la
/// escalera del checklist.
///
/// Las etiquetas serializadas son las que usa el catálogo desde el inicio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleaseStatus {
  #[serde(rename = "Não Subido")]
  NotUploaded,
  #[serde(rename = "Em Análise")]
  UnderReview,
  #[serde(rename = "Aprovado")]
  Approved,
  #[serde(rename = "Distribuído")]
  Distributed,
  #[serde(rename = "Finalizado")]
  Finalized,
  #[serde(rename = "Rejeitado")]
  Rejected,
}

impl ReleaseStatus {
  /// Estado con el que nace toda entrega aceptada.
  pub const INITIAL: ReleaseStatus = ReleaseStatus::UnderReview;

  /// `true` para los estados que ya salieron del flujo activo.
  pub fn is_closed(self) -> bool {
    matches!(self, ReleaseStatus::Finalized | ReleaseStatus::Rejected)
  }
}

impl fmt::Display for ReleaseStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      ReleaseStatus::NotUploaded => "Não Subido",
      ReleaseStatus::UnderReview => "Em Análise",
      ReleaseStatus::Approved => "Aprovado",
      ReleaseStatus::Distributed => "Distribuído",
      ReleaseStatus::Finalized => "Finalizado",
      ReleaseStatus::Rejected => "Rejeitado",
    };
    write!(f, "{text}")
  }
}

/// Checklist de aprobación: cuatro casillas independientes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checklist {
  /// Archivos (audio y capa) conferidos.
  #[serde(rename = "arquivosConferidos")]
  pub files_verified: bool,
  /// Metadatos verificados.
  #[serde(rename = "metadadosVerificados")]
  pub metadata_verified: bool,
  /// Enviado a la distribuidora.
  #[serde(rename = "enviadoDistribuidora")]
  pub sent_to_distributor: bool,
  /// Share-in enviado.
  #[serde(rename = "shareInEnviado")]
  pub share_in_sent: bool,
}

impl Checklist {
  pub fn new(
    files_verified: bool,
    metadata_verified: bool,
    sent_to_distributor: bool,
    share_in_sent: bool,
  ) -> Self {
    Self { files_verified, metadata_verified, sent_to_distributor, share_in_sent }
  }
}

type Rule = (fn(&Checklist) -> bool, ReleaseStatus);

fn files(c: &Checklist) -> bool {
  c.files_verified
}

fn files_and_metadata(c: &Checklist) -> bool {
  files(c) && c.metadata_verified
}

fn distributed(c: &Checklist) -> bool {
  files_and_metadata(c) && c.sent_to_distributor
}

fn everything(c: &Checklist) -> bool {
  distributed(c) && c.share_in_sent
}

/// Escalera de estados, de más completo a menos. La primera regla que se
/// cumple gana; cada peldaño exige todos los anteriores.
const LADDER: [Rule; 4] = [
  (everything, ReleaseStatus::Finalized),
  (distributed, ReleaseStatus::Distributed),
  (files_and_metadata, ReleaseStatus::Approved),
  (files, ReleaseStatus::UnderReview),
];

/// Deriva el estado a partir del checklist completo.
///
/// Función total y sin efectos: nunca devuelve `Rejected`.
pub fn derive_status(checklist: &Checklist) -> ReleaseStatus {
  LADDER
    .iter()
    .find(|(holds, _)| holds(checklist))
    .map(|(_, status)| *status)
    .unwrap_or(ReleaseStatus::NotUploaded)
}
