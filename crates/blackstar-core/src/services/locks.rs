use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures::lock::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::ReleaseId;

/// Cerrojos asíncronos por lanzamiento, dentro de un mismo proceso.
///
/// Las operaciones que leen y reescriben un lanzamiento (checklist, notas,
/// purga, borrado) toman el cerrojo de su id; así dos de ellas nunca se
/// intercalan sobre el mismo documento. Entre procesos distintos el store
/// sigue siendo "último en escribir gana".
#[derive(Debug, Default)]
pub struct ReleaseLocks {
  slots: Mutex<HashMap<ReleaseId, Arc<AsyncMutex<()>>>>,
}

/// Mientras viva, ninguna otra operación sobre el mismo id avanza.
#[must_use = "the release is unlocked as soon as the guard is dropped"]
pub struct ReleaseGuard {
  _guard: OwnedMutexGuard<()>,
}

impl ReleaseLocks {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn acquire(&self, id: ReleaseId) -> ReleaseGuard {
    let slot = {
      let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
      // Los slots que solo referencia el mapa no tienen dueño ni esperas.
      slots.retain(|_, slot| Arc::strong_count(slot) > 1);
      Arc::clone(slots.entry(id).or_default())
    };
    ReleaseGuard { _guard: slot.lock_owned().await }
  }

  /// Cantidad de ids con el cerrojo tomado o con alguien esperando.
  pub fn held(&self) -> usize {
    let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
    slots.values().filter(|slot| Arc::strong_count(slot) > 1).count()
  }
}
