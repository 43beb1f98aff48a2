use crate::schema::{artists, releases};

use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = releases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReleaseRow {
  pub id: String,
  pub created_at: String,
  /// `ReleaseDocument` en JSON.
  pub document: String,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = artists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArtistRow {
  pub name: String,
  pub created_at: String,
}
