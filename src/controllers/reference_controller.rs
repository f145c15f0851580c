//! Controlador genérico de las tablas de referencia
//!
//! Los cambios sobre los estados no alteran el catálogo cargado al arrancar.

use tracing::info;
use validator::Validate;

use crate::dto::reference_dto::{ReferenceRequest, ReferenceView};
use crate::models::reference::ReferenceKind;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct ReferenceController {
    state: AppState,
    kind: ReferenceKind,
}

impl ReferenceController {
    pub fn new(state: &AppState, kind: ReferenceKind) -> Self {
        Self {
            state: state.clone(),
            kind,
        }
    }

    pub async fn index(&self) -> AppResult<Vec<ReferenceView>> {
        let entries = self.state.repos.references.list(self.kind).await?;
        Ok(entries.into_iter().map(|e| ReferenceView::new(self.kind, e)).collect())
    }

    pub async fn show(&self, id: i64) -> AppResult<Option<ReferenceView>> {
        let entry = self.state.repos.references.find_by_id(self.kind, id).await?;
        Ok(entry.map(|e| ReferenceView::new(self.kind, e)))
    }

    pub async fn store(&self, request: ReferenceRequest) -> AppResult<ReferenceView> {
        request.validate()?;
        let entry = self
            .state
            .repos
            .references
            .create(self.kind, request.label.trim().to_string())
            .await?;

        info!("📚 {} '{}' creado con id {}", self.kind.display_name(), entry.label, entry.id);
        Ok(ReferenceView::new(self.kind, entry))
    }

    pub async fn update(&self, id: i64, request: ReferenceRequest) -> AppResult<ReferenceView> {
        request.validate()?;
        let entry = self
            .state
            .repos
            .references
            .update(self.kind, id, request.label.trim().to_string())
            .await?
            .ok_or_else(|| not_found_error(self.kind.display_name(), id))?;

        Ok(ReferenceView::new(self.kind, entry))
    }

    pub async fn destroy(&self, id: i64) -> AppResult<()> {
        if !self.state.repos.references.delete(self.kind, id).await? {
            return Err(not_found_error(self.kind.display_name(), id));
        }
        Ok(())
    }
}
