use crate::{EngineError, EngineResult};

use ps_config::Config;
use ps_core::Template;
use ps_db::{
    ArticleStructureRepository, PromptSectionRepository, TemplateRepository, VoiceRepository,
};
use ps_prompt::{CatalogStructureComposer, GenerationRequest, VariableResolver};

use std::sync::Arc;

use log::debug;
use sqlx::SqlitePool;

/// Resolver seeded with the configured site identity.
pub fn resolver_from_config(config: &Config) -> VariableResolver {
    VariableResolver::new(config.site.name.clone(), config.site.description.clone())
}

/// Loads templates, voices and article structures from the database.
#[derive(Clone)]
pub struct Catalog {
    pool: SqlitePool,
}

impl Catalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Composer over every stored structure and section.
    pub async fn load_composer(
        &self,
        resolver: Arc<VariableResolver>,
    ) -> EngineResult<CatalogStructureComposer> {
        let structures = ArticleStructureRepository::new(self.pool.clone())
            .list_all()
            .await?;
        let sections = PromptSectionRepository::new(self.pool.clone())
            .list_all()
            .await?;

        debug!(
            "Loaded {} article structures and {} prompt sections",
            structures.len(),
            sections.len()
        );

        Ok(CatalogStructureComposer::new(structures, sections, resolver))
    }

    pub async fn active_templates(&self) -> EngineResult<Vec<Template>> {
        Ok(TemplateRepository::new(self.pool.clone())
            .list_active()
            .await?)
    }

    /// Template request with the template's voice attached.
    ///
    /// Inactive templates are reported as not found. A dangling voice link
    /// is dropped rather than failing the run.
    pub async fn template_request(
        &self,
        template_id: i64,
        topic: Option<String>,
    ) -> EngineResult<GenerationRequest> {
        let template = TemplateRepository::new(self.pool.clone())
            .find_by_id(template_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| EngineError::not_found("Template", template_id))?;

        let voice = match template.voice_id {
            Some(voice_id) => {
                VoiceRepository::new(self.pool.clone())
                    .find_by_id(voice_id)
                    .await?
            }
            None => None,
        };

        Ok(GenerationRequest::Template {
            template,
            topic,
            voice,
        })
    }
}
