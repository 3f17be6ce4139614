use ps_config::Config;
use ps_core::{ArticleStructure, PromptSection, StructureData, Template, Voice};
use ps_db::{
    ArticleStructureRepository, PromptSectionRepository, TemplateRepository, VoiceRepository,
};
use ps_engine::{Catalog, EngineError, resolver_from_config};
use ps_prompt::{GenerationRequest, StructureComposer};

use std::sync::Arc;

use googletest::prelude::*;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    ps_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

#[tokio::test]
async fn given_stored_structure_when_load_composer_then_sections_composed() {
    // Given
    let pool = create_test_pool().await;
    PromptSectionRepository::new(pool.clone())
        .create(&PromptSection::new(0, "intro", "Open with a hook."))
        .await
        .unwrap();
    let data = StructureData {
        sections: vec!["intro".to_string()],
        prompt_template: "About {{topic}}: {{section:intro}}".to_string(),
    };
    let structure_id = ArticleStructureRepository::new(pool.clone())
        .create(&ArticleStructure::new(0, "Simple", &data).unwrap())
        .await
        .unwrap();
    let resolver = Arc::new(resolver_from_config(&Config::default()));

    // When
    let composer = Catalog::new(pool).load_composer(resolver).await.unwrap();

    // Then
    let prompt = composer.build_prompt(structure_id, Some("compost")).unwrap();
    assert_that!(prompt, contains_substring("About compost: Open with a hook."));
}

#[tokio::test]
async fn given_template_with_voice_when_template_request_then_voice_attached() {
    // Given
    let pool = create_test_pool().await;
    let voice_id = VoiceRepository::new(pool.clone())
        .create(&Voice::new(0, "Friendly"))
        .await
        .unwrap();
    let mut template = Template::new(0, "Garden", "Write about {{topic}}");
    template.voice_id = Some(voice_id);
    let template_id = TemplateRepository::new(pool.clone())
        .create(&template)
        .await
        .unwrap();

    // When
    let request = Catalog::new(pool)
        .template_request(template_id, Some("roses".to_string()))
        .await
        .unwrap();

    // Then
    assert_that!(request.template_id(), some(eq(template_id)));
    assert_that!(request.topic().map(str::to_string), some(eq("roses")));
    assert_that!(request.voice().map(|v| v.name.clone()), some(eq("Friendly")));
    assert!(matches!(request, GenerationRequest::Template { .. }));
}

#[tokio::test]
async fn given_inactive_template_when_template_request_then_not_found() {
    // Given
    let pool = create_test_pool().await;
    let mut template = Template::new(0, "Retired", "Old prompt");
    template.is_active = false;
    let template_id = TemplateRepository::new(pool.clone())
        .create(&template)
        .await
        .unwrap();

    // When
    let result = Catalog::new(pool).template_request(template_id, None).await;

    // Then
    assert!(matches!(result, Err(EngineError::NotFound { .. })));
}

#[tokio::test]
async fn given_mixed_templates_when_active_templates_then_only_active() {
    let pool = create_test_pool().await;
    let repo = TemplateRepository::new(pool.clone());
    let mut retired = Template::new(0, "Retired", "Old");
    retired.is_active = false;
    repo.create(&Template::new(0, "Live", "New")).await.unwrap();
    repo.create(&retired).await.unwrap();

    let templates = Catalog::new(pool).active_templates().await.unwrap();

    assert_that!(templates, len(eq(1)));
    assert_that!(templates[0].name.as_str(), eq("Live"));
}

#[test]
fn given_site_config_when_resolver_from_config_then_site_variables_exposed() {
    let mut config = Config::default();
    config.site.name = "Green Thumb".to_string();
    config.site.description = "Gardening for everyone".to_string();

    let resolver = resolver_from_config(&config);

    assert_that!(
        resolver.process("{{site_name}} / {{site_description}}", None),
        eq("Green Thumb / Gardening for everyone")
    );
}
