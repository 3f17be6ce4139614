use crate::tests::fixed_resolver;
use crate::{CatalogStructureComposer, CompositionError, StructureComposer};

use ps_core::{ArticleStructure, PromptSection, StructureData};

use std::sync::Arc;

use googletest::prelude::*;

fn structure(id: i64, sections: &[&str], prompt_template: &str) -> ArticleStructure {
    let data = StructureData {
        sections: sections.iter().map(|s| s.to_string()).collect(),
        prompt_template: prompt_template.to_string(),
    };
    ArticleStructure::new(id, format!("Structure {id}"), &data).unwrap()
}

fn listicle_catalog() -> CatalogStructureComposer {
    let structures = vec![structure(
        1,
        &["intro", "body"],
        "Topic: {{topic}}\n{{section:intro}}\n{{ section:body }}",
    )];
    let sections = vec![
        PromptSection::new(10, "intro", "Open with a hook about {{topic}}."),
        PromptSection::new(11, "body", "List {{random_number}} tips."),
    ];

    CatalogStructureComposer::new(structures, sections, Arc::new(fixed_resolver()))
}

#[test]
fn given_structure_with_sections_when_build_prompt_then_sections_expanded_and_processed() {
    // Given
    let composer = listicle_catalog();

    // When
    let prompt = composer.build_prompt(1, Some("tomatoes")).unwrap();

    // Then
    assert_that!(prompt, starts_with("Topic: tomatoes\nOpen with a hook about tomatoes.\nList "));
    assert_that!(prompt, ends_with(" tips."));
    assert_that!(prompt, not(contains_substring("{{")));
}

#[test]
fn given_section_content_with_section_token_when_build_prompt_then_not_rescanned() {
    let structures = vec![structure(2, &["a"], "{{section:a}}")];
    let sections = vec![PromptSection::new(1, "a", "See {{section:a}} and {{year}}")];
    let composer = CatalogStructureComposer::new(structures, sections, Arc::new(fixed_resolver()));

    let prompt = composer.build_prompt(2, None).unwrap();

    assert_that!(prompt.as_str(), eq("See {{section:a}} and 2024"));
}

#[test]
fn given_unknown_structure_when_build_prompt_then_not_found() {
    let result = listicle_catalog().build_prompt(99, Some("x"));

    assert!(matches!(
        result,
        Err(CompositionError::StructureNotFound { id: 99, .. })
    ));
}

#[test]
fn given_inactive_structure_when_build_prompt_then_inactive() {
    let mut inactive = structure(3, &[], "Plain");
    inactive.is_active = false;
    let composer =
        CatalogStructureComposer::new(vec![inactive], Vec::new(), Arc::new(fixed_resolver()));

    let result = composer.build_prompt(3, None);

    assert!(matches!(
        result,
        Err(CompositionError::StructureInactive { id: 3, .. })
    ));
}

#[test]
fn given_malformed_structure_data_when_build_prompt_then_invalid_data() {
    let mut broken = structure(4, &[], "");
    broken.structure_data = "{not json".to_string();
    let composer =
        CatalogStructureComposer::new(vec![broken], Vec::new(), Arc::new(fixed_resolver()));

    let result = composer.build_prompt(4, None);

    assert!(matches!(
        result,
        Err(CompositionError::InvalidStructureData { id: 4, .. })
    ));
}

#[test]
fn given_inactive_section_when_build_prompt_then_section_missing() {
    // Given
    let structures = vec![structure(5, &["outro"], "{{section:outro}}")];
    let mut outro = PromptSection::new(1, "outro", "Wrap up.");
    outro.is_active = false;
    let composer =
        CatalogStructureComposer::new(structures, vec![outro], Arc::new(fixed_resolver()));

    // When
    let result = composer.build_prompt(5, None);

    // Then
    match result {
        Err(CompositionError::SectionMissing { key, .. }) => assert_that!(key.as_str(), eq("outro")),
        other => panic!("expected SectionMissing, got {other:?}"),
    }
}

#[test]
fn given_default_flag_when_default_structure_then_flagged_one_wins() {
    let mut flagged = structure(7, &[], "b");
    flagged.is_default = true;
    let composer = CatalogStructureComposer::new(
        vec![structure(6, &[], "a"), flagged],
        Vec::new(),
        Arc::new(fixed_resolver()),
    );

    assert_that!(composer.default_structure().unwrap().id, eq(7));
}

#[test]
fn given_no_default_flag_when_default_structure_then_first_active() {
    let mut inactive = structure(8, &[], "a");
    inactive.is_active = false;
    let composer = CatalogStructureComposer::new(
        vec![inactive, structure(9, &[], "b")],
        Vec::new(),
        Arc::new(fixed_resolver()),
    );

    assert_that!(composer.default_structure().unwrap().id, eq(9));
}

#[test]
fn given_empty_catalog_when_default_structure_then_no_structures() {
    let composer = CatalogStructureComposer::empty(Arc::new(fixed_resolver()));

    assert!(matches!(
        composer.default_structure(),
        Err(CompositionError::NoStructures { .. })
    ));
}
