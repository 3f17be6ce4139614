use crate::{ArticleStructure, StructureData};

use googletest::prelude::*;

#[test]
fn given_structure_data_when_stored_then_parses_back() {
    // Given
    let data = StructureData {
        sections: vec!["intro".into(), "steps".into()],
        prompt_template: "{{section:intro}}\n{{section:steps}}".into(),
    };

    // When
    let structure = ArticleStructure::new(1, "How-to", &data).unwrap();

    // Then
    assert_that!(structure.parse_data(), ok(eq(&data)));
    assert_that!(structure.is_active, eq(true));
}

#[test]
fn given_partial_json_when_parsed_then_missing_fields_default() {
    let structure = ArticleStructure {
        id: 2,
        name: "Bare".into(),
        description: None,
        structure_data: r#"{"prompt_template":"x"}"#.into(),
        is_active: true,
        is_default: false,
    };

    let data = structure.parse_data().unwrap();
    assert_that!(data.sections, len(eq(0)));
    assert_that!(data.prompt_template.as_str(), eq("x"));
}

#[test]
fn given_garbage_json_when_parsed_then_error() {
    let structure = ArticleStructure {
        id: 3,
        name: "Broken".into(),
        description: None,
        structure_data: "not json".into(),
        is_active: true,
        is_default: false,
    };

    assert_that!(structure.parse_data(), err(anything()));
}
