use crate::Voice;

#[test]
fn test_voice_empty_strings_read_as_absent() {
    let mut voice = Voice::new(3, "Casual");
    voice.content_instructions = Some(String::new());
    voice.excerpt_instructions = Some("Keep it light.".into());

    assert_eq!(voice.content_instructions(), None);
    assert_eq!(voice.title_prompt(), None);
    assert_eq!(voice.excerpt_instructions(), Some("Keep it light."));
}
