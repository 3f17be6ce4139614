use serde::{Deserialize, Serialize};

/// Ordered composition of prompt sections.
///
/// `structure_data` holds the raw JSON document as stored; use
/// [`ArticleStructure::parse_data`] to read the section keys and the
/// `{{section:<key>}}` prompt template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleStructure {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub structure_data: String,
    pub is_active: bool,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StructureData {
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub prompt_template: String,
}

impl ArticleStructure {
    pub fn new(id: i64, name: impl Into<String>, data: &StructureData) -> serde_json::Result<Self> {
        Ok(Self {
            id,
            name: name.into(),
            description: None,
            structure_data: serde_json::to_string(data)?,
            is_active: true,
            is_default: false,
        })
    }

    pub fn parse_data(&self) -> serde_json::Result<StructureData> {
        serde_json::from_str(&self.structure_data)
    }
}
