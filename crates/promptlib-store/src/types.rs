use promptlib_catalog::PromptTemplate;
use serde::{Deserialize, Serialize};

/// A prompt the user chose to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPrompt {
    pub id: String,
    pub name: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Fields supplied by the caller when saving a prompt. The store assigns
/// the id and timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedPrompt {
    pub name: String,
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewSavedPrompt {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative_prompt.into());
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(aspect_ratio.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl From<&PromptTemplate> for NewSavedPrompt {
    fn from(template: &PromptTemplate) -> Self {
        Self {
            name: template.title.clone(),
            prompt: template.prompt.clone(),
            negative_prompt: None,
            aspect_ratio: None,
            category: Some(template.category.clone()),
        }
    }
}

/// Partial update for a saved prompt. `None` keeps the current value.
///
/// There is no way to change `id` or `timestamp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPromptUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl SavedPromptUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.prompt.is_none()
            && self.negative_prompt.is_none()
            && self.aspect_ratio.is_none()
            && self.category.is_none()
    }

    pub(crate) fn apply_to(self, target: &mut SavedPrompt) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(prompt) = self.prompt {
            target.prompt = prompt;
        }
        if let Some(negative_prompt) = self.negative_prompt {
            target.negative_prompt = Some(negative_prompt);
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            target.aspect_ratio = Some(aspect_ratio);
        }
        if let Some(category) = self.category {
            target.category = Some(category);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved() -> SavedPrompt {
        SavedPrompt {
            id: "p-1".to_string(),
            name: "Cat poster".to_string(),
            prompt: "a cat".to_string(),
            negative_prompt: Some("blurry".to_string()),
            aspect_ratio: None,
            category: Some("style".to_string()),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_serializes_camel_case_and_omits_missing_fields() {
        let json = serde_json::to_value(saved()).unwrap();
        assert_eq!(json["negativePrompt"], "blurry");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
        assert!(json.get("aspectRatio").is_none());
        assert!(json.get("negative_prompt").is_none());
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let prompt: SavedPrompt =
            serde_json::from_str(r#"{"id":"x","name":"n","prompt":"p","timestamp":5}"#).unwrap();
        assert_eq!(prompt.category, None);
        assert_eq!(prompt.timestamp, 5);
    }

    #[test]
    fn test_update_replaces_only_provided_fields() {
        let mut prompt = saved();
        SavedPromptUpdate {
            name: Some("Dog poster".to_string()),
            aspect_ratio: Some("16:9".to_string()),
            ..Default::default()
        }
        .apply_to(&mut prompt);

        assert_eq!(prompt.name, "Dog poster");
        assert_eq!(prompt.aspect_ratio.as_deref(), Some("16:9"));
        assert_eq!(prompt.prompt, "a cat");
        assert_eq!(prompt.negative_prompt.as_deref(), Some("blurry"));
        assert_eq!(prompt.id, "p-1");
        assert_eq!(prompt.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn test_update_ignores_id_and_timestamp_in_payload() {
        let update: SavedPromptUpdate =
            serde_json::from_str(r#"{"id":"other","timestamp":1,"prompt":"a dog"}"#).unwrap();
        let mut prompt = saved();
        update.apply_to(&mut prompt);
        assert_eq!(prompt.id, "p-1");
        assert_eq!(prompt.timestamp, 1_700_000_000_000);
        assert_eq!(prompt.prompt, "a dog");
    }

    #[test]
    fn test_from_template() {
        let template = PromptTemplate {
            id: "pose-transfer".to_string(),
            title: "Pose Transfer".to_string(),
            category: "people".to_string(),
            prompt: "match the pose".to_string(),
            description: "d".to_string(),
            tags: vec![],
            example_image: None,
            difficulty: None,
        };
        let new = NewSavedPrompt::from(&template);
        assert_eq!(new.name, "Pose Transfer");
        assert_eq!(new.prompt, "match the pose");
        assert_eq!(new.category.as_deref(), Some("people"));
    }
}
