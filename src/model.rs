// ABOUTME: Serde data models for Notion pages, properties, and blocks
// ABOUTME: Typed property accessors and a closed block-kind enum

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Smallest unit of styled text. Only `text.content` is ever read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub text: Option<TextContent>,
    #[serde(default)]
    pub plain_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        let content = content.into();
        RichText {
            plain_text: Some(content.clone()),
            text: Some(TextContent { content }),
        }
    }

    pub fn content(&self) -> &str {
        self.text.as_ref().map(|t| t.content.as_str()).unwrap_or("")
    }
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    #[serde(other)]
    Other,
}

/// One database record. Read-only snapshot of the remote page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
    pub last_edited_time: String,
}

impl Page {
    fn missing(&self, property: &str) -> Error {
        Error::MissingField {
            page_id: self.id.clone(),
            property: property.to_string(),
        }
    }

    /// Title runs of a `title` property. Fails if absent or without entries.
    pub fn required_title(&self, property: &str) -> Result<&[RichText]> {
        match self.properties.get(property) {
            Some(PropertyValue::Title { title }) if !title.is_empty() => Ok(title.as_slice()),
            _ => Err(self.missing(property)),
        }
    }

    /// Name of the chosen option of a `select` property. Fails if nothing is selected.
    pub fn required_select(&self, property: &str) -> Result<&str> {
        match self.properties.get(property) {
            Some(PropertyValue::Select {
                select: Some(option),
            }) if !option.name.is_empty() => Ok(option.name.as_str()),
            _ => Err(self.missing(property)),
        }
    }

    /// Option names of a `multi_select` property, empty when absent.
    pub fn multi_select(&self, property: &str) -> Vec<&str> {
        match self.properties.get(property) {
            Some(PropertyValue::MultiSelect { multi_select }) => {
                multi_select.iter().map(|o| o.name.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Runs of a `rich_text` property, empty when absent.
    pub fn rich_text(&self, property: &str) -> &[RichText] {
        match self.properties.get(property) {
            Some(PropertyValue::RichText { rich_text }) => rich_text.as_slice(),
            _ => &[],
        }
    }
}

#[cfg(test)]
mod page_tests {
    use super::*;

    fn sample_page() -> Page {
        let json = r#"{
            "object": "page",
            "id": "page-1",
            "created_time": "2024-01-01T00:00:00.000Z",
            "last_edited_time": "2024-03-05T10:20:00.000Z",
            "properties": {
                "Title": {"id": "title", "type": "title", "title": [
                    {"type": "text", "text": {"content": "My Note"}, "plain_text": "My Note"}
                ]},
                "Category": {"id": "c", "type": "select", "select": {"id": "x", "name": "Deep Dives", "color": "blue"}},
                "Tags": {"id": "t", "type": "multi_select", "multi_select": [{"name": "rust"}, {"name": "sync"}]},
                "Summary": {"id": "s", "type": "rich_text", "rich_text": []},
                "Status": {"id": "st", "type": "status", "status": {"name": "Published"}}
            }
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_page_deserialize_properties() {
        let page = sample_page();
        assert_eq!(page.id, "page-1");
        assert_eq!(page.last_edited_time, "2024-03-05T10:20:00.000Z");
        assert!(matches!(
            page.properties.get("Status"),
            Some(PropertyValue::Other)
        ));
    }

    #[test]
    fn test_required_accessors() {
        let page = sample_page();
        assert_eq!(page.required_title("Title").unwrap()[0].content(), "My Note");
        assert_eq!(page.required_select("Category").unwrap(), "Deep Dives");
        assert_eq!(page.multi_select("Tags"), vec!["rust", "sync"]);
        assert!(page.rich_text("Summary").is_empty());
    }

    #[test]
    fn test_required_accessors_fail_loudly() {
        let page = sample_page();
        assert!(matches!(
            page.required_title("Missing"),
            Err(Error::MissingField { ref property, .. }) if property == "Missing"
        ));
        // Wrong property type counts as missing
        assert!(page.required_select("Title").is_err());
    }

    #[test]
    fn test_null_select_is_missing() {
        let json = r#"{
            "id": "page-2",
            "last_edited_time": "2024-03-05T10:20:00.000Z",
            "properties": {
                "Category": {"type": "select", "select": null},
                "Title": {"type": "title", "title": []}
            }
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert!(page.required_select("Category").is_err());
        assert!(page.required_title("Title").is_err());
    }

    #[test]
    fn test_optional_accessors_default_empty() {
        let json = r#"{"id": "page-3", "last_edited_time": "2024-03-05T10:20:00.000Z"}"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert!(page.multi_select("Tags").is_empty());
        assert!(page.rich_text("Summary").is_empty());
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: String,
}

/// One content unit of a page body, keyed by the block's `type` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: TextBlock },
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: TextBlock },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: TextBlock },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: TextBlock },
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { bulleted_list_item: TextBlock },
    #[serde(rename = "numbered_list_item")]
    NumberedListItem { numbered_list_item: TextBlock },
    #[serde(rename = "code")]
    Code { code: CodeBlock },
    #[serde(other)]
    Unsupported,
}
