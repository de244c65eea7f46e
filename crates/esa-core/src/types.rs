use serde::{Deserialize, Serialize};

/// Payload for creating a post.
///
/// `name` and `body_md` are required; the rest carry the defaults the tool
/// surface advertises. Every field serializes, defaults included — the
/// esa.io API treats them as real values, not as "leave unset".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub name: String,
    pub body_md: String,
    pub tags: Vec<String>,
    pub category: String,
    pub wip: bool,
    pub message: String,
}

impl NewPost {
    /// Create a payload with the default optional fields: no tags, no
    /// category, WIP, no commit message.
    #[must_use]
    pub fn new(name: impl Into<String>, body_md: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body_md: body_md.into(),
            tags: Vec::new(),
            category: String::new(),
            wip: true,
            message: String::new(),
        }
    }
}

/// Partial payload for updating a post.
///
/// Unset fields are omitted from the serialized body entirely so they never
/// overwrite existing remote values with null. `Some("")` is an explicit
/// value and still serializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_md: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PostPatch {
    /// True when no field is set, i.e. there is nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.body_md.is_none()
            && self.tags.is_none()
            && self.category.is_none()
            && self.wip.is_none()
            && self.message.is_none()
    }
}

/// Optional filters for listing posts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostQuery {
    /// esa.io search query string.
    pub q: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PostQuery {
    /// Query pairs for exactly the fields that are set. Absent fields
    /// produce no pair at all.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(q) = &self.q {
            params.push(("q", q.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        params
    }
}
