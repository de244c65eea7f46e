use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Definition of an MCP tool exposed to the host runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Registry of the esa.io tools available to the host runtime.
///
/// Names, parameter types, and declared defaults are a stable contract:
/// host-side discovery depends on them.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Return the list of tool definitions for the MCP `tools/list` method.
    #[must_use]
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: "user_get_info".to_string(),
                description: "Get current esa.io user information.".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            ToolDefinition {
                name: "posts_get_list".to_string(),
                description: "Get a list of posts from esa.io, optionally filtered by a search query and pagination.".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "q": {
                            "type": "string",
                            "description": "Search query"
                        },
                        "page": {
                            "type": "integer",
                            "description": "Page number"
                        },
                        "per_page": {
                            "type": "integer",
                            "description": "Number of posts per page (max 100)"
                        }
                    },
                    "required": []
                }),
            },
            ToolDefinition {
                name: "posts_get_detail".to_string(),
                description: "Get details of a specific post from esa.io.".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "post_number": {
                            "type": "integer",
                            "description": "The number of the post to retrieve"
                        }
                    },
                    "required": ["post_number"]
                }),
            },
            ToolDefinition {
                name: "posts_create".to_string(),
                description: "Create a new post on esa.io.".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Post title"
                        },
                        "body_md": {
                            "type": "string",
                            "description": "Post body in Markdown format"
                        },
                        "tags": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "List of tags for the post",
                            "default": []
                        },
                        "category": {
                            "type": "string",
                            "description": "Category path (e.g., 'foo/bar')",
                            "default": ""
                        },
                        "wip": {
                            "type": "boolean",
                            "description": "Whether the post is Work In Progress",
                            "default": true
                        },
                        "message": {
                            "type": "string",
                            "description": "Commit message for the post",
                            "default": ""
                        }
                    },
                    "required": ["name", "body_md"]
                }),
            },
            ToolDefinition {
                name: "posts_update".to_string(),
                description: "Update an existing post on esa.io. Only the supplied fields change; omitted fields keep their current values.".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "post_number": {
                            "type": "integer",
                            "description": "The number of the post to update"
                        },
                        "name": {
                            "type": "string",
                            "description": "New post title"
                        },
                        "body_md": {
                            "type": "string",
                            "description": "New post body in Markdown format"
                        },
                        "tags": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "New list of tags"
                        },
                        "category": {
                            "type": "string",
                            "description": "New category path"
                        },
                        "wip": {
                            "type": "boolean",
                            "description": "New WIP status"
                        },
                        "message": {
                            "type": "string",
                            "description": "Commit message for the update"
                        }
                    },
                    "required": ["post_number"]
                }),
            },
            ToolDefinition {
                name: "posts_delete".to_string(),
                description: "Delete a post on esa.io.".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "post_number": {
                            "type": "integer",
                            "description": "The number of the post to delete"
                        }
                    },
                    "required": ["post_number"]
                }),
            },
        ]
    }
}
