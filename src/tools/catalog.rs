//! Static catalogue of tool definitions.

use serde::Serialize;
use serde_json::{Map, Value, json};

/// Name, description, and JSON Schema of one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Tool name used when calling it.
    pub name: &'static str,
    /// Human-readable summary.
    pub description: &'static str,
    /// JSON Schema of the arguments object.
    pub input_schema: Value,
}

const OPTIONAL_VAULT: &str = "Optional vault name. Uses active vault if not specified.";
const PERIODS: [&str; 5] = ["daily", "weekly", "monthly", "quarterly", "yearly"];
const PERIOD_DATE: &str = "Specific date for the note (ISO 8601 format YYYY-MM-DD). If not provided, uses current date";

fn tool(
    name: &'static str,
    description: &'static str,
    properties: &[(&str, Value)],
    required: &[&str],
) -> ToolDefinition {
    let mut props = Map::new();
    for (key, schema) in properties {
        props.insert((*key).to_owned(), schema.clone());
    }
    ToolDefinition {
        name,
        description,
        input_schema: json!({
            "type": "object",
            "properties": props,
            "required": required,
        }),
    }
}

fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn non_empty_string(description: &str) -> Value {
    json!({ "type": "string", "minLength": 1, "description": description })
}

fn boolean(description: &str) -> Value {
    json!({ "type": "boolean", "description": description })
}

fn vault() -> (&'static str, Value) {
    ("vault", string(OPTIONAL_VAULT))
}

fn period() -> (&'static str, Value) {
    (
        "period",
        json!({ "type": "string", "enum": PERIODS, "description": "The period type for the note" }),
    )
}

fn date() -> (&'static str, Value) {
    ("date", string(PERIOD_DATE))
}

fn line_edits() -> [(&'static str, Value); 3] {
    let line = json!({ "type": "integer", "minimum": 0 });
    [
        (
            "insertions",
            json!({
                "type": "array",
                "description": "Lines to insert at specific positions",
                "items": {
                    "type": "object",
                    "properties": {
                        "line": line,
                        "content": { "type": "string" }
                    },
                    "required": ["line", "content"]
                }
            }),
        ),
        (
            "deletions",
            json!({
                "type": "array",
                "description": "Line ranges to delete (0-based, inclusive)",
                "items": {
                    "type": "object",
                    "properties": { "startLine": line, "endLine": line },
                    "required": ["startLine", "endLine"]
                }
            }),
        ),
        (
            "replacements",
            json!({
                "type": "array",
                "description": "Line ranges to replace with new content (0-based, inclusive)",
                "items": {
                    "type": "object",
                    "properties": {
                        "startLine": line,
                        "endLine": line,
                        "content": { "type": "string" }
                    },
                    "required": ["startLine", "endLine", "content"]
                }
            }),
        ),
    ]
}

fn vault_management() -> Vec<ToolDefinition> {
    vec![
        tool(
            "list_vaults",
            "List all configured Obsidian vaults with their status and details",
            &[],
            &[],
        ),
        tool(
            "get_vault_info",
            "Get detailed information about a specific vault including connection status",
            &[("vault", string("Name of the vault to get information about"))],
            &["vault"],
        ),
        tool(
            "set_active_vault",
            "Switch to a different vault for subsequent operations",
            &[("vault", string("Name of the vault to set as active"))],
            &["vault"],
        ),
        tool(
            "add_vault",
            "Add a new Obsidian vault configuration with API key and connection details",
            &[
                ("name", string("Unique name for the vault")),
                ("apiKey", string("API key for the Obsidian Local REST API")),
                (
                    "baseUrl",
                    string("Base URL for the vault API (default: http://localhost:27123)"),
                ),
                ("displayName", string("Display name for the vault")),
                (
                    "setAsActive",
                    boolean("Set this vault as the active vault (default: false)"),
                ),
            ],
            &["name", "apiKey"],
        ),
        tool(
            "remove_vault",
            "Remove a vault configuration from the system",
            &[("vault", string("Name of the vault to remove"))],
            &["vault"],
        ),
        tool(
            "get_active_vault",
            "Get information about the currently active vault",
            &[],
            &[],
        ),
    ]
}

fn active_file() -> Vec<ToolDefinition> {
    let [insertions, deletions, replacements] = line_edits();
    vec![
        tool(
            "get_active_file",
            "Retrieve the content of the currently active file in Obsidian",
            &[vault()],
            &[],
        ),
        tool(
            "append_to_active_file",
            "Append content to the currently active file in Obsidian",
            &[("content", string("Content to append to the active file")), vault()],
            &["content"],
        ),
        tool(
            "replace_active_file",
            "Replace the entire content of the currently active file in Obsidian",
            &[("content", string("New content for the active file")), vault()],
            &["content"],
        ),
        tool(
            "patch_active_file",
            "Apply selective modifications to the currently active file (insertions, deletions, replacements)",
            &[insertions, deletions, replacements, vault()],
            &[],
        ),
        tool(
            "delete_active_file",
            "Delete the currently active file in Obsidian",
            &[vault()],
            &[],
        ),
    ]
}

fn vault_files() -> Vec<ToolDefinition> {
    let [insertions, deletions, replacements] = line_edits();
    let directory = string("Directory path to list (defaults to vault root)");
    vec![
        tool(
            "get_file",
            "Retrieve content of a specific file from the vault by path",
            &[
                ("path", non_empty_string("Path to the file relative to vault root")),
                vault(),
            ],
            &["path"],
        ),
        tool(
            "create_file",
            "Create a new file with specified content (or replace existing)",
            &[
                ("path", non_empty_string("Path where the file should be created")),
                ("content", string("Content to write to the file")),
                vault(),
            ],
            &["path", "content"],
        ),
        tool(
            "append_to_file",
            "Append content to an existing file",
            &[
                ("path", non_empty_string("Path to the file to append to")),
                ("content", non_empty_string("Content to append to the file")),
                vault(),
            ],
            &["path", "content"],
        ),
        tool(
            "replace_file",
            "Replace entire content of an existing file",
            &[
                ("path", non_empty_string("Path to the file to replace")),
                ("content", string("New content for the file")),
                vault(),
            ],
            &["path", "content"],
        ),
        tool(
            "patch_file",
            "Apply specific line-based modifications to a file",
            &[
                ("path", non_empty_string("Path to the file to patch")),
                insertions,
                deletions,
                replacements,
                vault(),
            ],
            &["path"],
        ),
        tool(
            "delete_file",
            "Delete a specific file from the vault",
            &[
                ("path", non_empty_string("Path to the file to delete")),
                vault(),
            ],
            &["path"],
        ),
        tool(
            "list_vault_files",
            "List files in the vault root or a specific directory path",
            &[("path", directory.clone()), vault()],
            &[],
        ),
        tool(
            "list_directory",
            "List contents of a specific directory in the vault",
            &[("path", directory), vault()],
            &[],
        ),
    ]
}

fn search() -> Vec<ToolDefinition> {
    vec![
        tool(
            "search_vault",
            "Advanced search using Dataview DQL or JsonLogic queries. Supports 'dataview' for TABLE-type Dataview queries, and 'jsonlogic' for JsonLogic queries with operators like 'glob' and 'regexp'.",
            &[
                (
                    "query",
                    string("The search query. For Dataview, use TABLE-type syntax. For JsonLogic, use a JSON string with operators."),
                ),
                (
                    "queryType",
                    json!({
                        "type": "string",
                        "enum": ["dataview", "jsonlogic"],
                        "default": "dataview",
                        "description": "Type of query: 'dataview' for Dataview DQL queries, 'jsonlogic' for JsonLogic queries"
                    }),
                ),
                vault(),
            ],
            &["query"],
        ),
        tool(
            "simple_search",
            "Basic text search across all files in the vault. Searches file content and returns matching files with context.",
            &[
                ("query", string("The search term or phrase to find in vault files")),
                (
                    "contextLength",
                    json!({
                        "type": "integer",
                        "minimum": 0,
                        "description": "Number of characters of context to include around matches (default determined by server)"
                    }),
                ),
                vault(),
            ],
            &["query"],
        ),
    ]
}

fn periodic_notes() -> Vec<ToolDefinition> {
    vec![
        tool(
            "get_periodic_note",
            "Retrieve content from a daily, weekly, monthly, quarterly, or yearly note",
            &[period(), date(), vault()],
            &["period"],
        ),
        tool(
            "append_to_periodic_note",
            "Append content to a daily, weekly, monthly, quarterly, or yearly note",
            &[
                period(),
                ("content", string("Content to append to the periodic note")),
                date(),
                vault(),
            ],
            &["period", "content"],
        ),
        tool(
            "replace_periodic_note",
            "Replace entire content of a daily, weekly, monthly, quarterly, or yearly note",
            &[
                period(),
                (
                    "content",
                    string("New content to replace the entire periodic note with"),
                ),
                date(),
                vault(),
            ],
            &["period", "content"],
        ),
        tool(
            "patch_periodic_note",
            "Modify specific sections of a daily, weekly, monthly, quarterly, or yearly note using heading, block reference, or frontmatter operations",
            &[
                period(),
                (
                    "operation",
                    json!({
                        "type": "string",
                        "enum": ["append", "prepend", "replace"],
                        "description": "Type of patch operation to perform"
                    }),
                ),
                (
                    "targetType",
                    json!({
                        "type": "string",
                        "enum": ["heading", "block", "frontmatter"],
                        "description": "Type of target (heading, block reference, or frontmatter field)"
                    }),
                ),
                (
                    "target",
                    string("Target identifier (heading name, block reference ID, or frontmatter field name)"),
                ),
                (
                    "content",
                    string("Content to append, prepend, or replace with"),
                ),
                (
                    "createTargetIfMissing",
                    boolean("Create the target if it doesn't exist (useful for frontmatter fields)"),
                ),
                date(),
                vault(),
            ],
            &["period", "operation", "targetType", "target", "content"],
        ),
        tool(
            "delete_periodic_note",
            "Delete a daily, weekly, monthly, quarterly, or yearly note",
            &[period(), date(), vault()],
            &["period"],
        ),
    ]
}

fn commands_and_system() -> Vec<ToolDefinition> {
    vec![
        tool(
            "list_commands",
            "List all available Obsidian commands in the vault",
            &[vault()],
            &[],
        ),
        tool(
            "execute_command",
            "Execute a specific Obsidian command by its ID",
            &[
                (
                    "commandId",
                    string("The ID of the command to execute (e.g., 'editor:save-file')"),
                ),
                vault(),
            ],
            &["commandId"],
        ),
        tool(
            "open_file",
            "Open a specific file in the Obsidian interface",
            &[
                (
                    "path",
                    non_empty_string("Path to the file to open relative to vault root"),
                ),
                (
                    "newLeaf",
                    boolean("Whether to open the file in a new leaf/tab (defaults to false)"),
                ),
                vault(),
            ],
            &["path"],
        ),
        tool(
            "get_server_info",
            "Get basic server status and details from the Obsidian Local REST API",
            &[vault()],
            &[],
        ),
        tool(
            "get_api_certificate",
            "Retrieve the API certificate from the Obsidian Local REST API server",
            &[vault()],
            &[],
        ),
    ]
}

/// Returns every tool definition in catalogue order.
#[must_use]
pub fn definitions() -> Vec<ToolDefinition> {
    let mut all = vault_management();
    all.extend(active_file());
    all.extend(vault_files());
    all.extend(search());
    all.extend(periodic_notes());
    all.extend(commands_and_system());
    all
}
