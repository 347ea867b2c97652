//! Filesystem tools: read, write, and list files in the workspace.

use std::path::Path;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

/// Read the contents of a file.
pub struct ReadFile;

#[async_trait]
impl Tool for ReadFile {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file. Use this when you want to see what is inside a file."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path of the file, relative to the workspace"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value, workspace: &Path) -> anyhow::Result<String> {
        let path = args["path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'path' argument"))?;

        let content = tokio::fs::read_to_string(workspace.join(path)).await?;
        Ok(content)
    }
}

/// Create or overwrite a file.
pub struct WriteFile;

#[async_trait]
impl Tool for WriteFile {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file. The file is created if it doesn't exist and overwritten if it does."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path of the file to write to"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write to the file"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, args: Value, workspace: &Path) -> anyhow::Result<String> {
        let path = args["path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'path' argument"))?;
        let content = args["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'content' argument"))?;

        tokio::fs::write(workspace.join(path), content).await?;
        Ok(format!(
            "Successfully wrote {} bytes to {}",
            content.len(),
            path
        ))
    }
}

/// List the entries of a directory as a table.
pub struct ListFiles;

#[async_trait]
impl Tool for ListFiles {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List all files and directories in a specified path. Use this to explore the file system structure."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The directory to list, relative to the workspace. Defaults to the workspace root."
                }
            }
        })
    }

    async fn execute(&self, args: Value, workspace: &Path) -> anyhow::Result<String> {
        let path = args["path"].as_str().unwrap_or(".");
        let dir = workspace.join(path);

        let mut entries = Vec::new();
        let mut reader = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = reader.next_entry().await? {
            // Skip entries whose metadata is unreadable rather than failing
            // the whole listing.
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };

            let mut name = entry.file_name().to_string_lossy().into_owned();
            let kind = if metadata.is_dir() {
                name.push('/');
                "dir"
            } else if metadata.is_symlink() {
                "link"
            } else {
                "file"
            };

            let modified = metadata
                .modified()
                .map(|time| {
                    chrono::DateTime::<chrono::Local>::from(time)
                        .format("%b %d %H:%M")
                        .to_string()
                })
                .unwrap_or_else(|_| "-".to_string());

            entries.push((name, kind, format_size(metadata.len()), modified));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut result = String::new();
        result.push_str(&format!("Directory listing for: {}\n", path));
        result.push_str("Kind | Size | Modified | Name\n");
        result.push_str("-----|------|----------|-----\n");
        for (name, kind, size, modified) in entries {
            result.push_str(&format!(
                "{} | {} | {} | {}\n",
                kind, size, modified, name
            ));
        }

        Ok(result)
    }
}

/// Human-readable size with 1024-based units.
fn format_size(size: u64) -> String {
    const UNIT: u64 = 1024;
    if size < UNIT {
        return format!("{}", size);
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = size / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    format!("{:.1}{}", size as f64 / div as f64, "KMGTPE".as_bytes()[exp] as char)
}
