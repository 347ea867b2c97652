//! Documentation lookup tool: fetch and extract crate docs from docs.rs.

use std::path::Path;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

/// Fetch a crate's documentation page and return its readable text.
pub struct SearchCrateDocs;

#[async_trait]
impl Tool for SearchCrateDocs {
    fn name(&self) -> &str {
        "search_crate_docs"
    }

    fn description(&self) -> &str {
        "Search crate documentation for information. Use this when you need to find library features, \
         API functions, or crate-specific information. Call this with the name of the crate to look up."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "crate_name": {
                    "type": "string",
                    "description": "The name of the crate to look up"
                }
            },
            "required": ["crate_name"]
        })
    }

    async fn execute(&self, args: Value, _workspace: &Path) -> anyhow::Result<String> {
        let crate_name = args["crate_name"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'crate_name' argument"))?;

        let url = format!("https://docs.rs/{}", urlencoding::encode(crate_name));

        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; AgentRelay/1.0)")
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let response = client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "failed to fetch documentation for {}: status {}",
                crate_name,
                status
            ));
        }

        let html = response.text().await?;
        let text = extract_text_from_html(&html);

        if text.trim().is_empty() {
            return Ok(format!("No documentation found for crate: {}", crate_name));
        }

        // Truncate if too long
        if text.len() > 20000 {
            let mut end = 20000;
            while end > 0 && !text.is_char_boundary(end) {
                end -= 1;
            }
            Ok(format!(
                "{}... [content truncated, showing first 20000 chars]",
                &text[..end]
            ))
        } else {
            Ok(text)
        }
    }
}

/// Extract readable text from HTML (simple approach).
fn extract_text_from_html(html: &str) -> String {
    let mut text = html.to_string();

    // Remove scripts
    while let Some(start) = text.find("<script") {
        if let Some(end) = text[start..].find("</script>") {
            text = format!("{}{}", &text[..start], &text[start + end + 9..]);
        } else {
            break;
        }
    }

    // Remove styles
    while let Some(start) = text.find("<style") {
        if let Some(end) = text[start..].find("</style>") {
            text = format!("{}{}", &text[..start], &text[start + end + 8..]);
        } else {
            break;
        }
    }

    // Remove all tags
    let mut result = String::new();
    let mut in_tag = false;

    for c in text.chars() {
        if c == '<' {
            in_tag = true;
        } else if c == '>' {
            in_tag = false;
            result.push(' ');
        } else if !in_tag {
            result.push(c);
        }
    }

    let result: String = result.split_whitespace().collect::<Vec<_>>().join(" ");

    html_decode(&result)
}

/// Basic HTML entity decoding.
fn html_decode(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}
