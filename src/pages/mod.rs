//! Server-rendered pages using Handlebars. Values are HTML-escaped on
//! interpolation, which matters here because most of what gets
//! rendered is model output.

use std::fmt;

use anyhow::Result;
use handlebars::{Handlebars, handlebars_helper};
use serde::Serialize;

// Natural numbering for `each` blocks
handlebars_helper!(inc: |v: i64| format!("{}", v + 1));

#[derive(Debug, Clone, Copy)]
pub enum Page {
    Index,
    Status,
    Error,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const HEADER_PARTIAL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{title}}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
<nav>
  <a href="/">Home</a>
  <a href="/status">Status</a>
  <a href="/api/health">Health</a>
</nav>
<main>
"#;

const FOOTER_PARTIAL: &str = r#"</main>
</body>
</html>
"#;

const INDEX_PAGE: &str = r#"{{> header title="Prompt Desk"}}
<h1>Prompt Desk</h1>

{{#if error}}
<div class="error">{{error}}</div>
{{/if}}
{{#if processing}}
<div class="processing">Processing...</div>
{{/if}}

<form action="/query" method="post" enctype="multipart/form-data">
  <label for="model">Model</label>
  <select id="model" name="model">
    {{#each models}}
    <option value="{{this}}"{{#if (eq this ../current_model)}} selected{{/if}}>{{this}}</option>
    {{/each}}
  </select>

  <label for="task">Task</label>
  <select id="task" name="task">
    <option value="">Choose a task</option>
    {{#each tasks}}
    <option value="{{key}}">{{label}}</option>
    {{/each}}
  </select>

  <label for="prompt">Prompt</label>
  <textarea id="prompt" name="prompt" rows="8" maxlength="{{max_prompt_chars}}"></textarea>

  <label for="inputFile">Input file</label>
  <input id="inputFile" type="file" name="inputFile">

  <button type="submit">Submit</button>
</form>

{{#if response}}
<section class="response">
  <h2>Response</h2>
  <pre>{{response}}</pre>
  <a href="/download-output">Download output</a>
</section>
{{/if}}

<section class="history">
  <h2>History</h2>
  {{#if history}}
  <form action="/clear-history" method="post">
    <button type="submit">Clear history</button>
  </form>
  <ol>
    {{#each history}}
    <li>
      <h3>#{{inc @index}} {{model}} <small>{{timestamp}}</small></h3>
      <details>
        <summary>Prompt</summary>
        <pre>{{prompt}}</pre>
      </details>
      <pre>{{response}}</pre>
    </li>
    {{/each}}
  </ol>
  {{else}}
  <p>No interactions yet.</p>
  {{/if}}
</section>
{{> footer}}
"#;

const STATUS_PAGE: &str = r#"{{> header title="Status"}}
<h1>Status</h1>

<table>
  <tr><th>Model server</th><td>{{provider}} ({{ollama_status}})</td></tr>
  <tr><th>Current model</th><td>{{current_model}}</td></tr>
  <tr><th>Available models</th><td>{{#each models}}{{this}}{{#unless @last}}, {{/unless}}{{/each}}</td></tr>
  <tr><th>History entries</th><td>{{history_count}}</td></tr>
  <tr><th>Processing</th><td>{{processing}}</td></tr>
</table>

<h2>System</h2>
<table>
  <tr><th>Version</th><td>{{system.version}}</td></tr>
  <tr><th>Platform</th><td>{{system.platform}}</td></tr>
  <tr><th>Uptime</th><td>{{system.uptime}}s</td></tr>
  <tr><th>Memory</th><td>{{#if system.memory}}{{system.memory}} bytes{{else}}unavailable{{/if}}</td></tr>
</table>
{{> footer}}
"#;

const ERROR_PAGE: &str = r#"{{> header title=title}}
<h1>{{title}}</h1>
<p>{{message}}</p>
{{#if suggestion}}
<p>{{suggestion}}</p>
{{/if}}
{{#if error}}
<pre class="error">{{error}}</pre>
{{/if}}
<a href="/">Return to the homepage</a>
{{> footer}}
"#;

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_helper("inc", Box::new(inc));
    registry
        .register_partial("header", HEADER_PARTIAL)
        .expect("Failed to register partial");
    registry
        .register_partial("footer", FOOTER_PARTIAL)
        .expect("Failed to register partial");
    registry
        .register_template_string(&Page::Index.to_string(), INDEX_PAGE)
        .expect("Failed to register template");
    registry
        .register_template_string(&Page::Status.to_string(), STATUS_PAGE)
        .expect("Failed to register template");
    registry
        .register_template_string(&Page::Error.to_string(), ERROR_PAGE)
        .expect("Failed to register template");
    registry
}

pub fn render<T: Serialize>(registry: &Handlebars, page: Page, data: &T) -> Result<String> {
    Ok(registry.render(&page.to_string(), data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_escapes_model_output() {
        let html = render(
            &templates(),
            Page::Error,
            &json!({
                "title": "500 - Server Error",
                "message": "<script>alert(1)</script>",
                "suggestion": null,
                "error": null,
            }),
        )
        .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn it_numbers_history_from_one() {
        let html = render(
            &templates(),
            Page::Index,
            &json!({
                "models": ["llama2", "mistral"],
                "current_model": "mistral",
                "tasks": [{"key": "generate_code", "label": "Generate code"}],
                "max_prompt_chars": 5000,
                "response": "",
                "processing": false,
                "error": "",
                "history": [
                    {"model": "mistral", "prompt": "p", "response": "r", "timestamp": "t"}
                ],
            }),
        )
        .unwrap();

        assert!(html.contains("#1 mistral"));
        assert!(html.contains(r#"<option value="mistral" selected>"#));
        assert!(html.contains(r#"<option value="llama2">"#));
    }
}
