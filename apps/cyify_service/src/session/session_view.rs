use uuid::Uuid;

use super::session_state::{NoticeLevel, SessionState};
use crate::credentials::CredentialSource;

pub const TITLE: &str = "CYify Text Transformer";
pub const DOWNLOAD_FILE_NAME: &str = "emotional_text.txt";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; display: flex; min-height: 100vh; }
aside { width: 18rem; padding: 1.5rem; background: #f0f2f6; }
main { flex: 1; padding: 1.5rem 3rem; }
textarea { width: 100%; box-sizing: border-box; font: inherit; }
.notice { padding: .75rem 1rem; border-radius: .5rem; margin: 1rem 0; }
.warning { background: #fffce7; color: #926c05; }
.error { background: #ffecec; color: #7d353b; }
.success { background: #ecfff0; color: #177233; }
.busy { color: #555; font-style: italic; }
"#;

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn page_path(session_id: Uuid) -> String {
    format!("/sessions/{}", session_id)
}

pub fn render_page(session_id: Uuid, state: &SessionState) -> String {
    let base = page_path(session_id);
    // Keep polling while another request is waiting on the model.
    let refresh = if state.is_busy() {
        r#"<meta http-equiv="refresh" content="2">"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
{refresh}
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<aside>
{sidebar}
</aside>
<main>
<h1>{title}</h1>
<p>Transform your text into flowery, emotionally expressive writing with dramatic single-word lines.</p>
<form method="post" action="{base}/input" id="transform-form">
<label for="text">Your text:</label>
<textarea id="text" name="text" rows="10" placeholder="Enter your text here..."{disabled}>{input}</textarea>
<p>
<button type="submit" formaction="{base}/clear"{disabled}>Clear</button>
<button type="submit" formaction="{base}/transform"{disabled}>Transform Text</button>
</p>
</form>
{busy}
{notice}
{output}
<hr>
</main>
</body>
</html>
"#,
        refresh = refresh,
        title = TITLE,
        style = STYLE,
        sidebar = render_sidebar(&base, state),
        base = base,
        disabled = if state.is_busy() { " disabled" } else { "" },
        input = escape_html(&state.input_text),
        busy = render_busy(state),
        notice = render_notice(state),
        output = render_output(&base, state),
    )
}

fn render_sidebar(base: &str, state: &SessionState) -> String {
    match state.credential.source {
        CredentialSource::Environment | CredentialSource::SecretStore => format!(
            r#"<div class="notice success">{}</div>"#,
            state.credential.source.describe()
        ),
        CredentialSource::UserEntry => {
            let saved = if state.api_key().is_some() {
                r#"<p class="notice success">API key saved for this session.</p>"#
            } else {
                ""
            };

            format!(
                r#"<h2>Settings</h2>
<form method="post" action="{base}/credential">
<label for="api_key">Enter your OpenAI API key</label>
<input type="password" id="api_key" name="api_key" autocomplete="off">
<button type="submit">Save</button>
</form>
{saved}
<p><small>{caption}</small></p>
<p class="notice">Get your API key from <a href="https://platform.openai.com/api-keys">https://platform.openai.com/api-keys</a></p>"#,
                base = base,
                saved = saved,
                caption = CredentialSource::UserEntry.describe(),
            )
        }
    }
}

fn render_busy(state: &SessionState) -> &'static str {
    if state.is_busy() {
        r#"<p class="busy">Transforming your text...</p>"#
    } else {
        ""
    }
}

fn render_notice(state: &SessionState) -> String {
    match &state.notice {
        Some(notice) => {
            let class = match notice.level {
                NoticeLevel::Warning => "warning",
                NoticeLevel::Error => "error",
            };
            format!(
                r#"<div class="notice {}">{}</div>"#,
                class,
                escape_html(&notice.message)
            )
        }
        None => String::new(),
    }
}

fn render_output(base: &str, state: &SessionState) -> String {
    if state.transformed_text.is_empty() {
        return String::new();
    }

    format!(
        r#"<h2>Transformed Text:</h2>
<textarea id="output" rows="14" readonly>{}</textarea>
<p><a href="{}/download" download="{}">Download Transformed Text</a></p>"#,
        escape_html(&state.transformed_text),
        base,
        DOWNLOAD_FILE_NAME
    )
}

pub fn render_not_found() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<h1>{title}</h1>
<p>This session has ended. <a href="/">Start a new one</a>.</p>
</body>
</html>
"#,
        title = TITLE
    )
}
