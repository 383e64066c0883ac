//! Pure page rendering: markdown article pages and listing pages.
//!
//! No I/O happens here. The only failure mode is malformed input, which
//! callers treat as fatal to a publish attempt.

use pulldown_cmark::{Options, Parser, html};
use thiserror::Error;
use time::OffsetDateTime;

/// Error type for rendering operations
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("article title is empty")]
    EmptyTitle,
}

/// Metadata shown in the header of a collection listing page
#[derive(Debug, Clone)]
pub struct ListingMeta {
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
}

/// One published article on a listing page
#[derive(Debug, Clone)]
pub struct ListingEntry {
    pub title: String,
    pub cid: String,
    /// Source text used for the preview snippet
    pub body: String,
    pub created_at: OffsetDateTime,
}

const PREVIEW_CHARS: usize = 150;

/// Derive a filesystem-safe artifact name from a title. Characters outside
/// ASCII alphanumerics and CJK ideographs become underscores. Cosmetic
/// only; never used as an identity key.
pub fn artifact_name(title: &str) -> String {
    let safe: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || ('\u{4e00}'..='\u{9fa5}').contains(&c) {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}.html")
}

/// Escape text for embedding in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

fn markdown_to_html(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(body, options);
    let mut out = String::with_capacity(body.len() * 2);
    html::push_html(&mut out, parser);
    out
}

fn format_date(ts: OffsetDateTime) -> String {
    format!("{:04}-{:02}-{:02}", ts.year(), ts.month() as u8, ts.day())
}

fn format_datetime(ts: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        ts.year(),
        ts.month() as u8,
        ts.day(),
        ts.hour(),
        ts.minute()
    )
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

/// Render a standalone article page: escaped title, creation date, and the
/// markdown body converted to HTML, with an embedded stylesheet.
pub fn render_article(
    title: &str,
    body: &str,
    created_at: OffsetDateTime,
) -> Result<String, RenderError> {
    if title.trim().is_empty() {
        return Err(RenderError::EmptyTitle);
    }

    let content = markdown_to_html(body);
    let title = escape_html(title);
    let date = format_datetime(created_at);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>{ARTICLE_STYLES}</style>
</head>
<body>
  <div class="container">
    <article class="article">
      <header class="article-header">
        <h1 class="article-title">{title}</h1>
        <div class="article-meta"><span class="meta-item">{date}</span></div>
      </header>
      <div class="article-content">
{content}
      </div>
      <footer class="footer">
        <p>Published on a content-addressed network via permapress</p>
      </footer>
    </article>
  </div>
</body>
</html>"#
    ))
}

/// Render a listing page over published entries. Links point at
/// `gateway + cid`. `meta` carries collection name/description/author; a
/// listing without meta is the default "All articles" index.
pub fn render_listing(
    entries: &[ListingEntry],
    gateway: &str,
    meta: Option<&ListingMeta>,
) -> String {
    let (name, description, author) = match meta {
        Some(meta) => (
            meta.name.as_str(),
            meta.description.as_deref(),
            meta.author.as_deref(),
        ),
        None => ("All articles", None, None),
    };

    let cards = if entries.is_empty() {
        r#"<div class="empty">No published articles yet</div>"#.to_string()
    } else {
        entries
            .iter()
            .map(|entry| {
                format!(
                    r#"<a href="{gateway}{cid}" class="article-card">
  <h2>{title}</h2>
  <div class="meta">{date}</div>
  <p class="preview">{preview}</p>
</a>"#,
                    cid = entry.cid,
                    title = escape_html(&entry.title),
                    date = format_date(entry.created_at),
                    preview = escape_html(&truncate_chars(&entry.body, PREVIEW_CHARS)),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let desc_html = description
        .map(|d| format!(r#"<p class="listing-desc">{}</p>"#, escape_html(d)))
        .unwrap_or_default();
    let author_html = author
        .map(|a| format!(r#"<span class="author">{}</span>"#, escape_html(a)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>{LISTING_STYLES}</style>
</head>
<body>
  <div class="container">
    <header class="header">
      <h1>{title}</h1>
      {desc_html}
      {author_html}
      <p class="count">{count} articles</p>
    </header>
    <div class="article-list">
{cards}
    </div>
    <footer class="footer">
      <p>Published on a content-addressed network via permapress</p>
    </footer>
  </div>
</body>
</html>"#,
        title = escape_html(name),
        count = entries.len(),
    )
}

const ARTICLE_STYLES: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Noto Sans SC', sans-serif;
  background: linear-gradient(135deg, #f8fafc 0%, #e2e8f0 100%);
  min-height: 100vh; color: #374151; line-height: 1.8;
}
.container { max-width: 800px; margin: 0 auto; padding: 40px 20px; }
.article { background: #fff; border-radius: 16px; padding: 48px; box-shadow: 0 4px 24px rgba(0,0,0,0.08); }
.article-header { margin-bottom: 32px; padding-bottom: 24px; border-bottom: 1px solid #e5e7eb; }
.article-title { font-size: 32px; font-weight: 700; color: #1a1a2e; line-height: 1.4; margin-bottom: 16px; }
.article-meta { font-size: 13px; color: #6b7280; }
.article-content { font-size: 16px; }
.article-content h1, .article-content h2, .article-content h3 {
  margin-top: 28px; margin-bottom: 16px; font-weight: 600; color: #1a1a2e; line-height: 1.4;
}
.article-content h1, .article-content h2 { border-bottom: 1px solid #e5e7eb; padding-bottom: 0.3em; }
.article-content p { margin: 0 0 16px 0; }
.article-content a { color: #D4B503; text-decoration: none; }
.article-content a:hover { text-decoration: underline; }
.article-content pre { background: #f9fafb; border-radius: 8px; padding: 16px; overflow-x: auto; margin-bottom: 16px; }
.article-content code { font-family: ui-monospace, monospace; font-size: 14px; }
.article-content blockquote { border-left: 4px solid #e5e7eb; padding-left: 16px; color: #6b7280; margin-bottom: 16px; }
.article-content ul, .article-content ol { padding-left: 24px; margin-bottom: 16px; }
.footer { margin-top: 40px; padding-top: 20px; border-top: 1px solid #e5e7eb; font-size: 13px; color: #6b7280; text-align: center; }
"#;

const LISTING_STYLES: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Noto Sans SC', sans-serif;
  background: linear-gradient(135deg, #f8fafc 0%, #e2e8f0 100%);
  min-height: 100vh; color: #374151; line-height: 1.6;
}
.container { max-width: 900px; margin: 0 auto; padding: 40px 20px; }
.header { text-align: center; margin-bottom: 40px; }
.header h1 { font-size: 28px; color: #1a1a2e; }
.listing-desc { margin-top: 12px; color: #6b7280; font-size: 14px; }
.author { display: inline-block; margin-top: 8px; font-size: 13px; color: #6b7280; background: #f9fafb; padding: 4px 12px; border-radius: 20px; }
.count { margin-top: 12px; font-size: 13px; color: #6b7280; }
.article-list { display: flex; flex-direction: column; gap: 16px; }
.article-card {
  display: block; background: #fff; border-radius: 12px; padding: 24px;
  box-shadow: 0 2px 12px rgba(0,0,0,0.06); text-decoration: none; color: inherit;
}
.article-card:hover { box-shadow: 0 4px 20px rgba(0,0,0,0.1); }
.article-card h2 { font-size: 20px; color: #1a1a2e; margin-bottom: 8px; }
.article-card .meta { font-size: 13px; color: #6b7280; margin-bottom: 8px; }
.article-card .preview { font-size: 14px; color: #6b7280; }
.empty { text-align: center; color: #6b7280; padding: 60px 0; }
.footer { margin-top: 40px; font-size: 13px; color: #6b7280; text-align: center; }
"#;
