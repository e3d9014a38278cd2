//! Static portfolio content.
//!
//! A read-only payload supplied at startup: the header profile and, per
//! section, a title, an inline-markup summary and a list of detail blocks
//! for the 2D page. The default payload is embedded in the binary; a JSON
//! file can replace it.
//!
//! Summaries and paragraphs may carry a small inline subset of HTML
//! (`<a href>`, `<strong>`/`<b>`, `<em>`/`<i>`, `<br>`), parsed into `Span`s.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use scraper::{ElementRef, Html, Node};
use serde::Deserialize;

use crate::navigation::Section;

const EMBEDDED: &str = include_str!("../assets/content.json");

/// Error during content loading
#[derive(Debug)]
pub struct ContentError {
    pub message: String,
    pub phase: &'static str,
}

impl ContentError {
    fn new(phase: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            phase,
        }
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

impl std::error::Error for ContentError {}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkSpec {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
    /// Downloadable resume document, relative to the content directory.
    #[serde(default)]
    pub resume: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailBlock {
    Paragraph {
        text: String,
    },
    Project {
        title: String,
        description: String,
        #[serde(default)]
        tech: Vec<String>,
        #[serde(default)]
        links: Vec<LinkSpec>,
        /// Image path relative to the content directory.
        #[serde(default)]
        thumbnail: Option<String>,
    },
    SkillCategory {
        name: String,
        skills: Vec<String>,
    },
    Contact {
        email: String,
        #[serde(default)]
        links: Vec<LinkSpec>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionContent {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub details: Vec<DetailBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentPayload {
    pub profile: Profile,
    pub sections: BTreeMap<Section, SectionContent>,
    /// Directory relative paths resolve against. Not part of the JSON.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl ContentPayload {
    /// The payload compiled into the binary.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_json_str(EMBEDDED)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        serde_json::from_str(json).map_err(|e| ContentError::new("parse", e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ContentError::new("read", format!("{}: {}", path.display(), e)))?;
        let mut payload = Self::from_json_str(&json)?;
        payload.base_dir = path.parent().map(Path::to_path_buf);
        Ok(payload)
    }

    pub fn section(&self, section: Section) -> Option<&SectionContent> {
        self.sections.get(&section)
    }

    /// Check that every section in `layout` has content and every link is
    /// usable.
    pub fn validate(&self, layout: &[Section]) -> Result<(), ContentError> {
        for section in layout {
            if !self.sections.contains_key(section) {
                return Err(ContentError::new(
                    "validate",
                    format!("missing content for section '{}'", section.id()),
                ));
            }
        }

        for link in &self.profile.links {
            validate_href(&link.href)?;
        }
        if let Some(resume) = &self.profile.resume {
            if resume.trim().is_empty() {
                return Err(ContentError::new("validate", "empty resume path"));
            }
        }

        for (section, content) in &self.sections {
            for href in inline_hrefs(&content.summary) {
                validate_href(&href).map_err(|e| in_section(*section, e))?;
            }
            for block in &content.details {
                let links: &[LinkSpec] = match block {
                    DetailBlock::Project { links, .. } | DetailBlock::Contact { links, .. } => {
                        links
                    }
                    DetailBlock::Paragraph { text } => {
                        for href in inline_hrefs(text) {
                            validate_href(&href).map_err(|e| in_section(*section, e))?;
                        }
                        &[]
                    }
                    DetailBlock::SkillCategory { .. } => &[],
                };
                for link in links {
                    validate_href(&link.href).map_err(|e| in_section(*section, e))?;
                }
            }
        }
        Ok(())
    }

    /// Thumbnail paths the loading phase waits for, resolved against
    /// `base_dir`.
    pub fn asset_paths(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        for content in self.sections.values() {
            for block in &content.details {
                if let DetailBlock::Project {
                    thumbnail: Some(rel),
                    ..
                } = block
                {
                    out.push(self.resolve(rel));
                }
            }
        }
        out
    }

    /// Resolve a content-relative path.
    pub fn resolve(&self, rel: &str) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.join(rel),
            None => PathBuf::from(rel),
        }
    }
}

fn in_section(section: Section, e: ContentError) -> ContentError {
    ContentError::new(e.phase, format!("{}: {}", section.id(), e.message))
}

/// Links must be absolute (`https:`, `mailto:`, ...).
fn validate_href(href: &str) -> Result<(), ContentError> {
    url::Url::parse(href)
        .map(|_| ())
        .map_err(|e| ContentError::new("validate", format!("invalid link '{}': {}", href, e)))
}

// ─── Inline markup ───────────────────────────────────────────────────────────

/// A run of inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Strong(String),
    Emphasis(String),
    Link { text: String, href: String },
    LineBreak,
}

/// Parse an inline-markup fragment into spans. Unknown tags are flattened
/// into their text.
pub fn parse_inline(markup: &str) -> Vec<Span> {
    let fragment = Html::parse_fragment(markup);
    let mut spans = Vec::new();
    collect_spans(fragment.root_element(), &mut spans);
    merge_text(spans)
}

fn collect_spans(el: ElementRef<'_>, out: &mut Vec<Span>) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => {
                let s = collapse_whitespace(&t.text);
                if !s.is_empty() {
                    out.push(Span::Text(s));
                }
            }
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let text = || collapse_whitespace(&child_el.text().collect::<String>());
                match child_el.value().name() {
                    "a" => match child_el.value().attr("href") {
                        Some(href) => out.push(Span::Link {
                            text: text(),
                            href: href.to_string(),
                        }),
                        None => out.push(Span::Text(text())),
                    },
                    "strong" | "b" => out.push(Span::Strong(text())),
                    "em" | "i" => out.push(Span::Emphasis(text())),
                    "br" => out.push(Span::LineBreak),
                    "script" | "style" => {}
                    _ => collect_spans(child_el, out),
                }
            }
            _ => {}
        }
    }
}

/// Every `href` in an inline-markup fragment.
pub fn inline_hrefs(markup: &str) -> Vec<String> {
    parse_inline(markup)
        .into_iter()
        .filter_map(|s| match s {
            Span::Link { href, .. } => Some(href),
            _ => None,
        })
        .collect()
}

/// Plain text of a fragment, markup stripped.
pub fn plain_text(markup: &str) -> String {
    parse_inline(markup)
        .into_iter()
        .map(|s| match s {
            Span::Text(t) | Span::Strong(t) | Span::Emphasis(t) => t,
            Span::Link { text, .. } => text,
            Span::LineBreak => "\n".to_string(),
        })
        .collect()
}

/// Collapse whitespace runs to one space, keeping a single leading /
/// trailing space so neighbouring spans stay separated.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(c);
            in_ws = false;
        }
    }
    if out.trim().is_empty() {
        String::new()
    } else {
        out
    }
}

fn merge_text(spans: Vec<Span>) -> Vec<Span> {
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if let (Some(Span::Text(prev)), Span::Text(next)) = (out.last_mut(), &span) {
            prev.push_str(next);
            continue;
        }
        out.push(span);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_payload_is_valid() {
        let payload = ContentPayload::embedded().expect("embedded content parses");
        payload.validate(&Section::ALL).expect("embedded content validates");
        assert_eq!(payload.sections.len(), 4);
        assert_eq!(payload.section(Section::Contact).map(|c| c.title.as_str()), Some("Contact"));
    }

    #[test]
    fn inline_links_become_link_spans() {
        let spans = parse_inline(
            "Reach me at <a href='mailto:me@example.com'>me@example.com</a> or on \
             <a href=\"https://example.com/in\">LinkedIn</a>.",
        );
        assert_eq!(
            spans,
            vec![
                Span::Text("Reach me at ".into()),
                Span::Link {
                    text: "me@example.com".into(),
                    href: "mailto:me@example.com".into()
                },
                Span::Text(" or on ".into()),
                Span::Link {
                    text: "LinkedIn".into(),
                    href: "https://example.com/in".into()
                },
                Span::Text(".".into()),
            ]
        );
    }

    #[test]
    fn emphasis_and_unknown_tags() {
        let spans = parse_inline("<strong>bold</strong> and <span>plain <em>it</em></span>");
        assert_eq!(
            spans,
            vec![
                Span::Strong("bold".into()),
                Span::Text(" and plain ".into()),
                Span::Emphasis("it".into()),
            ]
        );
    }

    #[test]
    fn plain_text_strips_markup() {
        assert_eq!(
            plain_text("Hi <a href='https://x.example'>there</a>\n\n  friend"),
            "Hi there friend"
        );
    }

    #[test]
    fn invalid_link_is_rejected() {
        let json = r#"{
            "profile": { "name": "N", "tagline": "T",
                         "links": [ { "label": "bad", "href": "not a url" } ] },
            "sections": { "contact": { "title": "C", "summary": "s" } }
        }"#;
        let payload = ContentPayload::from_json_str(json).unwrap();
        let err = payload.validate(&[Section::Contact]).unwrap_err();
        assert_eq!(err.phase, "validate");
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn invalid_inline_link_names_section() {
        let json = r#"{
            "profile": { "name": "N", "tagline": "T" },
            "sections": { "skills": { "title": "S", "summary": "<a href='/relative'>x</a>" } }
        }"#;
        let payload = ContentPayload::from_json_str(json).unwrap();
        let err = payload.validate(&[Section::Skills]).unwrap_err();
        assert!(err.message.starts_with("skills:"));
    }

    #[test]
    fn missing_section_is_rejected() {
        let json = r#"{
            "profile": { "name": "N", "tagline": "T" },
            "sections": { "projects": { "title": "P", "summary": "s" } }
        }"#;
        let payload = ContentPayload::from_json_str(json).unwrap();
        assert!(payload.validate(&[Section::Projects]).is_ok());
        let err = payload.validate(&[Section::Projects, Section::Skills]).unwrap_err();
        assert!(err.message.contains("skills"));
    }

    #[test]
    fn malformed_json_reports_parse_phase() {
        let err = ContentPayload::from_json_str("{ nope").unwrap_err();
        assert_eq!(err.phase, "parse");
    }

    #[test]
    fn thumbnails_resolve_against_base_dir() {
        let json = r#"{
            "profile": { "name": "N", "tagline": "T" },
            "sections": { "projects": { "title": "P", "summary": "s", "details": [
                { "kind": "project", "title": "A", "description": "d", "thumbnail": "img/a.png" }
            ] } }
        }"#;
        let mut payload = ContentPayload::from_json_str(json).unwrap();
        assert_eq!(payload.asset_paths(), vec![PathBuf::from("img/a.png")]);
        payload.base_dir = Some(PathBuf::from("/srv/site"));
        assert_eq!(payload.asset_paths(), vec![PathBuf::from("/srv/site/img/a.png")]);
    }
}
