//! Structured blog post bodies.
//!
//! DESIGN
//! ======
//! Post bodies arrive as editor blocks (`{format, vlog, blocks: [...]}`), as
//! the older `{introduction, sections}` layout, or as plain text. All three
//! decode into one `BlogContent` of typed blocks. Views render block text as
//! escaped text nodes; nothing from the backend is injected as markup.
//! Unknown block types are skipped.

#[cfg(test)]
#[path = "blog_content_test.rs"]
mod blog_content_test;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlogContent {
    pub blocks: Vec<ContentBlock>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentBlock {
    Heading { level: u8, text: String, id: Option<String> },
    Paragraph(Vec<Span>),
    Quote(String),
    Callout(String),
    List(Vec<String>),
    Faq(Vec<FaqItem>),
    Image { url: String, alt: Option<String>, caption: Option<String> },
}

/// Run of paragraph text, optionally linked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub href: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl Span {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), href: None }
    }
}

impl BlogContent {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// One paragraph block per blank-line separated chunk of `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self { blocks: paragraphs(text) }
    }

    fn from_value(value: &Value) -> Self {
        let blocks = match value {
            Value::String(text) => paragraphs(text),
            Value::Object(map) if map.contains_key("blocks") => map
                .get("blocks")
                .and_then(Value::as_array)
                .map(|blocks| blocks.iter().filter_map(ContentBlock::from_value).collect())
                .unwrap_or_default(),
            Value::Object(map) => sections(map),
            _ => Vec::new(),
        };
        Self { blocks }
    }
}

impl<'de> Deserialize<'de> for BlogContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl ContentBlock {
    fn from_value(value: &Value) -> Option<Self> {
        let block = value.as_object()?;
        let kind = str_field(block, "type")?;
        let text = || str_field(block, "text");
        match kind.as_str() {
            "heading" => Some(Self::Heading {
                level: block
                    .get("level")
                    .and_then(Value::as_u64)
                    .and_then(|l| u8::try_from(l).ok())
                    .map_or(2, |l| l.clamp(2, 4)),
                text: text()?,
                id: str_field(block, "id"),
            }),
            "paragraph" => {
                let spans: Vec<Span> = match block.get("spans").and_then(Value::as_array) {
                    Some(spans) => spans.iter().filter_map(span_of).collect(),
                    None => text().map(Span::text).into_iter().collect(),
                };
                (!spans.is_empty()).then_some(Self::Paragraph(spans))
            }
            "quote" => text().map(Self::Quote),
            "callout" => text().map(Self::Callout),
            "list" => {
                let items: Vec<String> = array_field(block, "items").iter().filter_map(plain_string).collect();
                (!items.is_empty()).then_some(Self::List(items))
            }
            "faq" => {
                let items: Vec<FaqItem> = array_field(block, "items")
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(|qa| Some(FaqItem { question: str_field(qa, "q")?, answer: str_field(qa, "a").unwrap_or_default() }))
                    .collect();
                (!items.is_empty()).then_some(Self::Faq(items))
            }
            "image" => Some(Self::Image {
                url: str_field(block, "url").or_else(|| str_field(block, "src"))?,
                alt: str_field(block, "alt"),
                caption: str_field(block, "caption"),
            }),
            _ => None,
        }
    }
}

/// Span text keeps its surrounding whitespace so adjacent runs join cleanly.
fn span_of(value: &Value) -> Option<Span> {
    let span = value.as_object()?;
    let text = span.get("text").and_then(Value::as_str).filter(|t| !t.trim().is_empty())?;
    match str_field(span, "type").as_deref() {
        Some("text") | None => Some(Span::text(text)),
        Some("link") => Some(Span { text: text.to_owned(), href: str_field(span, "href") }),
        Some(_) => None,
    }
}

/// Older `{introduction, sections: [{title, content, subsections}]}` layout.
fn sections(map: &Map<String, Value>) -> Vec<ContentBlock> {
    let mut blocks = str_field(map, "introduction").map(|intro| paragraphs(&intro)).unwrap_or_default();
    for section in array_field(map, "sections").iter().filter_map(Value::as_object) {
        if let Some(title) = str_field(section, "title") {
            blocks.push(ContentBlock::Heading { level: 2, text: title, id: str_field(section, "id") });
        }
        if let Some(body) = str_field(section, "content") {
            blocks.extend(paragraphs(&body));
        }
        let points: Vec<String> = array_field(section, "subsections").iter().filter_map(plain_string).collect();
        if !points.is_empty() {
            blocks.push(ContentBlock::List(points));
        }
    }
    blocks
}

fn paragraphs(text: &str) -> Vec<ContentBlock> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| ContentBlock::Paragraph(vec![Span::text(p)]))
        .collect()
}

fn str_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(plain_string)
}

fn array_field<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    map.get(key).and_then(Value::as_array).map_or(&[][..], Vec::as_slice)
}

fn plain_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
