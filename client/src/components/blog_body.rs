//! Renders structured post content as plain DOM nodes.
//!
//! Every string lands in a text node, so markup inside backend content is
//! shown literally rather than parsed.

use leptos::prelude::*;

use crate::net::blog_content::{BlogContent, ContentBlock, Span};

#[component]
pub fn BlogBody(content: BlogContent) -> impl IntoView {
    view! {
        <div class="blog-post__content">
            {content.blocks.into_iter().map(render_block).collect_view()}
        </div>
    }
}

fn render_block(block: ContentBlock) -> AnyView {
    match block {
        ContentBlock::Heading { level: 2, text, id } => view! { <h2 id=id>{text}</h2> }.into_any(),
        ContentBlock::Heading { level: 3, text, id } => view! { <h3 id=id>{text}</h3> }.into_any(),
        ContentBlock::Heading { text, id, .. } => view! { <h4 id=id>{text}</h4> }.into_any(),
        ContentBlock::Paragraph(spans) => view! { <p>{spans.into_iter().map(render_span).collect_view()}</p> }.into_any(),
        ContentBlock::Quote(text) => view! { <blockquote>{text}</blockquote> }.into_any(),
        ContentBlock::Callout(text) => view! { <aside class="blog-post__callout">{text}</aside> }.into_any(),
        ContentBlock::List(items) => view! {
            <ul>{items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}</ul>
        }
        .into_any(),
        ContentBlock::Faq(items) => view! {
            <dl class="blog-post__faq">
                {items
                    .into_iter()
                    .map(|qa| view! { <dt>{qa.question}</dt><dd>{qa.answer}</dd> })
                    .collect_view()}
            </dl>
        }
        .into_any(),
        ContentBlock::Image { url, alt, caption } => view! {
            <figure>
                <img src=url alt=alt.unwrap_or_default() loading="lazy"/>
                {caption.map(|c| view! { <figcaption>{c}</figcaption> })}
            </figure>
        }
        .into_any(),
    }
}

fn render_span(span: Span) -> AnyView {
    match span.href {
        Some(href) => view! { <a href=href>{span.text}</a> }.into_any(),
        None => span.text.into_any(),
    }
}
