use super::*;

fn decode(body: &str) -> BlogContent {
    serde_json::from_str(body).unwrap()
}

#[test]
fn editor_blocks_decode_in_order() {
    let content = decode(
        r#"{"format":"rich_blocks_v1","vlog":null,"blocks":[
            {"type":"heading","level":2,"text":"Getting there","id":"getting-there"},
            {"type":"paragraph","spans":[
                {"type":"text","text":"Fly to "},
                {"type":"link","text":"Lukla","href":"/trek/ebc"},
                {"type":"image_inline","url":"/x.png"}
            ]},
            {"type":"list","items":["Permit","Insurance"]},
            {"type":"faq","items":[{"q":"Is it hard?","a":"Moderate."}]},
            {"type":"quote","text":"Slow is smooth."},
            {"type":"image","url":"/lukla.jpg","alt":"Runway"}
        ]}"#,
    );
    assert_eq!(
        content.blocks,
        vec![
            ContentBlock::Heading { level: 2, text: "Getting there".to_owned(), id: Some("getting-there".to_owned()) },
            ContentBlock::Paragraph(vec![
                Span::text("Fly to "),
                Span { text: "Lukla".to_owned(), href: Some("/trek/ebc".to_owned()) },
            ]),
            ContentBlock::List(vec!["Permit".to_owned(), "Insurance".to_owned()]),
            ContentBlock::Faq(vec![FaqItem { question: "Is it hard?".to_owned(), answer: "Moderate.".to_owned() }]),
            ContentBlock::Quote("Slow is smooth.".to_owned()),
            ContentBlock::Image { url: "/lukla.jpg".to_owned(), alt: Some("Runway".to_owned()), caption: None },
        ]
    );
}

#[test]
fn unknown_and_malformed_blocks_are_skipped() {
    let content = decode(
        r#"{"blocks":[
            {"type":"table","rows":[]},
            {"type":"heading"},
            "stray",
            {"type":"callout","text":"Carry cash"}
        ]}"#,
    );
    assert_eq!(content.blocks, vec![ContentBlock::Callout("Carry cash".to_owned())]);
}

#[test]
fn heading_level_is_clamped() {
    let content = decode(r#"{"blocks":[{"type":"heading","level":1,"text":"A"},{"type":"heading","level":6,"text":"B"}]}"#);
    let levels: Vec<u8> = content
        .blocks
        .iter()
        .filter_map(|b| match b {
            ContentBlock::Heading { level, .. } => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![2, 4]);
}

#[test]
fn sections_layout_becomes_blocks() {
    let content = decode(
        r#"{"introduction":"Welcome.","sections":[
            {"id":"s1","title":"Story","content":"First.\n\nSecond.","subsections":["Point"]}
        ]}"#,
    );
    assert_eq!(
        content.blocks,
        vec![
            ContentBlock::Paragraph(vec![Span::text("Welcome.")]),
            ContentBlock::Heading { level: 2, text: "Story".to_owned(), id: Some("s1".to_owned()) },
            ContentBlock::Paragraph(vec![Span::text("First.")]),
            ContentBlock::Paragraph(vec![Span::text("Second.")]),
            ContentBlock::List(vec!["Point".to_owned()]),
        ]
    );
}

#[test]
fn plain_text_and_null_bodies() {
    assert_eq!(decode(r#""One.\n\n\n\nTwo.""#).blocks.len(), 2);
    assert!(decode("null").is_empty());
    assert!(decode(r#"{"format":"rich_blocks_v1","blocks":[]}"#).is_empty());
}

#[test]
fn markup_stays_literal_text() {
    let content = decode(r#"{"blocks":[{"type":"paragraph","text":"<script>alert(1)</script>"}]}"#);
    assert_eq!(content.blocks, vec![ContentBlock::Paragraph(vec![Span::text("<script>alert(1)</script>")])]);
}
