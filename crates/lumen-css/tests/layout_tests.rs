//! Integration tests for box tree construction and geometry.
//!
//! All tests use [`ApproximateFontMetrics`] and the default 16px font, for
//! which a character is 9.6px wide, the ascent is 12.8px and a line is 20px
//! tall.

use lumen_css::layout::{HSTEP, INPUT_WIDTH, LIST_INDENT, VSTEP};
use lumen_css::{
    ApproximateFontMetrics, BoxKind, LayoutBox, compute_styles, layout_document, ua_rules,
};
use lumen_dom::DomTree;
use lumen_html::parse;
use quickcheck_macros::quickcheck;

fn layout(html: &str, viewport_width: i32) -> (DomTree, LayoutBox) {
    let tree = parse(html);
    let styles = compute_styles(&tree, ua_rules());
    let document = layout_document(&tree, &styles, viewport_width, &ApproximateFontMetrics);
    (tree, document)
}

/// The block box of the root element.
fn root_block(document: &LayoutBox) -> &LayoutBox {
    &document.children[0]
}

fn lines(layout_box: &LayoutBox) -> Vec<&LayoutBox> {
    layout_box
        .flatten()
        .into_iter()
        .filter(|b| b.kind == BoxKind::Line)
        .collect()
}

fn words(layout_box: &LayoutBox) -> Vec<&str> {
    layout_box
        .flatten()
        .into_iter()
        .filter_map(|b| match &b.kind {
            BoxKind::TextRun { word, .. } => Some(word.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_document_geometry() {
    let (_, document) = layout("<div>hello</div>", 800);
    assert_eq!(document.kind, BoxKind::Document);
    assert_eq!(document.rect.x, HSTEP);
    assert_eq!(document.rect.y, VSTEP);
    assert_eq!(document.rect.width, 800 - 2 * HSTEP);
    assert_eq!(document.children.len(), 1);
    assert_eq!(document.rect.height, root_block(&document).rect.height);
}

#[test]
fn test_single_word_geometry() {
    let (tree, document) = layout("<div>hello</div>", 800);
    let div = root_block(&document);
    assert_eq!(div.kind, BoxKind::Block);
    assert_eq!(div.node, tree.root());

    let anonymous = &div.children[0];
    assert_eq!(anonymous.kind, BoxKind::AnonymousInline);
    let line = &anonymous.children[0];
    assert_eq!(line.kind, BoxKind::Line);
    assert_eq!(line.rect.y, VSTEP);
    assert_eq!(line.rect.height, 20);

    let word = &line.children[0];
    assert!(matches!(&word.kind, BoxKind::TextRun { word, .. } if word == "hello"));
    assert_eq!(word.rect.x, HSTEP);
    // Baseline at 16px below the line top, minus the 12px ascent.
    assert_eq!(word.rect.y, VSTEP + 4);
    assert_eq!(word.rect.width, 48);
    assert_eq!(word.rect.height, 19);

    assert_eq!(div.rect.height, 20);
}

#[test]
fn test_anonymous_grouping() {
    let (tree, document) = layout("<div>text1<p>block</p>text2</div>", 800);
    let div = root_block(&document);
    let kinds: Vec<&BoxKind> = div.children.iter().map(|b| &b.kind).collect();
    assert_eq!(
        kinds,
        [&BoxKind::AnonymousInline, &BoxKind::Block, &BoxKind::AnonymousInline]
    );
    assert_eq!(div.children[1].node, tree.find_element("p").unwrap());
    assert_eq!(words(&div.children[0]), ["text1"]);
    assert_eq!(words(&div.children[2]), ["text2"]);
}

#[test]
fn test_siblings_stack_vertically() {
    let (_, document) = layout("<div>text1<p>block</p>text2</div>", 800);
    let div = root_block(&document);
    for pair in div.children.windows(2) {
        assert_eq!(pair[1].rect.y, pair[0].rect.bottom());
    }
    let total: i32 = div.children.iter().map(|b| b.rect.height).sum();
    assert_eq!(div.rect.height, total);
}

#[test]
fn test_paragraph_step() {
    let (_, document) = layout("<div><p>hello</p></div>", 800);
    let p = &root_block(&document).children[0];
    assert_eq!(p.rect.height, 20 + VSTEP);
}

#[test]
fn test_inline_children_share_lines() {
    let (_, document) = layout("<p>Hello <b>World</b></p>", 800);
    let p = root_block(&document);
    assert_eq!(lines(p).len(), 1);
    let runs: Vec<&LayoutBox> = lines(p)[0].children.iter().collect();
    assert_eq!(runs.len(), 2);
    assert!(runs[1].rect.x > runs[0].rect.right());
    match &runs[1].kind {
        BoxKind::TextRun { word, font, .. } => {
            assert_eq!(word, "World");
            assert_eq!(font.weight.to_string(), "bold");
        }
        other => panic!("expected a text run, got {other}"),
    }
}

#[test]
fn test_words_wrap_onto_new_lines() {
    // 74px of line width; each word is 38px and a space is 9px.
    let (_, document) = layout("<div>aaaa aaaa aaaa</div>", 100);
    let div = root_block(&document);
    let lines = lines(div);
    assert_eq!(lines.len(), 3);
    for pair in lines.windows(2) {
        assert_eq!(pair[1].rect.y, pair[0].rect.bottom());
    }
    assert_eq!(div.rect.height, 60);
}

#[test]
fn test_overwide_word_is_placed_alone() {
    let (_, document) = layout("<div>a supercalifragilistic b</div>", 100);
    let lines = lines(root_block(&document));
    assert_eq!(lines.len(), 3);
    let long = &lines[1].children[0];
    assert_eq!(lines[1].children.len(), 1);
    assert!(long.rect.right() > lines[1].rect.right());
}

#[test]
fn test_line_break_element() {
    let (_, document) = layout("<div>one<br>two</div>", 800);
    let lines = lines(root_block(&document));
    assert_eq!(lines.len(), 2);
    assert_eq!(words(lines[0]), ["one"]);
    assert_eq!(words(lines[1]), ["two"]);
}

#[test]
fn test_form_controls_are_fixed_width() {
    let (_, document) = layout(r#"<div><input value="hi"><button>Go</button></div>"#, 800);
    let controls: Vec<&LayoutBox> = document
        .flatten()
        .into_iter()
        .filter(|b| matches!(b.kind, BoxKind::Replaced { .. }))
        .collect();
    assert_eq!(controls.len(), 2);
    assert!(controls.iter().all(|b| b.rect.width == INPUT_WIDTH));
    assert!(matches!(&controls[0].kind, BoxKind::Replaced { text, .. } if text == "hi"));
    assert!(matches!(&controls[1].kind, BoxKind::Replaced { text, .. } if text == "Go"));
    assert_eq!(controls[0].rect.x, HSTEP);
    assert_eq!(controls[1].rect.x, HSTEP + INPUT_WIDTH + 9);
}

#[test]
fn test_button_with_markup_has_no_label() {
    let (_, document) = layout("<div><button><b>Go</b></button></div>", 800);
    let button = document
        .flatten()
        .into_iter()
        .find(|b| matches!(b.kind, BoxKind::Replaced { .. }))
        .unwrap();
    assert!(matches!(&button.kind, BoxKind::Replaced { text, .. } if text.is_empty()));
    assert!(words(&document).is_empty());
}

#[test]
fn test_list_items_are_indented() {
    let (_, document) = layout("<ul><li>x</li></ul>", 800);
    let ul = root_block(&document);
    let li = &ul.children[0];
    assert_eq!(li.rect.x, ul.rect.x + LIST_INDENT);
    assert_eq!(li.rect.width, ul.rect.width - LIST_INDENT);
}

#[test]
fn test_hidden_content_is_not_laid_out() {
    let (tree, document) = layout(
        "<html><head><title>T</title><style>p { color: red }</style></head><body>hi</body></html>",
        800,
    );
    assert_eq!(words(&document), ["hi"]);
    let body = tree.find_element("body").unwrap();
    let body_box = document.flatten().into_iter().find(|b| b.node == body).unwrap();
    assert_eq!(body_box.rect.y, VSTEP);
}

#[test]
fn test_empty_element_is_an_empty_block() {
    let (_, document) = layout("<div></div>", 800);
    let div = root_block(&document);
    assert!(div.children.is_empty());
    assert_eq!(div.rect.height, 0);
}

#[test]
fn test_layout_is_idempotent() {
    let html = "<div><h1>Title</h1><p>Some <i>styled</i> text that wraps</p><ul><li>a</li></ul></div>";
    let tree = parse(html);
    let styles = compute_styles(&tree, ua_rules());
    let first = layout_document(&tree, &styles, 240, &ApproximateFontMetrics);
    let second = layout_document(&tree, &styles, 240, &ApproximateFontMetrics);
    assert_eq!(first, second);
}

#[test]
fn test_narrower_viewport_is_taller() {
    let html = "<p>one two three four five six seven eight nine ten</p>";
    let (_, wide) = layout(html, 800);
    let (_, narrow) = layout(html, 150);
    assert!(narrow.rect.height > wide.rect.height);
}

#[quickcheck]
fn prop_lines_fit_container(lengths: Vec<u8>, viewport: u16) -> bool {
    let viewport = 60 + i32::from(viewport % 600);
    let text: Vec<String> = lengths
        .iter()
        .map(|len| "x".repeat(usize::from(len % 20) + 1))
        .collect();
    let (_, document) = layout(&format!("<div>{}</div>", text.join(" ")), viewport);

    lines(&document).iter().all(|line| {
        line.children.len() == 1
            || line
                .children
                .iter()
                .all(|child| child.rect.right() <= line.rect.right())
    })
}

fn families(layout_box: &LayoutBox) -> Vec<(&str, &str)> {
    layout_box
        .flatten()
        .into_iter()
        .filter_map(|b| match &b.kind {
            BoxKind::TextRun { word, font, .. } => Some((word.as_str(), font.family.as_str())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_font_family_reaches_text_runs() {
    let (_, document) = layout("<div><pre>code here</pre><p>x <code>y</code></p></div>", 800);
    assert_eq!(
        families(&document),
        vec![
            ("code here", "monospace"),
            ("x", "SansSerif"),
            ("y", "monospace")
        ]
    );
}

#[test]
fn test_preformatted_text_keeps_rows() {
    let (tree, document) = layout("<div><pre>let x = 1;\n\n  aaa bbb ccc</pre></div>", 100);
    let pre = tree.find_element("pre").unwrap();
    let pre_box = document
        .flatten()
        .into_iter()
        .find(|b| b.node == pre)
        .unwrap();

    // One row per source line, never wrapped, blank rows included.
    assert_eq!(words(pre_box), vec!["let x = 1;", "", "  aaa bbb ccc"]);
    let rows = lines(pre_box);
    assert_eq!(rows.len(), 3);
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(row.rect.y, pre_box.rect.y + 20 * index as i32);
        assert_eq!(row.rect.height, 20);
        assert_eq!(row.children[0].rect.x, pre_box.rect.x);
    }
    assert_eq!(pre_box.rect.height, 60);
}

#[test]
fn test_content_after_preformatted_text_starts_a_new_line() {
    let (_, document) = layout(r#"<div><pre>one<input value="v"></pre></div>"#, 800);
    let rows = lines(&document);
    assert_eq!(rows.len(), 2);
    assert!(matches!(rows[1].children[0].kind, BoxKind::Replaced { .. }));
    assert_eq!(rows[1].children[0].rect.x, HSTEP);
}
