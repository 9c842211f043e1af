//! Integration tests for display list generation.

use lumen_css::paint::BULLET_COLOR;
use lumen_css::{
    ApproximateFontMetrics, DisplayCommand, DisplayList, Painter, Rect, compute_styles,
    layout_document, ua_rules,
};
use lumen_dom::{DomTree, NodeId};
use lumen_html::parse;

fn paint(html: &str, focused: Option<&str>) -> (DomTree, DisplayList) {
    let tree = parse(html);
    let styles = compute_styles(&tree, ua_rules());
    let document = layout_document(&tree, &styles, 800, &ApproximateFontMetrics);
    let focused: Option<NodeId> = focused.and_then(|tag| tree.find_element(tag));
    let display_list = Painter::new(&tree, &styles, &ApproximateFontMetrics)
        .with_focus(focused)
        .paint(&document);
    (tree, display_list)
}

fn texts(display_list: &DisplayList) -> Vec<&str> {
    display_list
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_text_in_document_order() {
    let (_, display_list) = paint("<div><p>one two</p><p>three</p></div>", None);
    assert_eq!(texts(&display_list), ["one", "two", "three"]);
}

#[test]
fn test_unstyled_document_has_only_text() {
    let (_, display_list) = paint("<div>plain</div>", None);
    assert_eq!(display_list.len(), 1);
    match &display_list.commands()[0] {
        DisplayCommand::Text { x, y, text, font, color } => {
            assert_eq!((*x, *y), (13, 22));
            assert_eq!(text, "plain");
            assert_eq!(color, "black");
            assert!((font.size - 16.0).abs() < f32::EPSILON);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_background_is_painted_before_text() {
    let (_, display_list) = paint(r#"<div style="background-color: yellow">x</div>"#, None);
    let commands = display_list.commands();
    assert_eq!(commands.len(), 2);
    assert!(matches!(&commands[0], DisplayCommand::FillRect { color, .. } if color == "yellow"));
    assert!(matches!(&commands[1], DisplayCommand::Text { .. }));
}

#[test]
fn test_transparent_background_is_skipped() {
    let (_, display_list) = paint(r#"<div style="background-color: transparent">x</div>"#, None);
    assert_eq!(display_list.len(), 1);
}

#[test]
fn test_list_item_bullet() {
    let (_, display_list) = paint("<ul><li>x</li></ul>", None);
    let bullet = display_list
        .commands()
        .iter()
        .find_map(|command| match command {
            DisplayCommand::FillRect { rect, color } if color == BULLET_COLOR => Some(*rect),
            _ => None,
        })
        .unwrap();
    // The li starts at 13 + 12 = 25 and VSTEP = 18.
    assert_eq!(
        bullet,
        Rect {
            x: 15,
            y: 24,
            width: 8,
            height: 8
        }
    );
}

#[test]
fn test_form_control_backgrounds() {
    let (_, display_list) = paint(r#"<div><input value="v"><button>b</button></div>"#, None);
    let fills: Vec<&str> = display_list
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::FillRect { color, .. } => Some(color.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(fills, ["lightblue", "orange"]);
    assert_eq!(texts(&display_list), ["v", "b"]);
}

#[test]
fn test_focused_input_gets_outline_and_caret() {
    let (_, display_list) = paint(r#"<div><input value="abc"></div>"#, Some("input"));
    let commands = display_list.commands();
    assert_eq!(commands.len(), 4);
    assert!(matches!(&commands[0], DisplayCommand::FillRect { .. }));
    assert!(matches!(&commands[1], DisplayCommand::Text { .. }));
    let DisplayCommand::Outline { rect, thickness, .. } = &commands[2] else {
        panic!("expected an outline, got {:?}", commands[2]);
    };
    assert_eq!(rect.width, 200);
    assert_eq!(*thickness, 1);
    let DisplayCommand::Line { x1, y1, x2, y2, .. } = &commands[3] else {
        panic!("expected a caret, got {:?}", commands[3]);
    };
    // Three 16px characters are 28.8px wide.
    assert_eq!(*x1, 13 + 28);
    assert_eq!(x1, x2);
    assert_eq!(*y1, rect.y);
    assert_eq!(*y2, rect.bottom());
}

#[test]
fn test_unfocused_input_has_no_caret() {
    let (_, display_list) = paint(r#"<div><input value="abc"></div>"#, None);
    assert!(
        !display_list
            .commands()
            .iter()
            .any(|command| matches!(command, DisplayCommand::Line { .. } | DisplayCommand::Outline { .. }))
    );
}

#[test]
fn test_display_list_serializes_with_type_tags() {
    let (_, display_list) = paint("<div>hi</div>", None);
    let json = serde_json::to_value(&display_list).unwrap();
    assert_eq!(json[0]["type"], "Text");
    assert_eq!(json[0]["text"], "hi");
    assert_eq!(json[0]["font"]["weight"], "normal");
}

#[test]
fn test_blank_preformatted_row_draws_nothing() {
    let (_, display_list) = paint("<div><pre>a\n\nb</pre></div>", None);
    assert_eq!(texts(&display_list), ["a", "b"]);
    let ys: Vec<i32> = display_list
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::Text { y, .. } => Some(*y),
            _ => None,
        })
        .collect();
    assert_eq!(ys[1] - ys[0], 40);
}
