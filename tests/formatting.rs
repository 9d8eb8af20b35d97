use inkmark::prelude::*;
use inkmark::style::StyleProperty;

const SCENE: &str = r#"{
    "name": "top",
    "origin": "https://example.com",
    "document": [
        { "element": "p", "children": ["Hello", "World"] }
    ],
    "selection": [
        { "start": { "path": [0, 0], "offset": 2 }, "end": { "path": [0, 1], "offset": 3 } }
    ],
    "frames": [
        {
            "name": "inner",
            "document": ["inside text"],
            "selection": [{ "start": { "path": [0], "offset": 0 }, "end": { "path": [0], "offset": 6 } }]
        },
        {
            "name": "ad",
            "origin": "https://ads.example",
            "document": ["buy now"],
            "selection": [{ "start": { "path": [0], "offset": 0 }, "end": { "path": [0], "offset": 3 } }],
            "frames": [
                {
                    "name": "nested",
                    "origin": "https://example.com",
                    "document": ["hidden"],
                    "selection": [{ "start": { "path": [0], "offset": 0 }, "end": { "path": [0], "offset": 6 } }]
                }
            ]
        }
    ]
}"#;

const YELLOW: &str = "<formatted-text style=\"background-color: yellow;\">";

fn default_options() -> FormatOptions {
    FormatOptions::new(StyleSpec::highlight("yellow"), WrapperTag::Format)
}

#[test]
fn test_scene_formats_accessible_frames_only() {
    let mut root = FrameSpec::from_json_str(SCENE).unwrap().build().unwrap();
    let report = apply_style(&mut root, "https://example.com", &default_options());

    assert_eq!(
        root.document().to_markup(),
        format!("<p>He{YELLOW}llo</formatted-text>{YELLOW}Wor</formatted-text>ld</p>")
    );
    let inner = &root.children()[0];
    assert_eq!(
        inner.document().to_markup(),
        format!("{YELLOW}inside</formatted-text> text")
    );

    let ad = &root.children()[1];
    assert_eq!(ad.document().to_markup(), "buy now");
    assert_eq!(ad.children()[0].document().to_markup(), "hidden");

    assert_eq!(report.frames.len(), 2);
    assert_eq!(report.wrapped(), 3);
    assert_eq!(report.failures(), 0);
    assert_eq!(report.denied.len(), 1);
    assert!(report.denied[0].contains("ad"));
}

#[test]
fn test_visited_selections_are_cleared() {
    let mut root = FrameSpec::from_json_str(SCENE).unwrap().build().unwrap();
    apply_style(&mut root, "https://example.com", &default_options());

    assert!(root.selection("https://example.com").unwrap().is_empty());
    assert!(
        root.children()[0]
            .selection("https://example.com")
            .unwrap()
            .is_empty()
    );
    // Denied frames keep whatever was selected.
    assert_eq!(
        root.children()[1]
            .selection("https://ads.example")
            .map(Selection::range_count),
        Ok(1)
    );
}

#[test]
fn test_text_content_is_preserved() {
    let mut root = FrameSpec::from_json_str(SCENE).unwrap().build().unwrap();
    let before = root.document().text_content(root.document().root());
    apply_style(&mut root, "https://example.com", &default_options());
    let doc = root.document();
    assert_eq!(doc.text_content(doc.root()), before);
}

#[test]
fn test_preset_with_highlight_tag() {
    let mut root = FrameSpec::from_json_str(SCENE).unwrap().build().unwrap();
    let options = FormatOptions::new(Preset::Bold.style(), WrapperTag::Highlight);
    apply_style(&mut root, "https://example.com", &options);
    assert_eq!(
        root.children()[0].document().to_markup(),
        "<mark style=\"font-weight: bold;\">inside</mark> text"
    );
}

#[test]
fn test_viewer_from_other_origin_sees_only_its_frames() {
    let mut root = FrameSpec::from_json_str(SCENE).unwrap().build().unwrap();
    let report = apply_style(&mut root, "https://ads.example", &default_options());

    // The top frame is denied, which hides everything beneath it.
    assert_eq!(report.frames.len(), 0);
    assert_eq!(report.denied.len(), 1);
    assert_eq!(root.children()[1].document().to_markup(), "buy now");
}

#[test]
fn test_malformed_range_does_not_block_siblings() {
    let json = r#"{
        "name": "top",
        "origin": "https://example.com",
        "document": [{ "element": "p", "children": ["alpha", "beta", "gamma"] }],
        "selection": [
            { "start": { "path": [0, 0], "offset": 0 }, "end": { "path": [0, 0], "offset": 5 } },
            { "start": { "path": [0, 1], "offset": 3 }, "end": { "path": [0, 1], "offset": 1 } },
            { "start": { "path": [0, 2], "offset": 1 }, "end": { "path": [0, 2], "offset": 4 } }
        ]
    }"#;
    let mut root = FrameSpec::from_json_str(json).unwrap().build().unwrap();
    let report = apply_style(&mut root, "https://example.com", &default_options());

    let frame = &report.frames[0];
    assert_eq!(frame.ranges, 3);
    assert_eq!(frame.wrapped, 2);
    assert_eq!(frame.failures.len(), 1);
    assert_eq!(frame.failures[0].range, 1);
    assert_eq!(
        root.document().to_markup(),
        format!(
            "<p>{YELLOW}alpha</formatted-text>beta\
             g{YELLOW}amm</formatted-text>a</p>"
        )
    );
}

#[test]
fn test_report_serializes_without_node_ids() {
    let mut root = FrameSpec::from_json_str(SCENE).unwrap().build().unwrap();
    let report = apply_style(&mut root, "https://example.com", &default_options());
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["tag"], "format");
    assert_eq!(json["style"]["properties"]["background-color"], "yellow");
    assert_eq!(json["frames"][0]["frame"], "top");
    assert_eq!(json["frames"][0]["wrapped"], 2);
    assert!(json["frames"][0].get("wrappers").is_none());
    assert_eq!(json["denied"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_parsed_style_reaches_wrapper() {
    let style = StyleSpec::parse("fontWeight=bold & backgroundColor = aqua").unwrap();
    assert_eq!(style.get(StyleProperty::FontWeight), Some("bold"));

    let mut tree = DocumentTree::new();
    let t = tree.create_text("abc");
    tree.append(tree.root(), t).unwrap();
    format_range(
        &mut tree,
        &Range::within(t, 0, 3),
        &FormatOptions::new(style, WrapperTag::Format),
    )
    .unwrap();
    assert_eq!(
        tree.to_markup(),
        "<formatted-text style=\"font-weight: bold; background-color: aqua;\">abc</formatted-text>"
    );
}
