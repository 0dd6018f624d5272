//! Integration tests for the tree builder.

use sprig_dom::{NodeId, Tree, render};
use sprig_html::{
    Attribute, BuildError, BuildErrorKind, IssueKind, Token, TreeBuilder, build_tree,
    build_tree_with_issues, parse_html,
};

/// Helper to build a start tag token from `(name, value)` pairs.
fn start(name: &str, attrs: &[(&str, &str)]) -> Token {
    Token::start_tag(
        name,
        attrs
            .iter()
            .map(|(n, v)| Attribute::new(*n, *v))
            .collect(),
    )
}

fn end(name: &str) -> Token {
    Token::end_tag(name)
}

fn text(data: &str) -> Token {
    Token::text(data)
}

/// Helper to get the tag name of a node.
fn tag_name(tree: &Tree, id: NodeId) -> &str {
    tree.as_tag(id).map_or("", |data| data.name.as_str())
}

/// Every reachable tag must be closed after a successful build.
fn assert_all_closed(tree: &Tree) {
    for id in tree.descendants(tree.root()) {
        assert!(tree.is_closed(id), "node {id:?} left open");
    }
}

// ========== scenarios ==========

#[test]
fn test_single_div_with_text() {
    let tree = build_tree(vec![start("div", &[]), text("This is a test text."), end("div")]).unwrap();

    let div = tree.children(NodeId::ROOT)[0];
    assert_eq!(tree.children(NodeId::ROOT).len(), 1);
    assert_eq!(tag_name(&tree, div), "div");
    let leaf = tree.children(div)[0];
    assert_eq!(tree.as_text(leaf), Some("This is a test text."));
    assert_eq!(tree.depth(leaf), Some(2));
    assert_all_closed(&tree);
}

#[test]
fn test_nested_divs_with_id_tokens() {
    let tree = build_tree(vec![
        start("div", &[("id", "menu head")]),
        start("div", &[]),
        text("in header"),
        end("div"),
        end("div"),
    ])
    .unwrap();

    let outer = tree.children(NodeId::ROOT)[0];
    let ids: Vec<&str> = tree.as_tag(outer).unwrap().id_tokens().collect();
    assert_eq!(ids, ["head", "menu"]);
    let inner = tree.children(outer)[0];
    assert_eq!(tree.depth(inner), Some(2));
    assert_all_closed(&tree);
}

#[test]
fn test_void_element_then_stray_end_tag_is_mismatch() {
    let err = build_tree(vec![start("img", &[("src", "x.png")]), end("div")]).unwrap_err();

    assert_eq!(err.kind(), BuildErrorKind::MismatchedClose);
    assert_eq!(
        err,
        BuildError::MismatchedClose {
            open: "root".to_string(),
            found: Some("div".to_string()),
            token_index: 1,
        }
    );
}

#[test]
fn test_unterminated_elements_are_closed_at_end() {
    let (tree, issues) = build_tree_with_issues(vec![
        start("div", &[]),
        start("footer", &[]),
        text("footer text"),
        end("footer"),
    ])
    .unwrap();

    let div = tree.children(NodeId::ROOT)[0];
    let footer = tree.children(div)[0];
    assert_eq!(tag_name(&tree, footer), "footer");
    assert_all_closed(&tree);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::ForcedClose);
    assert_eq!(issues[0].tag_name, "div");
    assert_eq!(issues[0].token_index, 4);
}

#[test]
fn test_double_close_reports_mismatch_not_underflow() {
    let err = build_tree(vec![start("p", &[]), end("p"), end("p")]).unwrap_err();

    assert_eq!(err.kind(), BuildErrorKind::MismatchedClose);
    assert_eq!(
        err.to_string(),
        "mismatched close at token 2: `</p>` does not close `<root>`"
    );
}

// ========== transitions ==========

#[test]
fn test_closing_root_underflows() {
    let err = build_tree(vec![end("root")]).unwrap_err();
    assert_eq!(err, BuildError::StackUnderflow { token_index: 0 });
}

#[test]
fn test_mismatched_nested_close() {
    let err = build_tree(vec![start("div", &[]), start("span", &[]), end("div")]).unwrap_err();
    assert_eq!(
        err,
        BuildError::MismatchedClose {
            open: "span".to_string(),
            found: Some("div".to_string()),
            token_index: 2,
        }
    );
}

#[test]
fn test_blank_text_produces_no_node() {
    let tree = build_tree(vec![start("p", &[]), text("  \n\t "), end("p")]).unwrap();
    let p = tree.children(NodeId::ROOT)[0];
    assert!(tree.children(p).is_empty());
}

#[test]
fn test_text_is_stripped() {
    let tree = build_tree(vec![text("\n  hello world \t")]).unwrap();
    let leaf = tree.children(NodeId::ROOT)[0];
    assert_eq!(tree.as_text(leaf), Some("hello world"));
    assert_eq!(tree.depth(leaf), Some(1));
}

#[test]
fn test_void_end_tag_is_ignored() {
    let (tree, issues) = build_tree_with_issues(vec![
        start("p", &[]),
        start("br", &[]),
        end("br"),
        text("after"),
        end("p"),
    ])
    .unwrap();

    let p = tree.children(NodeId::ROOT)[0];
    let children = tree.children(p);
    assert_eq!(children.len(), 2);
    assert_eq!(tag_name(&tree, children[0]), "br");
    assert!(tree.children(children[0]).is_empty());
    assert_eq!(tree.as_text(children[1]), Some("after"));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::IgnoredVoidEndTag);
    assert_eq!(issues[0].token_index, 2);
}

#[test]
fn test_void_end_tag_without_start_is_ignored() {
    let tree = build_tree(vec![end("img"), text("x")]).unwrap();
    assert_eq!(tree.children(NodeId::ROOT).len(), 1);
}

#[test]
fn test_element_named_root_is_an_ordinary_element() {
    let tree = build_tree(vec![start("root", &[]), text("inner"), end("root")]).unwrap();
    let inner_root = tree.children(NodeId::ROOT)[0];
    assert_eq!(tree.depth(inner_root), Some(1));
    assert_all_closed(&tree);
}

#[test]
fn test_children_keep_document_order() {
    let tree = build_tree(vec![
        start("ul", &[]),
        start("li", &[]),
        text("one"),
        end("li"),
        text("between"),
        start("li", &[]),
        text("two"),
        end("li"),
        end("ul"),
    ])
    .unwrap();

    let ul = tree.children(NodeId::ROOT)[0];
    let kids = tree.children(ul);
    assert_eq!(kids.len(), 3);
    assert_eq!(tree.as_text(tree.children(kids[0])[0]), Some("one"));
    assert_eq!(tree.as_text(kids[1]), Some("between"));
    assert_eq!(tree.as_text(tree.children(kids[2])[0]), Some("two"));
}

#[test]
fn test_empty_stream_yields_closed_root() {
    let tree = build_tree(Vec::new()).unwrap();
    assert_eq!(tree.reachable_len(), 1);
    assert!(tree.is_closed(NodeId::ROOT));
}

#[test]
fn test_builder_exposes_cursor_and_path() {
    let mut builder = TreeBuilder::new();
    builder.process_token(&start("div", &[])).unwrap();
    builder.process_token(&start("p", &[])).unwrap();

    assert_eq!(builder.path().len(), 2);
    assert_eq!(builder.path()[0], NodeId::ROOT);
    assert_eq!(tag_name(builder.tree(), builder.cursor()), "p");

    builder.process_token(&end("p")).unwrap();
    assert_eq!(tag_name(builder.tree(), builder.cursor()), "div");
    assert_eq!(builder.path(), &[NodeId::ROOT]);

    let tree = builder.finish().unwrap();
    assert_all_closed(&tree);
}

#[test]
fn test_error_display() {
    assert_eq!(
        BuildError::StackUnderflow { token_index: 3 }.to_string(),
        "stack underflow at token 3: more closing operations than openings"
    );
    assert_eq!(
        BuildError::UnclosedRoot.to_string(),
        "root node not closed at end of input"
    );
    assert_eq!(
        BuildError::MismatchedClose {
            open: "br".to_string(),
            found: None,
            token_index: 9,
        }
        .to_string(),
        "mismatched close at token 9: self-close of already closed `<br>`"
    );
}

// ========== end to end ==========

#[test]
fn test_parse_html_end_to_end() {
    let html = "<div id = \"menu head\" class = \"menu\">\n<div>in header<\\/div>\t<\\/div>\
                <div>\ntext1<div>text2<\\/div><footer>footer text<\\/footer>text3<\\/div>";
    let tree = parse_html(html).unwrap();

    let expected = "<root> : \n\
                    \t<div> : class = \"menu\" | id = \"head menu\"\n\
                    \t\t<div> : \n\
                    \t\t\t<data> : in header\n\
                    \t<div> : \n\
                    \t\t<data> : text1\n\
                    \t\t<div> : \n\
                    \t\t\t<data> : text2\n\
                    \t\t<footer> : \n\
                    \t\t\t<data> : footer text\n\
                    \t\t<data> : text3";
    assert_eq!(render(&tree), expected);
}

#[test]
fn test_parse_html_reports_mismatch() {
    let err = parse_html("<div><span></div>").unwrap_err();
    assert_eq!(err.kind(), BuildErrorKind::MismatchedClose);
}

#[test]
fn test_parse_html_self_closing_syntax() {
    let tree = parse_html("<p>a<br/>b<img src=x>c</p>").unwrap();
    let p = tree.children(NodeId::ROOT)[0];
    assert_eq!(tree.children(p).len(), 5);
    assert_all_closed(&tree);
}
