//! Test helpers: snapshot fixtures and a tiny selector engine
//!
//! `SimpleSelector` understands `*`, `tag`, `#id`, `.class` and compounds of
//! those (`li.item#first`). That is enough to drive traversal tests.

use dom::{DomArena, DomSerializer, NodeId, SnapshotLoader};
use serde_json::{json, Value};

use crate::error::{Result, TraversalError};
use crate::selector::{Selector, SelectorCompiler};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector<DomArena> for SimpleSelector {
    fn matches(&self, tree: &DomArena, node: NodeId) -> bool {
        let Ok(node) = tree.get(node) else {
            return false;
        };
        let Some(tag) = node.tag_name() else {
            return false;
        };
        self.tag.as_deref().map_or(true, |want| want == tag)
            && self.id.as_deref().map_or(true, |want| node.attr("id") == Some(want))
            && self.classes.iter().all(|class| node.has_class(class))
    }
}

pub struct SimpleCompiler;

impl SelectorCompiler<DomArena> for SimpleCompiler {
    type Selector = SimpleSelector;

    fn compile(&self, text: &str) -> Result<SimpleSelector> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TraversalError::selector_syntax(text, "empty selector"));
        }

        let mut selector = SimpleSelector::default();
        let mut rest = text;
        if let Some(stripped) = rest.strip_prefix('*') {
            rest = stripped;
        } else {
            let end = rest.find(is_marker).unwrap_or(rest.len());
            if end > 0 {
                selector.tag = Some(rest[..end].to_ascii_lowercase());
            }
            rest = &rest[end..];
        }

        while let Some(marker) = rest.chars().next() {
            let body = &rest[marker.len_utf8()..];
            let end = body.find(is_marker).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return Err(TraversalError::selector_syntax(text, "dangling '#' or '.'"));
            }
            match marker {
                '#' => selector.id = Some(name.to_string()),
                '.' => selector.classes.push(name.to_string()),
                _ => return Err(TraversalError::selector_syntax(text, "unexpected character")),
            }
            rest = &body[end..];
        }

        let valid = |s: &str| {
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };
        let names_ok = selector.tag.as_deref().map_or(true, valid)
            && selector.id.as_deref().map_or(true, valid)
            && selector.classes.iter().all(|c| valid(c));
        if !names_ok {
            return Err(TraversalError::selector_syntax(text, "unsupported syntax"));
        }
        Ok(selector)
    }
}

fn is_marker(c: char) -> bool {
    c == '#' || c == '.'
}

/// Compile or panic, for tests
pub fn sel(text: &str) -> SimpleSelector {
    SimpleCompiler.compile(text).unwrap()
}

/// Element snapshot node: `el("li", &[("id", "a")], vec![...])`
pub fn el(tag: &str, attrs: &[(&str, &str)], children: Vec<Value>) -> Value {
    let flat: Vec<&str> = attrs.iter().flat_map(|(k, v)| [*k, *v]).collect();
    json!({
        "backendNodeId": 0,
        "nodeType": 1,
        "nodeName": tag.to_ascii_uppercase(),
        "attributes": flat,
        "children": children,
    })
}

pub fn text(value: &str) -> Value {
    json!({ "backendNodeId": 0, "nodeType": 3, "nodeName": "#text", "nodeValue": value })
}

pub fn comment(value: &str) -> Value {
    json!({ "backendNodeId": 0, "nodeType": 8, "nodeName": "#comment", "nodeValue": value })
}

/// Load a document whose children are `children`, numbering backend ids
/// in pre-order
pub fn document(children: Vec<Value>) -> DomArena {
    let mut root = json!({
        "backendNodeId": 0,
        "nodeType": 9,
        "nodeName": "#document",
        "children": children,
    });
    let mut next_id = 1;
    number(&mut root, &mut next_id);
    SnapshotLoader::new().load(&json!({ "root": root })).unwrap()
}

fn number(node: &mut Value, next_id: &mut u64) {
    node["backendNodeId"] = json!(*next_id);
    *next_id += 1;
    if let Some(children) = node["children"].as_array_mut() {
        for child in children {
            number(child, next_id);
        }
    }
}

/// Node with the given `id` attribute
pub fn by_id(arena: &DomArena, id: &str) -> NodeId {
    arena.find_by_id(id).unwrap()
}

/// Readable labels for `nodes`, such as `p#a.item` or `#comment "c"`
pub fn labels(arena: &DomArena, nodes: &[NodeId]) -> Vec<String> {
    DomSerializer::new().labels(arena, nodes).unwrap()
}

/// Nodes with the given `id` attributes, in the order given
pub fn ids(arena: &DomArena, names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|name| by_id(arena, name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_accepts_compounds() {
        let compiled = sel("LI.item.first#a");
        assert_eq!(compiled.tag.as_deref(), Some("li"));
        assert_eq!(compiled.id.as_deref(), Some("a"));
        assert_eq!(compiled.classes, vec!["item", "first"]);
        assert_eq!(sel("*"), SimpleSelector::default());
    }

    #[test]
    fn test_compiler_rejects_garbage() {
        for bad in ["", "   ", "div >", "li.", "#", "p:first", "a[href]", "*é", "p#é"] {
            assert!(
                matches!(
                    SimpleCompiler.compile(bad),
                    Err(TraversalError::SelectorSyntax { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_compiler_rejects_multibyte_marker() {
        let err = SimpleCompiler.compile("*éx").unwrap_err();
        assert!(matches!(
            err,
            TraversalError::SelectorSyntax { ref reason, .. } if reason == "unexpected character"
        ));
    }

    #[test]
    fn test_document_numbers_nodes() {
        let arena = document(vec![el("div", &[("id", "x")], vec![text("t")])]);
        assert_eq!(arena.len(), 3);
        let div = by_id(&arena, "x");
        assert!(sel("div#x").matches(&arena, div));
        assert!(!sel("span").matches(&arena, div));
    }
}
