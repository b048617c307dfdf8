//! HTML serialization (document tree → HTML fragment)
//!
//! Pipeline: document tree → RcDom → HTML string. The html5ever serializer
//! escapes every text node, so embedded raw HTML travels through the DOM
//! as marker comments and is spliced back into the output afterwards.

use crate::ast::Node as TreeNode;
use crate::error::TransformError;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const RAW_MARKER: &str = "mdfields-raw-";

/// Serialize a document tree to an HTML fragment.
///
/// Output is the concatenation of the serialized top-level nodes with no
/// surrounding document shell.
pub fn serialize_to_html(tree: &TreeNode) -> Result<String, TransformError> {
    let mut raw_chunks = Vec::new();
    let dom = build_dom(tree, &mut raw_chunks);
    let html = serialize_dom(&dom)?;
    Ok(splice_raw(html, &raw_chunks))
}

/// Build an RcDom from the document tree, stashing raw HTML chunks aside.
fn build_dom(tree: &TreeNode, raw_chunks: &mut Vec<String>) -> RcDom {
    let dom = RcDom::default();
    for child in tree.children() {
        let handle = build_node(child, raw_chunks);
        dom.document.children.borrow_mut().push(handle);
    }
    dom
}

fn build_node(node: &TreeNode, raw_chunks: &mut Vec<String>) -> Handle {
    match node {
        TreeNode::Text { value } => create_text(value),
        TreeNode::Raw { value } => {
            let marker = format!("{RAW_MARKER}{}", raw_chunks.len());
            raw_chunks.push(value.clone());
            create_comment(&marker)
        }
        TreeNode::Element {
            tag_name,
            properties,
            children,
        } => {
            let attrs: Vec<(&str, &str)> = properties
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            let element = create_element(tag_name, attrs);
            for child in children {
                let handle = build_node(child, raw_chunks);
                element.children.borrow_mut().push(handle);
            }
            element
        }
        TreeNode::Root { children } => {
            // Nested roots do not normally occur; flatten into a div.
            let div = create_element("div", vec![]);
            for child in children {
                let handle = build_node(child, raw_chunks);
                div.children.borrow_mut().push(handle);
            }
            div
        }
    }
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Create a comment node
fn create_comment(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Comment {
            contents: text.to_string().into(),
        },
    })
}

/// Serialize each top-level node of the DOM in order.
fn serialize_dom(dom: &RcDom) -> Result<String, TransformError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in dom.document.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            TransformError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| TransformError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Replace raw marker comments with their original HTML.
fn splice_raw(mut html: String, raw_chunks: &[String]) -> String {
    for (index, chunk) in raw_chunks.iter().enumerate() {
        let marker = format!("<!--{RAW_MARKER}{index}-->");
        html = html.replace(&marker, chunk);
    }
    html
}
