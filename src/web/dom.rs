/// Real DOM adapter for the game page
use js_sys::{Array, Reflect};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node};

use crate::error::{Error, Result};
use crate::host::{HostPage, PageNode};

// Accessor the game exposes on `window.IC`
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = IC, js_name = getInstances)]
    fn get_instances() -> std::result::Result<Array, JsValue>;
}

pub fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| Error::Host("no document".to_string()))
}

/// First element matching `selector`, or an error naming it
pub fn query(document: &Document, selector: &str) -> Result<Element> {
    document
        .query_selector(selector)
        .map_err(|e| Error::host(selector, e))?
        .ok_or_else(|| Error::Host(format!("{} not found", selector)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomNode(Node);

impl DomNode {
    pub fn new(node: Node) -> Self {
        DomNode(node)
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    fn element(&self) -> Option<&Element> {
        self.0.dyn_ref::<Element>()
    }
}

impl PageNode for DomNode {
    fn is_element(&self) -> bool {
        self.0.dyn_ref::<HtmlElement>().is_some()
    }

    fn has_class(&self, class: &str) -> bool {
        self.element().is_some_and(|element| element.class_list().contains(class))
    }

    fn has_descendant(&self, selector: &str) -> bool {
        self.element()
            .is_some_and(|element| matches!(element.query_selector(selector), Ok(Some(_))))
    }

    fn first_element_child(&self) -> Option<DomNode> {
        self.element()?
            .first_element_child()
            .map(|child| DomNode(child.into()))
    }

    fn label_text(&self) -> Option<String> {
        self.0
            .child_nodes()
            .item(1)?
            .text_content()
            .filter(|text| !text.is_empty())
    }

    fn set_text_color(&self, css_color: &str) {
        if let Some(element) = self.0.dyn_ref::<HtmlElement>() {
            if let Err(e) = element.style().set_property("color", css_color) {
                warn!("Could not set color: {:?}", e);
            }
        }
    }
}

/// The live game document
#[derive(Debug, Clone)]
pub struct DocumentPage {
    document: Document,
}

impl DocumentPage {
    pub fn new(document: Document) -> Self {
        DocumentPage { document }
    }
}

impl HostPage for DocumentPage {
    type Node = DomNode;

    fn find_instance(&self, node: &DomNode) -> Option<DomNode> {
        let instances = match get_instances() {
            Ok(instances) => instances,
            Err(e) => {
                debug!("IC.getInstances() not available yet: {:?}", e);
                return None;
            }
        };

        instances
            .iter()
            .filter_map(|instance| Reflect::get(&instance, &JsValue::from_str("element")).ok())
            .filter_map(|element| element.dyn_into::<Node>().ok())
            .find(|element| element.is_same_node(Some(node.node())))
            .map(DomNode)
    }

    fn query_all(&self, selector: &str) -> Vec<DomNode> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .map(DomNode)
                .collect(),
            Err(e) => {
                warn!("querySelectorAll({}) failed: {:?}", selector, e);
                Vec::new()
            }
        }
    }
}
