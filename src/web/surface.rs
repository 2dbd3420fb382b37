use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Node};

use super::describe;
use crate::effect::EffectId;
use crate::error::EffectError;
use crate::style::SUPPRESSED_CLASS;
use crate::surface::{EffectElement, Surface};

fn surface_err(e: &JsValue) -> EffectError {
    EffectError::Surface(describe(e))
}

/// Surface backed by the live DOM.
///
/// Effects are `div`s appended to `document.body`; the stylesheet is a
/// single `<style>` in `document.head`.
pub struct DomSurface {
    document: Document,
    body: HtmlElement,
    style: Option<Element>,
    elements: HashMap<EffectId, HtmlElement>,
}

impl DomSurface {
    /// Bind to `document`. Fails when the page has no body yet.
    pub fn new(document: &Document) -> Result<Self, EffectError> {
        let body = document.body().ok_or_else(|| {
            EffectError::Surface("document has no body".to_owned())
        })?;
        Ok(Self {
            document: document.clone(),
            body,
            style: None,
            elements: HashMap::new(),
        })
    }

    fn create(&self, tag: &str) -> Result<HtmlElement, EffectError> {
        self.document
            .create_element(tag)
            .map_err(|e| surface_err(&e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| EffectError::Surface(format!("<{tag}> is not an HtmlElement")))
    }
}

impl Surface for DomSurface {
    fn install_style(&mut self, css: &str) -> Result<(), EffectError> {
        let style = self.create("style")?;
        style.set_text_content(Some(css));
        let parent: Node = match self.document.head() {
            Some(head) => head.into(),
            None => self.body.clone().into(),
        };
        let _ = parent.append_child(&style).map_err(|e| surface_err(&e))?;
        self.style = Some(style.into());
        Ok(())
    }

    fn update_style(&mut self, css: &str) -> Result<(), EffectError> {
        let style = self.style.as_ref().ok_or_else(|| {
            EffectError::Surface("no stylesheet installed".to_owned())
        })?;
        style.set_text_content(Some(css));
        Ok(())
    }

    fn append(&mut self, element: &EffectElement) -> Result<(), EffectError> {
        let node = self.create("div")?;
        node.set_class_name(&element.class_name());
        let css = node.style();
        let px = |v: f64| format!("{v}px");
        css.set_property("left", &px(element.position.x))
            .map_err(|e| surface_err(&e))?;
        css.set_property("top", &px(element.position.y))
            .map_err(|e| surface_err(&e))?;
        if let Some(size) = element.size {
            css.set_property("width", &px(size))
                .map_err(|e| surface_err(&e))?;
            css.set_property("height", &px(size))
                .map_err(|e| surface_err(&e))?;
        }
        let _ = self.body.append_child(&node).map_err(|e| surface_err(&e))?;
        let _ = self.elements.insert(element.id, node);
        Ok(())
    }

    fn remove(&mut self, id: EffectId) -> Result<(), EffectError> {
        let Some(node) = self.elements.remove(&id) else {
            return Ok(());
        };
        // Host scripts may have detached it already
        if let Some(parent) = node.parent_node() {
            let _ = parent.remove_child(&node).map_err(|e| surface_err(&e))?;
        }
        Ok(())
    }

    fn set_suppressed(&mut self, suppressed: bool) -> Result<(), EffectError> {
        let _ = self
            .body
            .class_list()
            .toggle_with_force(SUPPRESSED_CLASS, suppressed)
            .map_err(|e| surface_err(&e))?;
        Ok(())
    }
}
