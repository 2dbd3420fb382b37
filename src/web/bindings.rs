//! JS-facing handle.
//!
//! From a page script:
//!
//! ```js
//! import init, { installMouseEffect } from "./pointer_fx.js";
//! await init();
//! installMouseEffect(JSON.stringify({ ripple: { max_count: 8 } }));
//! window.mouseEffect.changeColor("#FF0000");
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, MouseEvent};

use super::{DomSurface, TimeoutScheduler, WebAudioTonePlayer};
use crate::effect::{EffectManager, Host, Position};
use crate::error::EffectError;
use crate::options::Options;
use crate::platform::UserAgent;
use crate::schedule::InstantClock;

type Listener = Closure<dyn FnMut(MouseEvent)>;

fn to_js(e: &EffectError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialized when a second handle is created
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Live pointer effects on the current page.
///
/// Freeing the handle detaches its listeners and removes every effect still
/// on screen.
#[wasm_bindgen]
pub struct MouseEffect {
    manager: Rc<RefCell<EffectManager>>,
    document: Document,
    listeners: Vec<(&'static str, Listener)>,
}

#[wasm_bindgen]
impl MouseEffect {
    /// Build from optional JSON options and start listening on `document`.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Result<MouseEffect, JsValue> {
        init_logging();
        let options = match options_json {
            Some(json) => Options::from_json(&json).map_err(|e| to_js(&e))?,
            None => Options::default(),
        };
        let window = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let user_agent =
            UserAgent(window.navigator().user_agent().unwrap_or_default());
        let surface = DomSurface::new(&document).map_err(|e| to_js(&e))?;

        let manager = Rc::new_cyclic(|weak| {
            let host = Host {
                surface: Box::new(surface),
                clock: Box::new(InstantClock::new()),
                scheduler: Box::new(TimeoutScheduler::new(
                    window.clone(),
                    weak.clone(),
                )),
                tone: Box::new(WebAudioTonePlayer::new()),
            };
            RefCell::new(EffectManager::new(options, host, &user_agent))
        });

        let mut effect = Self {
            manager,
            document,
            listeners: Vec::new(),
        };
        effect.subscribe().map_err(|e| to_js(&e))?;
        Ok(effect)
    }

    /// Hide effects without detaching listeners.
    pub fn disable(&self) {
        self.manager.borrow_mut().disable();
    }

    /// Show effects again.
    pub fn enable(&self) {
        self.manager.borrow_mut().enable();
    }

    /// Recolor ripples, including those already on screen.
    #[wasm_bindgen(js_name = changeColor)]
    pub fn change_color(&self, color: &str) {
        self.manager.borrow_mut().change_color(color);
    }

    /// Current options as JSON.
    pub fn config(&self) -> Result<String, JsValue> {
        self.manager.borrow().options().to_json().map_err(|e| to_js(&e))
    }

    /// Whether the effects were disabled for this device.
    #[wasm_bindgen(getter, js_name = isInert)]
    pub fn is_inert(&self) -> bool {
        self.manager.borrow().is_inert()
    }
}

impl MouseEffect {
    fn subscribe(&mut self) -> Result<(), EffectError> {
        let wanted = self.manager.borrow().subscriptions();
        if wanted.click {
            self.listen("click", EffectManager::handle_click)?;
        }
        if wanted.pointer_move {
            self.listen("mousemove", EffectManager::handle_pointer_move)?;
        }
        Ok(())
    }

    fn listen(
        &mut self,
        event: &'static str,
        handler: fn(&mut EffectManager, Position),
    ) -> Result<(), EffectError> {
        let manager = Rc::downgrade(&self.manager);
        let listener = Listener::new(move |evt: MouseEvent| {
            let Some(manager) = manager.upgrade() else {
                return;
            };
            if let Ok(mut manager) = manager.try_borrow_mut() {
                handler(&mut manager, Position::from(&evt));
            };
        });
        self.document
            .add_event_listener_with_callback(
                event,
                listener.as_ref().unchecked_ref(),
            )
            .map_err(|e| EffectError::Surface(super::describe(&e)))?;
        self.listeners.push((event, listener));
        Ok(())
    }
}

impl Drop for MouseEffect {
    fn drop(&mut self) {
        for (event, listener) in &self.listeners {
            let _ = self.document.remove_event_listener_with_callback(
                event,
                listener.as_ref().unchecked_ref(),
            );
        }
        if let Ok(mut manager) = self.manager.try_borrow_mut() {
            manager.clear();
        }
    }
}

/// Install effects on the page and expose them as `window.mouseEffect`.
///
/// Returns `false`, leaving `window.mouseEffect` unset, when the device is
/// mobile and `platform.disable_on_mobile` is on.
#[wasm_bindgen(js_name = installMouseEffect)]
pub fn install_mouse_effect(options_json: Option<String>) -> Result<bool, JsValue> {
    let effect = MouseEffect::new(options_json)?;
    if effect.is_inert() {
        return Ok(false);
    }
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let _ = js_sys::Reflect::set(
        &window,
        &JsValue::from_str("mouseEffect"),
        &JsValue::from(effect),
    )?;
    Ok(true)
}
