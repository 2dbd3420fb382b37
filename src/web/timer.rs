use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::describe;
use crate::effect::{EffectId, EffectManager};
use crate::error::EffectError;
use crate::schedule::{Scheduler, TimerHandle};

struct PendingTimeout {
    timeout_id: i32,
    _callback: Closure<dyn FnMut()>,
}

/// Scheduler backed by `setTimeout` / `clearTimeout`.
///
/// Fired callbacks reach the manager through a weak reference, so a freed
/// manager simply stops receiving expiries. A callback's closure is kept
/// until the next `schedule` call, since it can't be dropped while running.
pub struct TimeoutScheduler {
    window: Window,
    manager: Weak<RefCell<EffectManager>>,
    next: u64,
    pending: HashMap<TimerHandle, PendingTimeout>,
    fired: Rc<RefCell<Vec<TimerHandle>>>,
}

impl TimeoutScheduler {
    /// Scheduler that expires effects on `manager`.
    #[must_use]
    pub fn new(window: Window, manager: Weak<RefCell<EffectManager>>) -> Self {
        Self {
            window,
            manager,
            next: 0,
            pending: HashMap::new(),
            fired: Rc::default(),
        }
    }

    fn reap(&mut self) {
        let fired: Vec<TimerHandle> = self.fired.borrow_mut().drain(..).collect();
        for handle in fired {
            let _ = self.pending.remove(&handle);
        }
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(
        &mut self,
        delay: Duration,
        id: EffectId,
    ) -> Result<TimerHandle, EffectError> {
        self.reap();
        let handle = TimerHandle(self.next);
        self.next += 1;

        let manager = self.manager.clone();
        let fired = Rc::clone(&self.fired);
        let callback = Closure::<dyn FnMut()>::new(move || {
            fired.borrow_mut().push(handle);
            let Some(manager) = manager.upgrade() else {
                return;
            };
            match manager.try_borrow_mut() {
                Ok(mut manager) => {
                    let _ = manager.expire(id);
                }
                Err(_) => log::warn!("{id} expired while the manager was busy"),
            };
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let timeout_id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )
            .map_err(|e| EffectError::Schedule(describe(&e)))?;
        let _ = self.pending.insert(
            handle,
            PendingTimeout {
                timeout_id,
                _callback: callback,
            },
        );
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(pending) = self.pending.remove(&handle) {
            self.window.clear_timeout_with_handle(pending.timeout_id);
        }
    }
}
