//! `setTimeout`-backed scheduler for the focus decay timer.

use fnv::FnvHashMap;
use globe_core::{Scheduler, TimerCallback, TimerId};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Pending {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

#[derive(Default)]
pub struct WebScheduler {
    next_id: u64,
    pending: Rc<RefCell<FnvHashMap<TimerId, Pending>>>,
}

impl Scheduler for WebScheduler {
    fn schedule(&mut self, delay: Duration, on_fire: TimerCallback) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);

        let pending = Rc::downgrade(&self.pending);
        let mut on_fire = Some(on_fire);
        let closure = Closure::wrap(Box::new(move || {
            let Some(on_fire) = on_fire.take() else {
                return;
            };
            if let Some(pending) = pending.upgrade() {
                let spent = pending.borrow_mut().remove(&id);
                on_fire(id);
                drop(spent);
            }
        }) as Box<dyn FnMut()>);

        let Some(window) = web::window() else {
            log::error!("[timer] no window; {:?} will never fire", id);
            return id;
        };
        let millis = delay.as_millis().min(i32::MAX as u128) as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            millis,
        ) {
            Ok(handle) => {
                self.pending.borrow_mut().insert(
                    id,
                    Pending {
                        handle,
                        _closure: closure,
                    },
                );
                log::debug!("[timer] armed {:?} for {}ms", id, millis);
            }
            Err(e) => log::error!("[timer] setTimeout failed: {:?}", e),
        }
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let removed = self.pending.borrow_mut().remove(&id);
        if let Some(p) = removed {
            clear(p.handle);
        }
    }
}

impl Drop for WebScheduler {
    fn drop(&mut self) {
        for (_, p) in self.pending.borrow_mut().drain() {
            clear(p.handle);
        }
    }
}

fn clear(handle: i32) {
    if let Some(w) = web::window() {
        w.clear_timeout_with_handle(handle);
    }
}
