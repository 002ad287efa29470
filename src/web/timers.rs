/// `window.setInterval` / `window.setTimeout` behind the `Timers` seam
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::error::{Error, Result};
use crate::refresh::Timers;

pub struct WindowTimers {
    window: Window,
}

impl WindowTimers {
    pub fn new(window: Window) -> Self {
        WindowTimers { window }
    }
}

/// Keeps the interval closure alive until cleared
pub struct IntervalHandle {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

fn millis(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

impl Timers for WindowTimers {
    type Interval = IntervalHandle;

    fn every(&self, ms: u32, callback: Box<dyn FnMut()>) -> Result<IntervalHandle> {
        let callback = Closure::wrap(callback);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), millis(ms))
            .map_err(|e| Error::host("setInterval", e))?;

        Ok(IntervalHandle {
            id,
            _callback: callback,
        })
    }

    fn cancel(&self, interval: IntervalHandle) {
        self.window.clear_interval_with_handle(interval.id);
    }

    fn once(&self, ms: u32, callback: Box<dyn FnOnce()>) -> Result<()> {
        let callback = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis(ms))
            .map_err(|e| Error::host("setTimeout", e))?;
        Ok(())
    }
}
