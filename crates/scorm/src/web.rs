//! Browser binding for the host traits (wasm32 only).

use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use crate::error::HostError;
use crate::host::{HostWindow, LmsApi, LmsMethod, ParentLink};

/// Window property under which SCORM 1.2 LMSs expose their API object.
pub const API_PROPERTY: &str = "API";

fn threw(err: JsValue) -> HostError {
    HostError::Threw(describe(&err))
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

//
// ─── WINDOW ────────────────────────────────────────────────────────────────────
//

/// A `window` (or frame) object in the page's frame tree.
pub struct BrowserWindow {
    inner: Window,
}

impl BrowserWindow {
    /// The window this module is running in.
    #[must_use]
    pub fn current() -> Option<Self> {
        web_sys::window().map(|inner| Self { inner })
    }

    /// `location.href`, used to read launch options.
    #[must_use]
    pub fn href(&self) -> Option<String> {
        self.inner.location().href().ok()
    }
}

impl HostWindow for BrowserWindow {
    fn lms_api(&self) -> Option<Rc<dyn LmsApi>> {
        // Cross-origin windows throw on property access; that reads as absent.
        let value = Reflect::get(&self.inner, &JsValue::from_str(API_PROPERTY)).ok()?;
        if is_absent(&value) {
            return None;
        }
        Some(Rc::new(JsLmsApi { inner: value }))
    }

    fn parent(&self) -> ParentLink {
        match self.inner.parent() {
            Ok(Some(parent)) if Object::is(&parent, &self.inner) => ParentLink::Top,
            Ok(Some(parent)) => ParentLink::Frame(Rc::new(Self { inner: parent })),
            Ok(None) | Err(_) => ParentLink::Detached,
        }
    }

    fn opener(&self) -> Option<Rc<dyn HostWindow>> {
        let value = self.inner.opener().ok()?;
        if is_absent(&value) {
            return None;
        }
        Some(Rc::new(Self {
            inner: value.unchecked_into::<Window>(),
        }))
    }

    fn reload_top(&self) -> Result<(), HostError> {
        let top = self
            .inner
            .top()
            .map_err(threw)?
            .ok_or(HostError::Unavailable("top window"))?;
        top.location().reload().map_err(threw)
    }

    fn reload(&self) -> Result<(), HostError> {
        self.inner.location().reload().map_err(threw)
    }

    fn on_unload(&self, handler: Box<dyn FnMut()>) {
        let closure = Closure::wrap(handler);
        if let Err(err) = self
            .inner
            .add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref())
        {
            warn!(error = %describe(&err), "could not register unload handler");
            return;
        }
        // Lives as long as the page.
        closure.forget();
    }
}

//
// ─── API OBJECT ────────────────────────────────────────────────────────────────
//

/// The LMS API object found on some window in the tree.
struct JsLmsApi {
    inner: JsValue,
}

impl JsLmsApi {
    fn method(&self, method: LmsMethod) -> Result<Function, HostError> {
        let value =
            Reflect::get(&self.inner, &JsValue::from_str(method.js_name())).map_err(threw)?;
        // `typeof` check: the function belongs to another frame's realm.
        if !value.is_function() {
            return Err(HostError::Unavailable(method.js_name()));
        }
        Ok(value.unchecked_into::<Function>())
    }

    fn call_with_empty(&self, method: LmsMethod) -> Result<String, HostError> {
        let reply = self
            .method(method)?
            .call1(&self.inner, &JsValue::from_str(""))
            .map_err(threw)?;
        Ok(describe(&reply))
    }
}

impl LmsApi for JsLmsApi {
    fn initialize(&self) -> Result<String, HostError> {
        self.call_with_empty(LmsMethod::Initialize)
    }

    fn set_value(&self, element: &str, value: &str) -> Result<String, HostError> {
        let reply = self
            .method(LmsMethod::SetValue)?
            .call2(
                &self.inner,
                &JsValue::from_str(element),
                &JsValue::from_str(value),
            )
            .map_err(threw)?;
        Ok(describe(&reply))
    }

    fn commit(&self) -> Result<String, HostError> {
        self.call_with_empty(LmsMethod::Commit)
    }

    fn finish(&self) -> Result<String, HostError> {
        self.call_with_empty(LmsMethod::Finish)
    }

    fn last_error(&self) -> Result<String, HostError> {
        let reply = self
            .method(LmsMethod::GetLastError)?
            .call0(&self.inner)
            .map_err(threw)?;
        Ok(describe(&reply))
    }
}
