//! In-memory host: a scriptable LMS API and frame tree.
//!
//! Used by tests across the workspace and for offline runs where no browser
//! host exists. Every call is recorded so tests can assert on exact traffic.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use crate::error::HostError;
use crate::host::{HostWindow, LmsApi, LmsMethod, ParentLink};

/// Error code reported by `LMSGetLastError` after a scripted rejection.
pub const REJECTED_ERROR_CODE: &str = "405";

//
// ─── API ───────────────────────────────────────────────────────────────────────
//

/// One recorded call against a [`MemoryApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LmsCall {
    pub method: LmsMethod,
    pub element: Option<String>,
    pub value: Option<String>,
}

/// Scriptable LMS API that records calls and stores accepted values.
#[derive(Debug, Default)]
pub struct MemoryApi {
    calls: RefCell<Vec<LmsCall>>,
    values: RefCell<BTreeMap<String, String>>,
    replies: RefCell<HashMap<LmsMethod, String>>,
    throws: RefCell<HashSet<LmsMethod>>,
    rejected: RefCell<HashSet<String>>,
    last_error: RefCell<String>,
}

impl MemoryApi {
    /// An API that accepts everything.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            last_error: RefCell::new("0".to_string()),
            ..Self::default()
        })
    }

    /// Override the reply for a method (e.g. `"false"` for `Initialize`).
    pub fn reply_with(&self, method: LmsMethod, reply: impl Into<String>) {
        self.replies.borrow_mut().insert(method, reply.into());
    }

    /// Make every call to `method` throw.
    pub fn throw_on(&self, method: LmsMethod) {
        self.throws.borrow_mut().insert(method);
    }

    /// Reject writes to a single element with `"false"`.
    pub fn reject_element(&self, element: &str) {
        self.rejected.borrow_mut().insert(element.to_string());
    }

    #[must_use]
    pub fn calls(&self) -> Vec<LmsCall> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    #[must_use]
    pub fn count(&self, method: LmsMethod) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Elements written with `LMSSetValue`, in call order.
    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.method == LmsMethod::SetValue)
            .filter_map(|call| Some((call.element.clone()?, call.value.clone()?)))
            .collect()
    }

    /// Last accepted value of an element.
    #[must_use]
    pub fn value(&self, element: &str) -> Option<String> {
        self.values.borrow().get(element).cloned()
    }

    fn record(&self, method: LmsMethod, element: Option<&str>, value: Option<&str>) {
        self.calls.borrow_mut().push(LmsCall {
            method,
            element: element.map(str::to_string),
            value: value.map(str::to_string),
        });
    }

    fn reply(&self, method: LmsMethod) -> Result<String, HostError> {
        if self.throws.borrow().contains(&method) {
            return Err(HostError::Threw(format!("{method} exploded")));
        }
        Ok(self
            .replies
            .borrow()
            .get(&method)
            .cloned()
            .unwrap_or_else(|| "true".to_string()))
    }
}

impl LmsApi for MemoryApi {
    fn initialize(&self) -> Result<String, HostError> {
        self.record(LmsMethod::Initialize, None, None);
        self.reply(LmsMethod::Initialize)
    }

    fn set_value(&self, element: &str, value: &str) -> Result<String, HostError> {
        self.record(LmsMethod::SetValue, Some(element), Some(value));
        let reply = self.reply(LmsMethod::SetValue)?;
        if self.rejected.borrow().contains(element) {
            *self.last_error.borrow_mut() = REJECTED_ERROR_CODE.to_string();
            return Ok("false".to_string());
        }
        if reply == "true" {
            self.values
                .borrow_mut()
                .insert(element.to_string(), value.to_string());
        }
        Ok(reply)
    }

    fn commit(&self) -> Result<String, HostError> {
        self.record(LmsMethod::Commit, None, None);
        self.reply(LmsMethod::Commit)
    }

    fn finish(&self) -> Result<String, HostError> {
        self.record(LmsMethod::Finish, None, None);
        self.reply(LmsMethod::Finish)
    }

    fn last_error(&self) -> Result<String, HostError> {
        self.record(LmsMethod::GetLastError, None, None);
        if self.throws.borrow().contains(&LmsMethod::GetLastError) {
            return Err(HostError::Threw("LMSGetLastError exploded".to_string()));
        }
        Ok(self.last_error.borrow().clone())
    }
}

//
// ─── WINDOW ────────────────────────────────────────────────────────────────────
//

/// Which context a reload was issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTarget {
    Top,
    Current,
}

#[derive(Default)]
enum MemoryParent {
    #[default]
    Detached,
    Top,
    Frame(Rc<MemoryWindow>),
}

/// A window or frame in an in-memory frame tree.
#[derive(Default)]
pub struct MemoryWindow {
    api: RefCell<Option<Rc<dyn LmsApi>>>,
    parent: RefCell<MemoryParent>,
    opener: RefCell<Option<Rc<MemoryWindow>>>,
    api_lookups: Cell<usize>,
    top_reload_error: RefCell<Option<HostError>>,
    reload_error: RefCell<Option<HostError>>,
    reloads: RefCell<Vec<ReloadTarget>>,
    unload_handlers: RefCell<Vec<Box<dyn FnMut()>>>,
}

impl MemoryWindow {
    /// A top-level window (its own parent).
    #[must_use]
    pub fn top() -> Rc<Self> {
        let window = Self::default();
        *window.parent.borrow_mut() = MemoryParent::Top;
        Rc::new(window)
    }

    /// A window with no parent reference at all.
    #[must_use]
    pub fn detached() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// A frame nested directly inside `parent`.
    #[must_use]
    pub fn frame_in(parent: &Rc<MemoryWindow>) -> Rc<Self> {
        let window = Self::default();
        *window.parent.borrow_mut() = MemoryParent::Frame(Rc::clone(parent));
        Rc::new(window)
    }

    /// Builds `levels` nested windows. Index 0 is the innermost frame, the
    /// last entry is the top window.
    #[must_use]
    pub fn frame_chain(levels: usize) -> Vec<Rc<MemoryWindow>> {
        let mut chain = vec![Self::top()];
        for _ in 1..levels.max(1) {
            let outer = chain.last().map(Rc::clone).unwrap_or_else(Self::top);
            chain.push(Self::frame_in(&outer));
        }
        chain.reverse();
        chain
    }

    pub fn set_api(&self, api: Rc<dyn LmsApi>) {
        *self.api.borrow_mut() = Some(api);
    }

    pub fn clear_api(&self) {
        *self.api.borrow_mut() = None;
    }

    pub fn set_opener(&self, opener: &Rc<MemoryWindow>) {
        *self.opener.borrow_mut() = Some(Rc::clone(opener));
    }

    /// Make `reload_top` fail, as a cross-origin top would.
    pub fn block_top_reload(&self, error: HostError) {
        *self.top_reload_error.borrow_mut() = Some(error);
    }

    pub fn block_reload(&self, error: HostError) {
        *self.reload_error.borrow_mut() = Some(error);
    }

    /// Number of times the `API` property was read on this window.
    #[must_use]
    pub fn api_lookups(&self) -> usize {
        self.api_lookups.get()
    }

    #[must_use]
    pub fn reloads(&self) -> Vec<ReloadTarget> {
        self.reloads.borrow().clone()
    }

    /// Simulates the page being discarded: runs every unload handler.
    pub fn fire_unload(&self) {
        let mut handlers = std::mem::take(&mut *self.unload_handlers.borrow_mut());
        for handler in &mut handlers {
            handler();
        }
        let mut slot = self.unload_handlers.borrow_mut();
        handlers.append(&mut slot);
        *slot = handlers;
    }
}

impl HostWindow for MemoryWindow {
    fn lms_api(&self) -> Option<Rc<dyn LmsApi>> {
        self.api_lookups.set(self.api_lookups.get() + 1);
        self.api.borrow().clone()
    }

    fn parent(&self) -> ParentLink {
        match &*self.parent.borrow() {
            MemoryParent::Detached => ParentLink::Detached,
            MemoryParent::Top => ParentLink::Top,
            MemoryParent::Frame(parent) => ParentLink::Frame(Rc::clone(parent) as Rc<dyn HostWindow>),
        }
    }

    fn opener(&self) -> Option<Rc<dyn HostWindow>> {
        self.opener
            .borrow()
            .as_ref()
            .map(|opener| Rc::clone(opener) as Rc<dyn HostWindow>)
    }

    fn reload_top(&self) -> Result<(), HostError> {
        if let Some(err) = self.top_reload_error.borrow().clone() {
            return Err(err);
        }
        self.reloads.borrow_mut().push(ReloadTarget::Top);
        Ok(())
    }

    fn reload(&self) -> Result<(), HostError> {
        if let Some(err) = self.reload_error.borrow().clone() {
            return Err(err);
        }
        self.reloads.borrow_mut().push(ReloadTarget::Current);
        Ok(())
    }

    fn on_unload(&self, handler: Box<dyn FnMut()>) {
        self.unload_handlers.borrow_mut().push(handler);
    }
}
