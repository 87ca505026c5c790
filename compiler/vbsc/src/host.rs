//! Host values seeded into every render.
//!
//! Host names live in their own root frame, read-only and frozen; the page
//! runs in a child of it, so a script can read `Response` but cannot
//! reassign it or declare names next to it.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::debug;
use vbs_eval::errors::arity;
use vbs_eval::{ContextId, Environment, EvalResult, ObjectValue, Slot, Value};
use vbs_ir::Name;

/// Names and values installed in the host frame, in insertion order.
#[derive(Debug, Default)]
pub struct HostEnvironment {
    entries: Vec<(Name, Value)>,
}

impl HostEnvironment {
    pub fn new() -> Self {
        HostEnvironment::default()
    }

    /// Add or replace a host value.
    pub fn insert(&mut self, name: &str, value: Value) {
        let name = Name::new(name);
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.is(name))
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Create the frozen host frame in `env`.
    pub fn install(&self, env: &mut Environment) -> EvalResult<ContextId> {
        let root = env.push_root();
        for (name, value) in &self.entries {
            env.declare_readonly(root, name.clone(), value.clone())?;
        }
        env.freeze(root);
        debug!(names = self.entries.len(), "host installed");
        Ok(root)
    }
}

/// What a page wrote through `Response`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub body: String,
    pub headers: Vec<(String, String)>,
}

/// Shared handle to the output of one render.
#[derive(Clone, Debug, Default)]
pub struct ResponseBuffer(Rc<RefCell<Response>>);

impl ResponseBuffer {
    pub fn new() -> Self {
        ResponseBuffer::default()
    }

    pub fn body(&self) -> String {
        self.0.borrow().body.clone()
    }

    pub fn headers(&self) -> Vec<(String, String)> {
        self.0.borrow().headers.clone()
    }

    /// Take the collected output, leaving the buffer empty.
    pub fn take(&self) -> Response {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    fn write(&self, text: &str) {
        self.0.borrow_mut().body.push_str(text);
    }

    fn add_header(&self, name: String, value: String) {
        self.0.borrow_mut().headers.push((name, value));
    }
}

/// The classic ASP objects: `Response`, `Request` and `RenderTime()`.
#[derive(Debug)]
pub struct AspHost {
    query: FxHashMap<String, String>,
    response: ResponseBuffer,
    started: Instant,
}

impl AspHost {
    pub fn new() -> Self {
        AspHost {
            query: FxHashMap::default(),
            response: ResponseBuffer::new(),
            started: Instant::now(),
        }
    }

    /// Add a query string parameter. Keys are case-insensitive.
    #[must_use]
    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.insert(key.to_ascii_lowercase(), value.into());
        self
    }

    pub fn response(&self) -> &ResponseBuffer {
        &self.response
    }

    /// Build the host values. Each native captures a handle to this host's
    /// state, so the values stay valid after `self` is dropped.
    pub fn environment(&self) -> HostEnvironment {
        HostEnvironment::new()
            .with("Response", self.response_object())
            .with("Request", self.request_object())
            .with("RenderTime", self.render_time())
    }

    fn response_object(&self) -> Value {
        let out = self.response.clone();
        let write = Value::native("Response.Write", move |args: &[Slot]| {
            let [value] = args else {
                return Err(arity("Response.Write", 1, args.len()));
            };
            out.write(&value.get().to_text()?);
            Ok(Slot::new(Value::Empty))
        });

        let out = self.response.clone();
        let add_header = Value::native("Response.AddHeader", move |args: &[Slot]| {
            let [name, value] = args else {
                return Err(arity("Response.AddHeader", 2, args.len()));
            };
            out.add_header(name.get().to_text()?, value.get().to_text()?);
            Ok(Slot::new(Value::Empty))
        });

        host_object([("Write", write), ("AddHeader", add_header)])
    }

    fn request_object(&self) -> Value {
        let query = self.query.clone();
        let query_string = Value::native("Request.QueryString", move |args: &[Slot]| {
            let [key] = args else {
                return Err(arity("Request.QueryString", 1, args.len()));
            };
            let key = key.get().to_text()?.to_ascii_lowercase();
            Ok(Slot::new(
                query.get(&key).map_or(Value::Empty, |value| Value::string(value.as_str())),
            ))
        });
        host_object([("QueryString", query_string)])
    }

    fn render_time(&self) -> Value {
        let started = self.started;
        Value::native("RenderTime", move |args: &[Slot]| {
            if !args.is_empty() {
                return Err(arity("RenderTime", 0, args.len()));
            }
            Ok(Slot::new(Value::Number(started.elapsed().as_secs_f64() * 1000.0)))
        })
    }
}

impl Default for AspHost {
    fn default() -> Self {
        AspHost::new()
    }
}

/// An object whose members are read-only.
fn host_object<const N: usize>(members: [(&str, Value); N]) -> Value {
    let object = ObjectValue::new();
    for (name, value) in members {
        object.insert(Name::new(name), Slot::readonly(value));
    }
    Value::object(object)
}
