//! QuickJS bridge
//!
//! Exposes form nodes to script as property-bearing objects. Host functions
//! installed on the global object exchange JSON payloads; a bootstrap script
//! evaluated at startup builds the `form` global and Proxy-based node objects
//! whose get/set/has traps forward here. Property errors come back as thrown
//! `FomError` values, catchable from script.

use std::cell::RefCell;
use std::rc::Rc;

use folio_fom::{FomDocument, NodeHandle};
use rquickjs::{Context, Ctx, Function, IntoJs, Runtime};
use serde::Serialize;

use crate::{Bindings, PropertyError, ScriptError, ScriptValue};

/// Reply payload for a property host call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum HostReply {
    Ok(ScriptValue),
    Err(ErrorReply),
}

#[derive(Debug, Serialize)]
struct ErrorReply {
    kind: &'static str,
    message: String,
}

fn error_reply(err: &PropertyError) -> HostReply {
    HostReply::Err(ErrorReply {
        kind: err.kind(),
        message: err.to_string(),
    })
}

fn stale_reply() -> HostReply {
    error_reply(&PropertyError::StaleNode)
}

fn encode_handle(h: NodeHandle) -> String {
    format!("{}:{}", h.id().value(), h.generation().value())
}

fn decode_handle(s: &str) -> Option<NodeHandle> {
    let (id, generation) = s.split_once(':')?;
    Some(NodeHandle::from_raw(
        id.parse().ok()?,
        generation.parse().ok()?,
    ))
}

/// Raise a script-catchable exception from a host function. Used for defect
/// signals (forged handles, broken payloads), not for property errors.
fn bridge_throw<T>(ctx: &Ctx<'_>, message: String) -> rquickjs::Result<T> {
    tracing::warn!("script bridge: {message}");
    let value = message.into_js(ctx)?;
    Err(ctx.throw(value))
}

fn encode_reply(ctx: &Ctx<'_>, reply: &HostReply) -> rquickjs::Result<String> {
    match serde_json::to_string(reply) {
        Ok(json) => Ok(json),
        Err(err) => bridge_throw(ctx, format!("reply encoding failed: {err}")),
    }
}

/// Embedded script engine wired to one form document
pub struct ScriptHost {
    runtime: Runtime,
    context: Context,
    doc: Rc<RefCell<FomDocument>>,
    bindings: Rc<Bindings>,
}

impl ScriptHost {
    /// Create a host for a document with the given bindings. Installs the
    /// `__folio_*` host functions and evaluates the bootstrap before
    /// returning, so any registration problem fails here and not mid-script.
    pub fn new(doc: Rc<RefCell<FomDocument>>, bindings: Bindings) -> Result<Self, ScriptError> {
        let runtime = Runtime::new().map_err(|e| ScriptError::Engine(e.to_string()))?;
        runtime.set_memory_limit(32 * 1024 * 1024);

        let context = Context::full(&runtime).map_err(|e| ScriptError::Engine(e.to_string()))?;
        let bindings = Rc::new(bindings);

        context
            .with(|ctx| install_bridge(&ctx, Rc::clone(&doc), Rc::clone(&bindings)))
            .map_err(|e| ScriptError::Engine(e.to_string()))?;

        tracing::debug!("script host ready ({} bound kind(s))", bindings.len());
        Ok(Self {
            runtime,
            context,
            doc,
            bindings,
        })
    }

    /// Evaluate script and convert the completion value
    pub fn eval(&self, code: &str) -> Result<ScriptValue, ScriptError> {
        self.context.with(|ctx| {
            let value = match ctx.eval::<rquickjs::Value, _>(code) {
                Ok(v) => v,
                Err(rquickjs::Error::Exception) => {
                    return Err(ScriptError::Exception(describe_exception(&ctx)));
                }
                Err(e) => return Err(ScriptError::Engine(e.to_string())),
            };
            Ok(from_js(&value))
        })
    }

    /// Execute script, ignoring the completion value
    pub fn exec(&self, code: &str) -> Result<(), ScriptError> {
        self.eval(code).map(|_| ())
    }

    /// The shared document
    pub fn document(&self) -> Rc<RefCell<FomDocument>> {
        Rc::clone(&self.doc)
    }

    /// The bindings this host dispatches through
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// The underlying engine runtime
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}

/// Convert an engine value into a bridge value. Node proxies identify
/// themselves through their handle property; other objects have no bridge
/// representation and collapse to undefined.
fn from_js(value: &rquickjs::Value) -> ScriptValue {
    if value.is_undefined() {
        ScriptValue::Undefined
    } else if value.is_null() {
        ScriptValue::Null
    } else if let Some(b) = value.as_bool() {
        ScriptValue::Bool(b)
    } else if let Some(n) = value.as_int() {
        ScriptValue::Number(n as f64)
    } else if let Some(n) = value.as_number() {
        ScriptValue::Number(n)
    } else if let Some(s) = value.as_string() {
        match s.to_string() {
            Ok(s) => ScriptValue::Text(s),
            Err(_) => ScriptValue::Undefined,
        }
    } else if let Some(obj) = value.as_object() {
        match obj.get::<_, String>("__folioHandle") {
            Ok(handle) => decode_handle(&handle)
                .map(ScriptValue::Node)
                .unwrap_or(ScriptValue::Undefined),
            Err(_) => ScriptValue::Undefined,
        }
    } else {
        ScriptValue::Undefined
    }
}

fn describe_exception(ctx: &Ctx<'_>) -> String {
    let caught = ctx.catch();
    if let Some(obj) = caught.as_object() {
        if let Ok(message) = obj.get::<_, String>("message") {
            return message;
        }
    }
    if let Some(s) = caught.as_string() {
        if let Ok(s) = s.to_string() {
            return s;
        }
    }
    "uncaught script exception".to_string()
}

fn install_bridge(
    ctx: &Ctx<'_>,
    doc: Rc<RefCell<FomDocument>>,
    bindings: Rc<Bindings>,
) -> rquickjs::Result<()> {
    let global = ctx.globals();

    {
        let doc_ref = Rc::clone(&doc);
        let root = Function::new(ctx.clone(), move |_ctx: Ctx<'_>| -> rquickjs::Result<String> {
            Ok(encode_handle(doc_ref.borrow().root()))
        })?
        .with_name("__folio_root")?;
        global.set("__folio_root", root)?;
    }

    {
        let doc_ref = Rc::clone(&doc);
        let resolve = Function::new(
            ctx.clone(),
            move |name: String| -> rquickjs::Result<Option<String>> {
                Ok(doc_ref.borrow().find_by_name(&name).map(encode_handle))
            },
        )?
        .with_name("__folio_resolve_node")?;
        global.set("__folio_resolve_node", resolve)?;
    }

    {
        let doc_ref = Rc::clone(&doc);
        let node_kind = Function::new(
            ctx.clone(),
            move |handle: String| -> rquickjs::Result<Option<String>> {
                Ok(decode_handle(&handle)
                    .and_then(|h| doc_ref.borrow().kind_of(h))
                    .map(|k| k.tag_name().to_string()))
            },
        )?
        .with_name("__folio_node_kind")?;
        global.set("__folio_node_kind", node_kind)?;
    }

    {
        let doc_ref = Rc::clone(&doc);
        let bindings_ref = Rc::clone(&bindings);
        let prop_get = Function::new(
            ctx.clone(),
            move |ctx: Ctx<'_>, handle: String, name: String| -> rquickjs::Result<String> {
                let reply = match decode_handle(&handle) {
                    None => {
                        return bridge_throw(&ctx, format!("malformed node handle: {handle}"));
                    }
                    Some(h) => match bindings_ref.mirror(&doc_ref, h) {
                        None => stale_reply(),
                        Some(mirror) => match mirror.get(&name) {
                            Ok(value) => HostReply::Ok(value),
                            Err(err) => error_reply(&err),
                        },
                    },
                };
                encode_reply(&ctx, &reply)
            },
        )?
        .with_name("__folio_prop_get")?;
        global.set("__folio_prop_get", prop_get)?;
    }

    {
        let doc_ref = Rc::clone(&doc);
        let bindings_ref = Rc::clone(&bindings);
        let prop_set = Function::new(
            ctx.clone(),
            move |ctx: Ctx<'_>,
                  handle: String,
                  name: String,
                  payload: String|
                  -> rquickjs::Result<String> {
                let value: ScriptValue = match serde_json::from_str(&payload) {
                    Ok(v) => v,
                    Err(err) => {
                        return bridge_throw(&ctx, format!("malformed property payload: {err}"));
                    }
                };
                let reply = match decode_handle(&handle) {
                    None => {
                        return bridge_throw(&ctx, format!("malformed node handle: {handle}"));
                    }
                    Some(h) => match bindings_ref.mirror(&doc_ref, h) {
                        None => stale_reply(),
                        Some(mirror) => match mirror.set(&name, value) {
                            Ok(()) => HostReply::Ok(ScriptValue::Undefined),
                            Err(err) => error_reply(&err),
                        },
                    },
                };
                encode_reply(&ctx, &reply)
            },
        )?
        .with_name("__folio_prop_set")?;
        global.set("__folio_prop_set", prop_set)?;
    }

    {
        let doc_ref = Rc::clone(&doc);
        let bindings_ref = Rc::clone(&bindings);
        let prop_has = Function::new(
            ctx.clone(),
            move |handle: String, name: String| -> rquickjs::Result<bool> {
                Ok(decode_handle(&handle)
                    .and_then(|h| bindings_ref.mirror(&doc_ref, h))
                    .map(|m| m.has(&name))
                    .unwrap_or(false))
            },
        )?
        .with_name("__folio_prop_has")?;
        global.set("__folio_prop_has", prop_has)?;
    }

    ctx.eval::<(), _>(BOOTSTRAP.as_bytes())?;
    Ok(())
}

const BOOTSTRAP: &str = r#"
(() => {
    const global = globalThis;
    const HANDLE = '__folioHandle';
    // JS protocol lookups that must not hit the property tables
    const PROTOCOL_PROPS = ['valueOf', 'toJSON', 'then', 'constructor', 'inspect'];
    const proxies = new Map();

    class FomError extends Error {
        constructor(kind, message) {
            super(message);
            this.name = 'FomError';
            this.kind = kind;
        }
    }
    global.FomError = FomError;

    function decodeValue(value) {
        if (value === 'undefined') return undefined;
        if (value === 'null') return null;
        if (value && typeof value === 'object') {
            if ('bool' in value) return value.bool;
            if ('number' in value) return value.number;
            if ('text' in value) return value.text;
            if ('node' in value) return nodeProxy(value.node.id + ':' + value.node.gen);
        }
        return undefined;
    }

    function encodeValue(value) {
        if (value === undefined) return 'undefined';
        if (value === null) return 'null';
        if (typeof value === 'boolean') return { bool: value };
        if (typeof value === 'number') return { number: value };
        if (typeof value === 'string') return { text: value };
        if (value && typeof value === 'object' && typeof value[HANDLE] === 'string') {
            const parts = value[HANDLE].split(':');
            return { node: { id: Number(parts[0]), gen: Number(parts[1]) } };
        }
        return { text: String(value) };
    }

    function unwrapReply(json) {
        const reply = JSON.parse(json);
        if (reply && reply.err) {
            throw new FomError(reply.err.kind, reply.err.message);
        }
        return decodeValue(reply.ok);
    }

    function nodeProxy(handle) {
        if (proxies.has(handle)) {
            return proxies.get(handle);
        }
        const proxy = new Proxy({}, {
            get(_, prop) {
                if (typeof prop !== 'string') return undefined;
                if (prop === HANDLE) return handle;
                if (prop === 'toString') {
                    return () => '[FomNode ' + (global.__folio_node_kind(handle) || 'stale') + ']';
                }
                if (PROTOCOL_PROPS.includes(prop)) return undefined;
                return unwrapReply(global.__folio_prop_get(handle, prop));
            },
            set(_, prop, value) {
                if (typeof prop !== 'string') return false;
                unwrapReply(global.__folio_prop_set(handle, prop, JSON.stringify(encodeValue(value))));
                return true;
            },
            has(_, prop) {
                if (typeof prop !== 'string') return false;
                if (prop === HANDLE) return true;
                return global.__folio_prop_has(handle, prop);
            },
        });
        proxies.set(handle, proxy);
        return proxy;
    }

    global.form = {
        get root() {
            return nodeProxy(global.__folio_root());
        },
        resolveNode(name) {
            const handle = global.__folio_resolve_node(String(name));
            return typeof handle === 'string' ? nodeProxy(handle) : null;
        },
    };
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bindings;

    fn host() -> ScriptHost {
        let doc = Rc::new(RefCell::new(FomDocument::new()));
        ScriptHost::new(doc, Bindings::standard().unwrap()).unwrap()
    }

    #[test]
    fn test_form_global_installed() {
        let host = host();
        let result = host.eval("typeof form").unwrap();
        assert_eq!(result, ScriptValue::Text("object".into()));
    }

    #[test]
    fn test_root_class_name() {
        let host = host();
        let result = host.eval("form.root.className").unwrap();
        assert_eq!(result, ScriptValue::Text("template".into()));
    }

    #[test]
    fn test_handle_codec() {
        let h = NodeHandle::from_raw(7, 2);
        assert_eq!(decode_handle(&encode_handle(h)), Some(h));
        assert_eq!(decode_handle("junk"), None);
        assert_eq!(decode_handle("1:x"), None);
    }

    #[test]
    fn test_eval_exception_is_error() {
        let host = host();
        let err = host.eval("throw new Error('boom')").unwrap_err();
        match err {
            ScriptError::Exception(message) => assert_eq!(message, "boom"),
            other => panic!("expected exception, got {other:?}"),
        }
    }
}
