//! End-to-end bridge tests
//!
//! Drives the QuickJS side: property traffic through the `form` global,
//! script-catchable errors, proxy identity and liveness.

use std::cell::RefCell;
use std::rc::Rc;

use folio_fom::{FomDocument, NodeKind};
use folio_script::{Bindings, ScriptHost, ScriptValue};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Host over a small fixed template:
/// template -> subform "page1" -> { dateTimeEdit "when", checkButton "agree",
/// choiceList "country" }, plus field "qty" directly under the root
fn build_host() -> ScriptHost {
    init_tracing();
    let doc = Rc::new(RefCell::new(FomDocument::new()));
    {
        let mut d = doc.borrow_mut();
        let root = d.root();
        let page = d.create_node(NodeKind::Subform, Some("page1"));
        d.append(root, page).unwrap();
        let when = d.create_node(NodeKind::DateTimeEdit, Some("when"));
        d.append(page, when).unwrap();
        let agree = d.create_node(NodeKind::CheckButton, Some("agree"));
        d.append(page, agree).unwrap();
        let country = d.create_node(NodeKind::ChoiceList, Some("country"));
        d.append(page, country).unwrap();
        let qty = d.create_node(NodeKind::Field, Some("qty"));
        d.append(root, qty).unwrap();
    }
    ScriptHost::new(doc, Bindings::standard().unwrap()).unwrap()
}

fn eval_text(host: &ScriptHost, code: &str) -> String {
    match host.eval(code).unwrap() {
        ScriptValue::Text(s) => s,
        other => panic!("expected string from {code:?}, got {other:?}"),
    }
}

// ============================================================================
// PROPERTY ROUND TRIPS
// ============================================================================

#[test]
fn test_scroll_policy_round_trip() {
    let host = build_host();
    host.exec("form.resolveNode('when').hScrollPolicy = 'off'").unwrap();
    assert_eq!(
        eval_text(&host, "form.resolveNode('when').hScrollPolicy"),
        "off"
    );
}

#[test]
fn test_defaults_before_any_write() {
    let host = build_host();
    assert_eq!(
        eval_text(&host, "form.resolveNode('when').hScrollPolicy"),
        "auto"
    );
    // unset cross-reference reads as empty, not as an error
    assert_eq!(eval_text(&host, "form.resolveNode('when').usehref"), "");
    assert_eq!(eval_text(&host, "form.resolveNode('agree').size"), "10pt");
}

#[test]
fn test_use_inherited_by_every_kind() {
    let host = build_host();
    host.exec("form.resolveNode('agree').usehref = 'lib.xft#header'")
        .unwrap();
    assert_eq!(
        eval_text(&host, "form.resolveNode('agree').usehref"),
        "lib.xft#header"
    );
    host.exec("form.resolveNode('country').use = 'shared.countries'")
        .unwrap();
    assert_eq!(
        eval_text(&host, "form.resolveNode('country').use"),
        "shared.countries"
    );
}

#[test]
fn test_numeric_string_coercion() {
    let host = build_host();
    host.exec("form.resolveNode('qty').colSpan = '3'").unwrap();
    assert_eq!(
        host.eval("form.resolveNode('qty').colSpan").unwrap(),
        ScriptValue::Number(3.0)
    );
}

#[test]
fn test_flag_and_keyword_properties() {
    let host = build_host();
    host.exec("form.resolveNode('agree').allowNeutral = true").unwrap();
    assert_eq!(
        host.eval("form.resolveNode('agree').allowNeutral").unwrap(),
        ScriptValue::Bool(true)
    );
    host.exec("form.resolveNode('country').open = 'multiSelect'")
        .unwrap();
    assert_eq!(
        eval_text(&host, "form.resolveNode('country').open"),
        "multiSelect"
    );
}

// ============================================================================
// SCRIPT-CATCHABLE ERRORS
// ============================================================================

#[test]
fn test_unknown_property_catchable() {
    let host = build_host();
    let kind = eval_text(
        &host,
        "(() => { try { return form.resolveNode('when').flavor; } \
         catch (e) { return e.kind; } })()",
    );
    assert_eq!(kind, "unknownProperty");
}

#[test]
fn test_read_only_property_catchable() {
    let host = build_host();
    let kind = eval_text(
        &host,
        "(() => { try { form.root.className = 'subform'; return 'no-throw'; } \
         catch (e) { return e.kind; } })()",
    );
    assert_eq!(kind, "readOnlyProperty");
}

#[test]
fn test_type_mismatch_catchable_and_state_intact() {
    let host = build_host();
    host.exec("form.resolveNode('when').hScrollPolicy = 'on'").unwrap();
    let kind = eval_text(
        &host,
        "(() => { try { form.resolveNode('when').hScrollPolicy = 'sideways'; \
         return 'no-throw'; } catch (e) { return e.kind; } })()",
    );
    assert_eq!(kind, "typeMismatch");
    assert_eq!(
        eval_text(&host, "form.resolveNode('when').hScrollPolicy"),
        "on"
    );
}

#[test]
fn test_error_is_instance_of_fom_error() {
    let host = build_host();
    let result = host
        .eval(
            "(() => { try { return form.resolveNode('when').flavor; } \
             catch (e) { return e instanceof FomError && e instanceof Error; } })()",
        )
        .unwrap();
    assert_eq!(result, ScriptValue::Bool(true));
}

#[test]
fn test_execution_continues_after_catch() {
    let host = build_host();
    host.exec(
        "try { form.resolveNode('when').flavor = 1; } catch (e) {} \
         form.resolveNode('when').hScrollPolicy = 'off';",
    )
    .unwrap();
    assert_eq!(
        eval_text(&host, "form.resolveNode('when').hScrollPolicy"),
        "off"
    );
}

// ============================================================================
// IDENTITY & OBJECT REFERENCES
// ============================================================================

#[test]
fn test_repeated_exposure_is_identical() {
    let host = build_host();
    let same = host
        .eval("form.resolveNode('when') === form.resolveNode('when')")
        .unwrap();
    assert_eq!(same, ScriptValue::Bool(true));
}

#[test]
fn test_parent_reference_identity() {
    let host = build_host();
    let same = host
        .eval("form.resolveNode('when').parent === form.resolveNode('page1')")
        .unwrap();
    assert_eq!(same, ScriptValue::Bool(true));
    let root = host
        .eval("form.resolveNode('qty').parent === form.root")
        .unwrap();
    assert_eq!(root, ScriptValue::Bool(true));
}

#[test]
fn test_eval_returns_node_reference() {
    let host = build_host();
    let value = host.eval("form.resolveNode('when')").unwrap();
    let handle = match value {
        ScriptValue::Node(h) => h,
        other => panic!("expected node, got {other:?}"),
    };
    let doc = host.document();
    let expected = doc.borrow().find_by_name("when").unwrap();
    assert_eq!(handle, expected);
}

#[test]
fn test_has_through_in_operator() {
    let host = build_host();
    assert_eq!(
        host.eval("'hScrollPolicy' in form.resolveNode('when')").unwrap(),
        ScriptValue::Bool(true)
    );
    assert_eq!(
        host.eval("'use' in form.resolveNode('when')").unwrap(),
        ScriptValue::Bool(true)
    );
    assert_eq!(
        host.eval("'flavor' in form.resolveNode('when')").unwrap(),
        ScriptValue::Bool(false)
    );
}

#[test]
fn test_resolve_unknown_name_is_null() {
    let host = build_host();
    assert_eq!(
        host.eval("form.resolveNode('ghost')").unwrap(),
        ScriptValue::Null
    );
}

// ============================================================================
// LIVENESS ACROSS THE BRIDGE
// ============================================================================

#[test]
fn test_removed_node_goes_stale_in_script() {
    let host = build_host();
    host.exec("globalThis.when = form.resolveNode('when')").unwrap();

    let doc = host.document();
    let when = doc.borrow().find_by_name("when").unwrap();
    doc.borrow_mut().remove_node(when).unwrap();

    let kind = eval_text(
        &host,
        "(() => { try { return when.hScrollPolicy; } catch (e) { return e.kind; } })()",
    );
    assert_eq!(kind, "staleNode");
    assert_eq!(
        host.eval("'hScrollPolicy' in when").unwrap(),
        ScriptValue::Bool(false)
    );
    assert_eq!(host.eval("form.resolveNode('when')").unwrap(), ScriptValue::Null);
}

#[test]
fn test_subtree_removal_invalidates_descendants() {
    let host = build_host();
    host.exec("globalThis.agree = form.resolveNode('agree')").unwrap();

    let doc = host.document();
    let page = doc.borrow().find_by_name("page1").unwrap();
    doc.borrow_mut().remove_node(page).unwrap();

    let kind = eval_text(
        &host,
        "(() => { try { return agree.allowNeutral; } catch (e) { return e.kind; } })()",
    );
    assert_eq!(kind, "staleNode");
    // nodes outside the removed subtree keep working
    assert_eq!(eval_text(&host, "form.resolveNode('qty').className"), "field");
}
