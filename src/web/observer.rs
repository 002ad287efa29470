/// Hook the watcher up to a real `MutationObserver`
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MutationObserver, MutationObserverInit, MutationRecord};

use crate::error::{Error, Result};
use crate::painter::Painter;
use crate::watcher::MutationWatcher;
use crate::web::dom::{DocumentPage, DomNode};

/// Added nodes of every record, in delivery order
fn added_nodes(records: &Array) -> Vec<DomNode> {
    records
        .iter()
        .filter_map(|record| record.dyn_into::<MutationRecord>().ok())
        .flat_map(|record| {
            let nodes = record.added_nodes();
            (0..nodes.length()).filter_map(move |i| nodes.item(i))
        })
        .map(DomNode::new)
        .collect()
}

/// Observe `container` and its whole subtree for inserted nodes.
///
/// The callback is leaked on purpose: it has to outlive this call for as
/// long as the page is open.
pub fn observe<P>(container: &Element, watcher: Rc<MutationWatcher<DocumentPage, P>>) -> Result<MutationObserver>
where
    P: Painter<DomNode> + 'static,
{
    let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(move |records: Array, _: MutationObserver| {
        let added = added_nodes(&records);
        if !added.is_empty() {
            watcher.handle_batch(added);
        }
    });

    let observer =
        MutationObserver::new(callback.as_ref().unchecked_ref()).map_err(|e| Error::host("MutationObserver", e))?;

    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer
        .observe_with_options(container, &options)
        .map_err(|e| Error::host("MutationObserver.observe", e))?;

    callback.forget();
    Ok(observer)
}
