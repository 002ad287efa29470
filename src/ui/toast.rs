/// Dismissable advisory notification rendered over the game
use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use web_sys::{Document, Element};
use yew::prelude::*;
use yew::AppHandle;

use crate::error::{Error, Result};
use crate::web::dom;

pub const CONTAINER_ID: &str = "userscript-toast-container";

const CONTAINER_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; display: flex; justify-content: center; align-items: center; z-index: 9999;";

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub lines: Vec<String>,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let visible = use_state(|| false);

    // Fade in after the first paint
    {
        let visible = visible.clone();
        use_effect_with((), move |_| {
            visible.set(true);
            || ()
        });
    }

    let opacity = if *visible { 1 } else { 0 };

    html! {
        <div style={format!("background: hsl(0, 0%, 0%); color: hsl(0, 0%, 100%); padding: 1.5rem 2rem; border-radius: 0.75rem; box-shadow: 0 4px 12px hsla(0, 0%, 0%, 0.6); font-size: 1.25rem; overflow-wrap: break-word; display: flex; flex-direction: column; align-items: center; gap: 1rem; opacity: {}; transition: opacity 0.3s ease;", opacity)}>
            <div style="white-space: pre-wrap; text-align: left; width: 100%; font-size: 1.1rem; color: hsl(0, 0%, 100%); margin: 0; padding: 0; max-width: 360px; font-family: monospace;">
                {props.lines.join("\n")}
            </div>
            <button
                onclick={props.on_close.clone()}
                style="padding: 0.5rem 1rem; font-size: 1rem; border: none; border-radius: 0.5rem; cursor: pointer; background: hsla(0, 0%, 100%, 0.15); color: white; align-self: flex-end;"
            >
                {"Close"}
            </button>
        </div>
    }
}

fn container(document: &Document) -> Result<Element> {
    if let Some(existing) = document.get_element_by_id(CONTAINER_ID) {
        return Ok(existing);
    }

    let container = document
        .create_element("div")
        .map_err(|e| Error::host("toast container", e))?;
    container.set_id(CONTAINER_ID);
    container
        .set_attribute("style", CONTAINER_STYLE)
        .map_err(|e| Error::host("toast container", e))?;
    document
        .body()
        .ok_or_else(|| Error::Host("no body".to_string()))?
        .append_child(&container)
        .map_err(|e| Error::host("toast container", e))?;
    Ok(container)
}

/// Show a toast. Close unmounts it; closing the last one removes the overlay container too
pub fn show_toast(lines: Vec<String>) -> Result<()> {
    let document = dom::document()?;
    let container = container(&document)?;

    let root = document
        .create_element("div")
        .map_err(|e| Error::host("toast", e))?;
    container
        .append_child(&root)
        .map_err(|e| Error::host("toast", e))?;

    let handle: Rc<RefCell<Option<AppHandle<Toast>>>> = Rc::new(RefCell::new(None));
    let on_close = {
        let handle = Rc::clone(&handle);
        let root = root.clone();
        let container = container.clone();
        Callback::from(move |_: MouseEvent| {
            let app = handle.borrow_mut().take();
            if let Some(app) = app {
                app.destroy();
            }
            root.remove();
            if container.child_element_count() == 0 {
                container.remove();
            }
            debug!("Toast dismissed");
        })
    };

    let app = yew::Renderer::<Toast>::with_root_and_props(root, ToastProps { lines, on_close }).render();
    *handle.borrow_mut() = Some(app);
    Ok(())
}
