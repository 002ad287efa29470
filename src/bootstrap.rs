/// Page-load wiring: version check, initial load, watcher, refresh button
use std::rc::Rc;

use js_sys::Reflect;
use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::classifier::Classifier;
use crate::config::{Config, CURRENT_VERSION};
use crate::error::{Error, Result};
use crate::host::{CONTAINER_SELECTOR, SIDE_CONTROLS_SELECTOR};
use crate::loader::{DataLoader, LoadReason};
use crate::painter::StylePainter;
use crate::refresh::RefreshController;
use crate::store::{ClassificationStore, SharedStore};
use crate::ui::toast::show_toast;
use crate::version::advise;
use crate::watcher::MutationWatcher;
use crate::web::button::create_refresh_button;
use crate::web::dom::{self, DocumentPage};
use crate::web::fetch::FetchLoader;
use crate::web::observer;
use crate::web::timers::WindowTimers;

type PageWatcher = MutationWatcher<DocumentPage, StylePainter>;

/// Run `init` once the window has loaded (right away if it already has)
pub fn install(config: Config) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| Error::Host("no window".to_string()))?;
    let document = dom::document()?;

    let ready_state = Reflect::get(&document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string());
    if ready_state.as_deref() == Some("complete") {
        spawn_init(config);
        return Ok(());
    }

    let on_load = Closure::once_into_js(move || spawn_init(config));
    window
        .add_event_listener_with_callback("load", on_load.unchecked_ref())
        .map_err(|e| Error::host("load listener", e))?;
    Ok(())
}

fn spawn_init(config: Config) {
    spawn_local(async move {
        if let Err(e) = init(config).await {
            error!("Color Proven could not start: {}", e);
        }
    });
}

/// Startup sequence. A failed initial load is fatal for the feature.
pub async fn init(config: Config) -> Result<()> {
    let loader = Rc::new(FetchLoader::new(&config)?);
    init_with(&config, loader).await
}

/// Startup against any loader: detached version check, initial load,
/// watcher on the game container, then the refresh button.
pub async fn init_with<L: DataLoader + 'static>(config: &Config, loader: Rc<L>) -> Result<()> {
    spawn_version_check(Rc::clone(&loader));

    let data = loader.load_classification_data(LoadReason::Load).await?;
    let store = ClassificationStore::from_lists(data.proven.as_slice(), data.disproven.as_slice()).shared();
    info!("Loaded {} classified elements", store.borrow().len());

    let document = dom::document()?;
    let watcher = Rc::new(MutationWatcher::new(
        Classifier::new(Rc::clone(&store)),
        StylePainter::new(config.palette.clone()),
        DocumentPage::new(document.clone()),
    ));

    let container = dom::query(&document, CONTAINER_SELECTOR)?;
    observer::observe(&container, Rc::clone(&watcher))?;

    install_refresh_button(&document, config, store, loader, watcher)
}

/// Detached advisory check; never blocks or fails startup
fn spawn_version_check<L: DataLoader + 'static>(loader: Rc<L>) {
    spawn_local(async move {
        advise(loader.as_ref(), CURRENT_VERSION, show_toast).await;
    });
}

fn install_refresh_button<L: DataLoader + 'static>(
    document: &Document,
    config: &Config,
    store: SharedStore,
    loader: Rc<L>,
    watcher: Rc<PageWatcher>,
) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| Error::Host("no window".to_string()))?;
    let button = create_refresh_button(document)?;
    let controller = Rc::new(RefreshController::new(
        store,
        button.clone(),
        WindowTimers::new(window),
        config.refresh.clone(),
    ));

    let on_click = Closure::<dyn FnMut()>::new(move || {
        let controller = Rc::clone(&controller);
        let loader = Rc::clone(&loader);
        let watcher = Rc::clone(&watcher);
        spawn_local(async move {
            controller.run(loader.as_ref(), watcher.as_ref()).await;
        });
    });
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|e| Error::host("click listener", e))?;
    // Lives as long as the button
    on_click.forget();

    let side_controls = dom::query(document, SIDE_CONTROLS_SELECTOR)?;
    side_controls
        .prepend_with_node_1(&button)
        .map_err(|e| Error::host("side controls", e))?;
    Ok(())
}
