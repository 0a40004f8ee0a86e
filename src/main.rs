//! Browser entry point for the bumper admin panel.
//! Wires the panel controller, tab switcher and snackbar into Yew components.

use bumper_panel::config::*;
use bumper_panel::controller::{PanelController, PendingRequest};
use bumper_panel::error::PanelError;
use bumper_panel::model::{Bootstrap, ConfigForm, Thread, ThreadBook, ThreadDraft, ThreadId, UserForm};
use bumper_panel::notify::{Notifier, Outbox};
use bumper_panel::tabs::TabSwitcher;
use bumper_panel::{http, read_bootstrap, set_document_title};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod hooks;

use components::{render_content_tab, render_nav, render_snackbar, ConfigTab, Dashboard, ThreadsTab, UserTab};
use hooks::{use_snackbar, SnackbarHandle};

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Send a request in the background and apply its completion once the
/// response has fully arrived.
fn dispatch(
    pending: PendingRequest,
    controller: Rc<RefCell<PanelController>>,
    mut snackbar: SnackbarHandle,
    redraw: UseForceUpdateHandle,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let PendingRequest { request, ticket } = pending;
        let result = http::send(&request).await;

        // Collect notifications first so the controller is no longer
        // borrowed when the snackbar triggers a re-render.
        let mut outbox = Outbox::default();
        {
            let mut ctl = controller.borrow_mut();
            match result {
                Ok(response) => {
                    if let Err(e) = ctl.complete(ticket, &response, &mut outbox) {
                        log::error!("{}: {}", request.path, e);
                    }
                }
                Err(e) => ctl.fail(ticket, &e, &mut outbox),
            }
        }
        outbox.deliver(&mut snackbar);
        redraw.force_update();
    });
}

/// Tell the user why an operation never left the page.
fn refuse(error: PanelError, mut snackbar: SnackbarHandle) {
    log::warn!("{}", error);
    let message = match error {
        PanelError::NoSelection => MSG_NO_SELECTION.to_string(),
        PanelError::DuplicateThread(_) => MSG_DUPLICATE_THREAD.to_string(),
        other => other.to_string(),
    };
    snackbar.notify(&message);
}

fn load_bootstrap() -> Bootstrap {
    match read_bootstrap() {
        Ok(state) => {
            log::info!("Loaded {} threads from page state", state.config.threads.len());
            state
        }
        Err(e) => {
            log::error!("{}", e);
            Bootstrap::default()
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────

/// Admin page: navigation, the four tab panels and the snackbar.
#[function_component]
pub fn App() -> Html {
    let bootstrap = use_memo((), |_| load_bootstrap());
    let controller = {
        let bootstrap = bootstrap.clone();
        use_mut_ref(move || {
            PanelController::new(ThreadBook::from_threads(bootstrap.config.threads.clone()))
        })
    };
    let tabs = use_mut_ref(|| TabSwitcher::new(TABS));
    let snackbar = use_snackbar();
    let redraw = use_force_update();

    let open_tab = {
        let tabs = tabs.clone();
        let redraw = redraw.clone();
        Callback::from(move |name: String| {
            let title = tabs.borrow_mut().open_tab(&name);
            match title {
                Some(title) => {
                    set_document_title(&title);
                    redraw.force_update();
                }
                None => log::debug!("No tab named {}", name),
            }
        })
    };

    // Open the first tab on mount
    {
        let open_tab = open_tab.clone();
        use_effect_with((), move |_| {
            open_tab.emit(TABS[0].to_string());
            || ()
        });
    }

    let on_config = {
        let controller = controller.clone();
        let snackbar = snackbar.clone();
        let redraw = redraw.clone();
        Callback::from(move |form: ConfigForm| {
            let pending = controller.borrow_mut().update_configuration(&form);
            dispatch(pending, controller.clone(), snackbar.clone(), redraw.clone());
        })
    };

    let on_user = {
        let controller = controller.clone();
        let snackbar = snackbar.clone();
        let redraw = redraw.clone();
        Callback::from(move |form: UserForm| {
            let pending = controller.borrow_mut().update_user(&form);
            dispatch(pending, controller.clone(), snackbar.clone(), redraw.clone());
        })
    };

    let on_save_thread = {
        let controller = controller.clone();
        let snackbar = snackbar.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            let pending = controller.borrow_mut().edit_thread();
            match pending {
                Ok(pending) => dispatch(pending, controller.clone(), snackbar.clone(), redraw.clone()),
                Err(e) => refuse(e, snackbar.clone()),
            }
        })
    };

    let on_delete_thread = {
        let controller = controller.clone();
        let snackbar = snackbar.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            let pending = controller.borrow_mut().delete_thread();
            match pending {
                Ok(pending) => dispatch(pending, controller.clone(), snackbar.clone(), redraw.clone()),
                Err(e) => refuse(e, snackbar.clone()),
            }
        })
    };

    let on_create_thread = {
        let controller = controller.clone();
        let snackbar = snackbar.clone();
        let redraw = redraw.clone();
        Callback::from(move |thread: Thread| {
            let pending = controller.borrow_mut().create_thread(thread);
            match pending {
                Ok(pending) => dispatch(pending, controller.clone(), snackbar.clone(), redraw.clone()),
                Err(e) => refuse(e, snackbar.clone()),
            }
        })
    };

    let on_select_thread = {
        let controller = controller.clone();
        let redraw = redraw.clone();
        Callback::from(move |id: ThreadId| {
            if controller.borrow_mut().select_thread(&id) {
                redraw.force_update();
            }
        })
    };

    let on_draft = {
        let controller = controller.clone();
        let redraw = redraw.clone();
        Callback::from(move |(id, draft): (ThreadId, ThreadDraft)| {
            if controller.borrow_mut().set_draft(&id, draft) {
                redraw.force_update();
            }
        })
    };

    let on_load_last_request = {
        let controller = controller.clone();
        let snackbar = snackbar.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            let pending = controller.borrow_mut().load_last_request();
            dispatch(pending, controller.clone(), snackbar.clone(), redraw.clone());
        })
    };

    let tabs = tabs.borrow();
    let ctl = controller.borrow();

    html! {
        <div class="admin">
            { render_nav(&tabs, open_tab) }

            { render_content_tab(&tabs, "dashboard", html! {
                <Dashboard
                    bootstrap={bootstrap.clone()}
                    thread_count={ctl.threads().len()}
                    last_request={ctl.last_request().map(str::to_string)}
                    on_load_last_request={on_load_last_request}
                />
            }) }

            { render_content_tab(&tabs, "threads", html! {
                <ThreadsTab
                    book={ctl.threads().clone()}
                    on_select={on_select_thread}
                    on_draft={on_draft}
                    on_save={on_save_thread}
                    on_delete={on_delete_thread}
                    on_create={on_create_thread}
                />
            }) }

            { render_content_tab(&tabs, "config", html! {
                <ConfigTab initial={bootstrap.config_form()} on_submit={on_config} />
            }) }

            { render_content_tab(&tabs, "user", html! {
                <UserTab initial={bootstrap.user_form()} on_submit={on_user} />
            }) }

            { render_snackbar(&snackbar.snapshot()) }
        </div>
    }
}

/// Entry point: installs the panic hook and logger, then renders the App.
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
