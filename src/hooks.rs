use bumper_panel::config::SNACKBAR_DURATION_MS;
use bumper_panel::notify::{Notifier, Snackbar};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Holds the text of a form field and the callbacks that keep it current.
#[derive(Clone)]
pub struct TextField {
    /// The current text content of the field.
    pub text: String,
    /// Callback for an `<input>`'s `oninput` event.
    pub on_input: Callback<InputEvent>,
    /// Callback for a `<textarea>`'s `oninput` event.
    pub on_textarea: Callback<InputEvent>,
    /// Callback to overwrite the text programmatically, e.g. to clear it.
    pub set_text: Callback<String>,
}

/// Custom hook to manage state for a free-text form field.
#[hook]
pub fn use_text_field(initial: String) -> TextField {
    let text_state_handle: UseStateHandle<String> = use_state(move || initial);

    let on_input = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_textarea = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            text_setter.set(area.value());
        })
    };

    let set_text = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |text: String| text_setter.set(text))
    };

    TextField {
        text: (*text_state_handle).clone(),
        on_input,
        on_textarea,
        set_text,
    }
}

/// Shared handle to the page's single snackbar.
///
/// Showing a message stores a fresh dismiss timer in the one timer slot,
/// which drops (and so cancels) the previous one.
#[derive(Clone)]
pub struct SnackbarHandle {
    state: Rc<RefCell<Snackbar>>,
    timer: Rc<RefCell<Option<Timeout>>>,
    redraw: UseForceUpdateHandle,
}

impl SnackbarHandle {
    pub fn snapshot(&self) -> Snackbar {
        self.state.borrow().clone()
    }
}

impl Notifier for SnackbarHandle {
    fn notify(&mut self, message: &str) {
        let generation = self.state.borrow_mut().show(message);

        let state = self.state.clone();
        let redraw = self.redraw.clone();
        let handle = Timeout::new(SNACKBAR_DURATION_MS, move || {
            if state.borrow_mut().dismiss(generation) {
                redraw.force_update();
            }
        });
        *self.timer.borrow_mut() = Some(handle);

        self.redraw.force_update();
    }
}

/// Custom hook owning the snackbar state and its dismiss timer.
#[hook]
pub fn use_snackbar() -> SnackbarHandle {
    let state = use_mut_ref(Snackbar::new);
    let timer = use_mut_ref(|| None::<Timeout>);
    let redraw = use_force_update();
    SnackbarHandle {
        state,
        timer,
        redraw,
    }
}
