//! Yew view components for the bumper admin page.
//!
//! The helpers at the top are pure render functions; the tab bodies are
//! function components that own their form fields through `use_text_field`.

use crate::hooks::use_text_field;
use bumper_panel::config::{ACTIVE_LINK_CLASS, CONTENT_TAB_CLASS, LOGOUT_PATH};
use bumper_panel::model::{Bootstrap, ConfigForm, Thread, ThreadBook, ThreadDraft, ThreadId, UserForm};
use bumper_panel::notify::Snackbar;
use bumper_panel::tabs::{capitalize_first, TabSwitcher};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Class of a navigation link: `is-active` for the open tab only.
fn nav_link_class(tabs: &TabSwitcher, name: &str) -> &'static str {
    if tabs.is_active(name) {
        ACTIVE_LINK_CLASS
    } else {
        ""
    }
}

/// Inline style of a `content-tab` panel.
fn content_tab_style(tabs: &TabSwitcher, name: &str) -> &'static str {
    if tabs.is_active(name) {
        "display: block"
    } else {
        "display: none"
    }
}

/// Navigation links, one `li > a` per tab; only the active one carries `is-active`.
pub fn render_nav(tabs: &TabSwitcher, on_open: Callback<String>) -> Html {
    html! {
        <ul class="tabs">
            { tabs.tabs().map(|name| {
                let on_open = on_open.clone();
                let target = name.to_string();
                let class = nav_link_class(tabs, name);
                html! {
                    <li>
                        <a class={class} onclick={Callback::from(move |_: MouseEvent| on_open.emit(target.clone()))}>
                            { capitalize_first(name) }
                        </a>
                    </li>
                }
            }).collect::<Html>() }
        </ul>
    }
}

/// Wrap a tab body in its `content-tab` panel; hidden unless active.
pub fn render_content_tab(tabs: &TabSwitcher, name: &str, body: Html) -> Html {
    let style = content_tab_style(tabs, name);
    html! {
        <div class={classes!(CONTENT_TAB_CLASS, name.to_string())} style={style}>
            { body }
        </div>
    }
}

pub fn render_snackbar(bar: &Snackbar) -> Html {
    html! {
        <div id="snackbar" class={bar.class()}>{ bar.message().to_string() }</div>
    }
}

fn prevent_submit(on_submit: Callback<()>) -> Callback<SubmitEvent> {
    Callback::from(move |e: SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
    })
}

/// Overview of the running bumper.
#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub bootstrap: Rc<Bootstrap>,
    pub thread_count: usize,
    pub last_request: Option<String>,
    pub on_load_last_request: Callback<()>,
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let data = &props.bootstrap.data;
    let onclick = {
        let on_load = props.on_load_last_request.clone();
        Callback::from(move |_: MouseEvent| on_load.emit(()))
    };
    html! {
        <div class="dashboard">
            <p>{ format!("Logged in as {}", props.bootstrap.username) }
               { " " }<a href={LOGOUT_PATH}>{ "Log out" }</a></p>
            <table class="stats">
                <tr><th>{ "Threads" }</th><td>{ props.thread_count }</td></tr>
                <tr><th>{ "Bumps" }</th><td>{ data.totals.bumps }</td></tr>
                <tr><th>{ "Posts" }</th><td>{ data.totals.posts }</td></tr>
                <tr><th>{ "Started" }</th><td>{ data.start.clone().unwrap_or_else(|| "-".into()) }</td></tr>
                <tr><th>{ "Last bump" }</th><td>{ data.last_bump.clone().unwrap_or_else(|| "never".into()) }</td></tr>
            </table>
            <button type="button" {onclick}>{ "Load last request" }</button>
            if let Some(text) = &props.last_request {
                <pre class="last-request">{ text.clone() }</pre>
            }
        </div>
    }
}

/// Bump/post delay and default message.
#[derive(Properties, PartialEq)]
pub struct ConfigTabProps {
    pub initial: ConfigForm,
    pub on_submit: Callback<ConfigForm>,
}

#[function_component(ConfigTab)]
pub fn config_tab(props: &ConfigTabProps) -> Html {
    let bump_delay = use_text_field(props.initial.bump_delay.clone());
    let post_delay = use_text_field(props.initial.post_delay.clone());
    let default_message = use_text_field(props.initial.default_message.clone());

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        let form = ConfigForm {
            bump_delay: bump_delay.text.clone(),
            post_delay: post_delay.text.clone(),
            default_message: default_message.text.clone(),
        };
        prevent_submit(Callback::from(move |_| on_submit.emit(form.clone())))
    };

    html! {
        <form {onsubmit}>
            <label>{ "Bump delay (seconds)" }
                <input name="bump_delay" value={bump_delay.text.clone()} oninput={bump_delay.on_input.clone()} />
            </label>
            <label>{ "Post delay (seconds)" }
                <input name="post_delay" value={post_delay.text.clone()} oninput={post_delay.on_input.clone()} />
            </label>
            <label>{ "Default message" }
                <textarea name="default_message" value={default_message.text.clone()} oninput={default_message.on_textarea.clone()} />
            </label>
            <button type="submit">{ "Save" }</button>
        </form>
    }
}

/// Account name and password change.
#[derive(Properties, PartialEq)]
pub struct UserTabProps {
    pub initial: UserForm,
    pub on_submit: Callback<UserForm>,
}

#[function_component(UserTab)]
pub fn user_tab(props: &UserTabProps) -> Html {
    let username = use_text_field(props.initial.username.clone());
    let old_password = use_text_field(String::new());
    let new_password = use_text_field(String::new());

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        let form = UserForm {
            username: username.text.clone(),
            old_password: old_password.text.clone(),
            new_password: new_password.text.clone(),
        };
        prevent_submit(Callback::from(move |_| on_submit.emit(form.clone())))
    };

    html! {
        <form {onsubmit}>
            <label>{ "Username" }
                <input name="username" value={username.text.clone()} oninput={username.on_input.clone()} />
            </label>
            <label>{ "Current password" }
                <input type="password" name="old-password" value={old_password.text.clone()} oninput={old_password.on_input.clone()} />
            </label>
            <label>{ "New password" }
                <input type="password" name="new-password" value={new_password.text.clone()} oninput={new_password.on_input.clone()} />
            </label>
            <button type="submit">{ "Update" }</button>
        </form>
    }
}

/// Thread picker, one detail panel per thread, and the add-thread form.
#[derive(Properties, PartialEq)]
pub struct ThreadsTabProps {
    pub book: ThreadBook,
    pub on_select: Callback<ThreadId>,
    pub on_draft: Callback<(ThreadId, ThreadDraft)>,
    pub on_save: Callback<()>,
    pub on_delete: Callback<()>,
    pub on_create: Callback<Thread>,
}

#[function_component(ThreadsTab)]
pub fn threads_tab(props: &ThreadsTabProps) -> Html {
    let onchange = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_select.emit(ThreadId::new(select.value()));
        })
    };
    let selected = props.book.selected_id().cloned();

    let on_delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(()))
    };

    html! {
        <div class="threads">
            <select name="thread" {onchange}>
                { props.book.iter().map(|entry| html! {
                    <option value={entry.id.to_string()}
                            class={entry.id.css_class()}
                            selected={selected.as_ref() == Some(&entry.id)}>
                        { entry.label.clone() }
                    </option>
                }).collect::<Html>() }
            </select>
            <form onsubmit={prevent_submit(props.on_save.clone())}>
                { props.book.iter().map(|entry| {
                    let display = if props.book.is_panel_visible(&entry.id) { "display: inline" } else { "display: none" };
                    let on_name = {
                        let on_draft = props.on_draft.clone();
                        let id = entry.id.clone();
                        let draft = entry.draft.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            on_draft.emit((id.clone(), ThreadDraft { name: input.value(), ..draft.clone() }));
                        })
                    };
                    let on_message = {
                        let on_draft = props.on_draft.clone();
                        let id = entry.id.clone();
                        let draft = entry.draft.clone();
                        Callback::from(move |e: InputEvent| {
                            let area: HtmlTextAreaElement = e.target_unchecked_into();
                            on_draft.emit((id.clone(), ThreadDraft { message: area.value(), ..draft.clone() }));
                        })
                    };
                    html! {
                        <div class={entry.id.css_class()} style={display}>
                            <input name="name" value={entry.draft.name.clone()} oninput={on_name} />
                            <textarea name="message" value={entry.draft.message.clone()} oninput={on_message} />
                        </div>
                    }
                }).collect::<Html>() }
                <button type="submit">{ "Save thread" }</button>
                <button type="button" class="danger" onclick={on_delete}>{ "Delete thread" }</button>
            </form>
            <NewThreadForm on_create={props.on_create.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NewThreadFormProps {
    pub on_create: Callback<Thread>,
}

#[function_component(NewThreadForm)]
pub fn new_thread_form(props: &NewThreadFormProps) -> Html {
    let id = use_text_field(String::new());
    let name = use_text_field(String::new());
    let message = use_text_field(String::new());

    let onsubmit = {
        let on_create = props.on_create.clone();
        let thread = Thread {
            id: ThreadId::new(id.text.trim()),
            name: name.text.clone(),
            message: message.text.clone(),
        };
        let clear = [id.set_text.clone(), name.set_text.clone(), message.set_text.clone()];
        prevent_submit(Callback::from(move |_| {
            if thread.id.as_str().is_empty() {
                return;
            }
            on_create.emit(thread.clone());
            for setter in &clear {
                setter.emit(String::new());
            }
        }))
    };

    html! {
        <form class="new-thread" {onsubmit}>
            <h3>{ "Add thread" }</h3>
            <input placeholder="Thread id" value={id.text.clone()} oninput={id.on_input.clone()} />
            <input placeholder="Name" value={name.text.clone()} oninput={name.on_input.clone()} />
            <textarea placeholder="Message" value={message.text.clone()} oninput={message.on_textarea.clone()} />
            <button type="submit">{ "Add" }</button>
        </form>
    }
}
