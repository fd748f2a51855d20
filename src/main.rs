//! Roster entry point
//!
//! On the web this binds the roster controller to the page markup; natively it
//! is a small command-line front end over a JSON file.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement};

    use roster::platform::{KeyValueStorage, LocalStorage, MemoryStorage, SystemClock};
    use roster::{EmployeeId, Field, Notice, RosterApp, RosterStore, Settings, UiEvent};

    /// Controller plus redraw bookkeeping shared by all DOM closures
    struct Page {
        app: RosterApp,
        /// Set by the store subscription; the list is rebuilt only when needed
        rows_dirty: Rc<Cell<bool>>,
    }

    type Shared = Rc<RefCell<Page>>;

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn input(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_hidden(el: &Element, hidden: bool) {
        let _ = if hidden {
            el.class_list().add_1("hidden")
        } else {
            el.class_list().remove_1("hidden")
        };
    }

    fn open_storage() -> Box<dyn KeyValueStorage> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}, roster will not survive a reload", e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Roster starting...");

        let storage = open_storage();
        let settings = Settings::load(storage.as_ref());
        let store = RosterStore::load_from(
            storage,
            Box::new(SystemClock),
            roster::consts::ROSTER_KEY,
        );
        let mut app = RosterApp::new(store, settings);

        let rows_dirty = Rc::new(Cell::new(true));
        {
            let rows_dirty = rows_dirty.clone();
            app.store_mut().subscribe(move |event| {
                log::debug!("Roster changed: {:?}", event);
                rows_dirty.set(true);
            });
        }

        let page = Rc::new(RefCell::new(Page { app, rows_dirty }));

        setup_form_handlers(page.clone());
        setup_filter_handler(page.clone());
        setup_list_handler(page.clone());
        setup_modal_handlers(page.clone());

        render(&page.borrow());
        log::info!("Roster running!");
    }

    /// Route one event through the controller, then redraw and toast
    fn dispatch(page: &Shared, event: UiEvent) {
        let notices = {
            let mut p = page.borrow_mut();
            let rebuild_list = matches!(event, UiEvent::FilterChanged(_));
            let notices = p.app.handle(event);
            if rebuild_list {
                p.rows_dirty.set(true);
            }
            render(&p);
            notices
        };
        for notice in notices {
            show_toast(&notice);
        }
    }

    fn render(page: &Page) {
        let Some(document) = document() else {
            return;
        };
        let app = &page.app;
        let form = app.form();

        // Both the inline form and the modal mirror the same form state
        for prefix in ["", "edit-"] {
            for field in Field::ALL {
                if let Some(el) = input(&document, &format!("{}{}", prefix, field.as_str())) {
                    let value = form.values().get(field);
                    if el.value() != value {
                        el.set_value(value);
                    }
                }
            }
            if let Some(el) = document.get_element_by_id(&format!("{}name-error", prefix)) {
                let message = form.error().map(|e| e.to_string());
                el.set_text_content(message.as_deref());
                set_hidden(&el, message.is_none());
            }
        }

        if let Some(btn) = document.get_element_by_id("submit-btn") {
            btn.set_text_content(Some(form.submit_label()));
        }
        if let Some(modal) = document.get_element_by_id("edit-modal") {
            set_hidden(&modal, !form.is_editing());
        }
        if let Some(el) = input(&document, "filter-input") {
            if el.value() != app.query() {
                el.set_value(app.query());
            }
        }

        if page.rows_dirty.replace(false) {
            render_rows(&document, app);
        }
    }

    fn render_rows(document: &Document, app: &RosterApp) {
        let Some(list) = document.get_element_by_id("employee-list") else {
            return;
        };
        list.set_text_content(None);

        for employee in app.visible() {
            let Ok(row) = document.create_element("li") else {
                continue;
            };
            row.set_class_name("list-group-item employee-box");

            for text in [&employee.name, &employee.job_title, &employee.email] {
                if let Ok(cell) = document.create_element("span") {
                    cell.set_class_name("employee-cell");
                    cell.set_text_content(Some(text));
                    let _ = row.append_child(&cell);
                }
            }

            if let Ok(actions) = document.create_element("span") {
                actions.set_class_name("employee-actions");
                for (action, label) in [("edit", "Edit"), ("delete", "Delete")] {
                    if let Ok(btn) = document.create_element("button") {
                        btn.set_class_name(&format!("btn btn-{}", action));
                        btn.set_text_content(Some(label));
                        let _ = btn.set_attribute("data-action", action);
                        let _ = btn.set_attribute("data-id", &employee.id.to_string());
                        let _ = actions.append_child(&btn);
                    }
                }
                let _ = row.append_child(&actions);
            }

            let _ = list.append_child(&row);
        }
    }

    fn show_toast(notice: &Notice) {
        let Some(document) = document() else {
            return;
        };
        let Some(container) = document.get_element_by_id("toast-container") else {
            log::info!("{}", notice.message);
            return;
        };
        container.set_class_name(&format!("toast-container {}", notice.position.as_str()));

        let Ok(toast) = document.create_element("div") else {
            return;
        };
        toast.set_class_name("toast success");
        toast.set_text_content(Some(&notice.message));
        let _ = container.append_child(&toast);

        // Auto-dismiss
        let dismiss = Closure::once_into_js(move || toast.remove());
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                dismiss.unchecked_ref(),
                notice.duration_ms as i32,
            );
        }
    }

    fn setup_form_handlers(page: Shared) {
        let Some(document) = document() else {
            return;
        };

        // Field changes, for both the inline form and the modal
        for prefix in ["", "edit-"] {
            for field in Field::ALL {
                let Some(el) = input(&document, &format!("{}{}", prefix, field.as_str())) else {
                    continue;
                };
                let page = page.clone();
                let target = el.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    dispatch(&page, UiEvent::FieldChanged(field, target.value()));
                });
                let _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Name is read-only in the modal
        if let Some(el) = input(&document, "edit-name") {
            el.set_disabled(true);
        }

        if let Some(form) = document.get_element_by_id("employee-form") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                dispatch(&page, UiEvent::Submit);
            });
            let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_filter_handler(page: Shared) {
        let Some(el) = document().and_then(|d| input(&d, "filter-input")) else {
            return;
        };
        let target = el.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            dispatch(&page, UiEvent::FilterChanged(target.value()));
        });
        let _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Row buttons are recreated on every redraw, so clicks are delegated
    fn setup_list_handler(page: Shared) {
        let Some(list) = document().and_then(|d| d.get_element_by_id("employee-list")) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            let Some(btn) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("button[data-action]").ok().flatten())
            else {
                return;
            };
            let Some(id) = btn
                .get_attribute("data-id")
                .and_then(|id| id.parse::<u64>().ok())
                .map(EmployeeId)
            else {
                return;
            };
            match btn.get_attribute("data-action").as_deref() {
                Some("edit") => dispatch(&page, UiEvent::EditClicked(id)),
                Some("delete") => dispatch(&page, UiEvent::DeleteClicked(id)),
                _ => {}
            }
        });
        let _ = list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_modal_handlers(page: Shared) {
        let Some(document) = document() else {
            return;
        };

        for id in ["modal-close-btn", "modal-dismiss-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let page = page.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    dispatch(&page, UiEvent::CancelEdit);
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("modal-save-btn") {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                dispatch(&page, UiEvent::Submit);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Escape closes the modal
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.key() == "Escape" && page.borrow().app.form().is_editing() {
                    dispatch(&page, UiEvent::CancelEdit);
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::{Parser, Subcommand};

    use roster::platform::{FileStorage, SystemClock};
    use roster::{
        Employee, EmployeeId, Field, RosterApp, RosterStore, Settings, ToastPosition, UiEvent,
    };

    /// Employee roster editor
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// File holding the stored roster and settings
        #[arg(long, env = "ROSTER_FILE", default_value = "roster.json")]
        file: PathBuf,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Print the roster
        List {
            /// Only names containing this text (case-insensitive)
            #[arg(long)]
            filter: Option<String>,
        },
        /// Add an employee
        Add {
            #[arg(long)]
            name: String,
            #[arg(long, default_value = "")]
            job_title: String,
            #[arg(long, default_value = "")]
            email: String,
        },
        /// Change an employee's job title and/or email
        Edit {
            id: u64,
            #[arg(long)]
            job_title: Option<String>,
            #[arg(long)]
            email: Option<String>,
        },
        /// Remove an employee
        Delete { id: u64 },
        /// Show or change toast preferences
        Settings {
            /// Turn success toasts on or off
            #[arg(long)]
            toasts: Option<bool>,
            /// top-left, top-right, bottom-left or bottom-right
            #[arg(long, value_parser = parse_position)]
            position: Option<ToastPosition>,
            /// Auto-dismiss delay in milliseconds
            #[arg(long)]
            duration_ms: Option<u32>,
            /// Drop stored preferences and go back to defaults
            #[arg(long, conflicts_with_all = ["toasts", "position", "duration_ms"])]
            reset: bool,
        },
    }

    fn parse_position(s: &str) -> Result<ToastPosition, String> {
        ToastPosition::from_str(s).ok_or_else(|| format!("unknown toast position '{}'", s))
    }

    fn print_settings(settings: &Settings) {
        println!("toasts      {}", settings.toasts);
        println!("position    {}", settings.toast_position.as_str());
        println!("duration_ms {}", settings.toast_duration_ms);
    }

    fn print_row(employee: &Employee) {
        println!(
            "{:<15} {:<24} {:<24} {}",
            employee.id, employee.name, employee.job_title, employee.email
        );
    }

    pub fn run(args: Args) -> Result<()> {
        if let Some(parent) = args.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                bail!("directory {} does not exist", parent.display());
            }
        }

        let mut storage = FileStorage::new(&args.file);
        let mut settings = Settings::load(&storage);

        if let Command::Settings {
            toasts,
            position,
            duration_ms,
            reset,
        } = args.command
        {
            if reset {
                Settings::clear(&mut storage).context("settings not reset")?;
                settings = Settings::default();
            } else if toasts.is_some() || position.is_some() || duration_ms.is_some() {
                settings.toasts = toasts.unwrap_or(settings.toasts);
                settings.toast_position = position.unwrap_or(settings.toast_position);
                settings.toast_duration_ms = duration_ms.unwrap_or(settings.toast_duration_ms);
                settings.save(&mut storage).context("settings not saved")?;
            }
            print_settings(&settings);
            return Ok(());
        }

        let store = RosterStore::load(storage, SystemClock);
        let mut app = RosterApp::new(store, settings);
        log::debug!("Using roster file {}", args.file.display());

        let notices = match args.command {
            Command::List { filter } => {
                app.handle(UiEvent::FilterChanged(filter.unwrap_or_default()));
                for employee in app.visible() {
                    print_row(employee);
                }
                Vec::new()
            }
            Command::Add {
                name,
                job_title,
                email,
            } => {
                for (field, value) in [
                    (Field::Name, name),
                    (Field::JobTitle, job_title),
                    (Field::Email, email),
                ] {
                    app.handle(UiEvent::FieldChanged(field, value));
                }
                if let Some(e) = app.form().error() {
                    return Err(e).context("employee not added");
                }
                app.handle(UiEvent::Submit)
            }
            Command::Edit {
                id,
                job_title,
                email,
            } => {
                let id = EmployeeId(id);
                if app.employee(id).is_none() {
                    println!("no employee with id {}", id);
                    return Ok(());
                }
                app.handle(UiEvent::EditClicked(id));
                if let Some(job_title) = job_title {
                    app.handle(UiEvent::FieldChanged(Field::JobTitle, job_title));
                }
                if let Some(email) = email {
                    app.handle(UiEvent::FieldChanged(Field::Email, email));
                }
                let notices = app.handle(UiEvent::Submit);
                if let Some(employee) = app.employee(id) {
                    print_row(employee);
                }
                notices
            }
            Command::Delete { id } => {
                let id = EmployeeId(id);
                if app.employee(id).is_none() {
                    println!("no employee with id {}", id);
                }
                app.handle(UiEvent::DeleteClicked(id))
            }
            Command::Settings { .. } => Vec::new(),
        };

        for notice in notices {
            println!("{}", notice.message);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    cli::run(cli::Args::parse())
}
