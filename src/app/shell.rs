//! The menu bar shell.
//!
//! Owns the tray icon, the event loop and the wiring between menu items,
//! the hotkey listener and the capture worker. Notifications from worker
//! threads travel back to the main thread as user events so they always
//! fire from the run loop.

use super::dialog;
use super::state::AppState;
use super::worker::CaptureWorker;
use crate::capture::{self, CaptureMode, CapturePipeline};
use crate::config::ConfigStore;
use crate::notify::{DesktopNotifier, NotifySink};
use anyhow::Context;
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex};
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};

const MENU_ID_FULL_SCREEN: &str = "full-screen";
const MENU_ID_REGION: &str = "region";
const MENU_ID_SET_FOLDER: &str = "set-folder";
const MENU_ID_QUIT: &str = "quit";

/// Events delivered to the main event loop.
#[derive(Debug, Clone)]
enum AppEvent {
    /// A menu item was activated.
    Menu(String),
    /// A background thread wants a notification shown.
    Notify { title: String, body: String },
}

/// Sink that forwards notifications to the main thread.
struct ProxyNotifier {
    proxy: Mutex<EventLoopProxy<AppEvent>>,
}

impl NotifySink for ProxyNotifier {
    fn notify(&self, title: &str, body: &str) {
        let event = AppEvent::Notify {
            title: title.to_string(),
            body: body.to_string(),
        };
        let send_failed = match self.proxy.lock() {
            Ok(proxy) => proxy.send_event(event).is_err(),
            Err(_) => true,
        };
        if send_failed {
            warn!("Event loop is gone, dropping notification: {}: {}", title, body);
        }
    }
}

/// Run the menu bar app until the user quits.
pub fn run() -> anyhow::Result<()> {
    let event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();
    let proxy_notifier: Arc<dyn NotifySink> = Arc::new(ProxyNotifier {
        proxy: Mutex::new(event_loop.create_proxy()),
    });
    let desktop = DesktopNotifier;

    let store = ConfigStore::new().context("Failed to locate config file")?;
    let (prefs, config_err) = store.load_or_default();
    if let Some(err) = config_err {
        desktop.notify("Error", &format!("Failed to load configuration: {}", err));
    }

    match capture::file::ensure_folder_exists(&prefs.output_folder) {
        Ok(true) => desktop.notify(
            "Folder Created",
            &format!("Created output folder: {}", prefs.output_folder.display()),
        ),
        Ok(false) => {}
        Err(err) => desktop.notify("Error", &format!("{}", err)),
    }

    let state = Arc::new(AppState::new(prefs.output_folder));
    let pipeline = CapturePipeline::new(Arc::clone(&proxy_notifier));
    let worker = CaptureWorker::spawn(pipeline, Arc::clone(&state))
        .context("Failed to start capture worker")?;

    crate::hotkey::spawn_listener(worker.request_sender(), Arc::clone(&proxy_notifier))
        .context("Failed to start hotkey listener")?;

    // The handler must be Sync; the proxy is not, so it sits behind a mutex.
    let menu_proxy = Mutex::new(event_loop.create_proxy());
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        let send_failed = match menu_proxy.lock() {
            Ok(proxy) => proxy.send_event(AppEvent::Menu(event.id.0.clone())).is_err(),
            Err(_) => true,
        };
        if send_failed {
            warn!("Event loop is gone, dropping menu event {:?}", event.id);
        }
    }));

    // Dropping the tray removes the status item, so it lives for the whole
    // run. Created inside the loop because macOS requires the run loop to be
    // active first.
    let mut tray: Option<TrayIcon> = None;

    info!("Shutterbar running");
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => match build_tray() {
                Ok(icon) => tray = Some(icon),
                Err(err) => {
                    error!("Failed to create tray icon: {}", err);
                    desktop.notify("Error", &format!("Failed to create menu bar item: {}", err));
                    *control_flow = ControlFlow::Exit;
                }
            },
            Event::UserEvent(AppEvent::Notify { title, body }) => {
                desktop.notify(&title, &body);
            }
            Event::UserEvent(AppEvent::Menu(id)) => match id.as_str() {
                MENU_ID_FULL_SCREEN => request_capture(&worker, &desktop, CaptureMode::FullScreen),
                MENU_ID_REGION => request_capture(&worker, &desktop, CaptureMode::Region),
                MENU_ID_SET_FOLDER => set_output_folder(&store, &state, &desktop),
                MENU_ID_QUIT => {
                    info!("Quit selected");
                    *control_flow = ControlFlow::Exit;
                }
                other => debug!("Ignoring unknown menu id {:?}", other),
            },
            _ => {}
        }
    })
}

fn build_tray() -> anyhow::Result<TrayIcon> {
    let menu = Menu::new();
    menu.append_items(&[
        &MenuItem::with_id(MENU_ID_FULL_SCREEN, CaptureMode::FullScreen.label(), true, None),
        &MenuItem::with_id(MENU_ID_REGION, CaptureMode::Region.label(), true, None),
        &PredefinedMenuItem::separator(),
        &MenuItem::with_id(MENU_ID_SET_FOLDER, "Set Output Folder...", true, None),
        &PredefinedMenuItem::separator(),
        &MenuItem::with_id(MENU_ID_QUIT, "Quit", true, None),
    ])?;

    let tray = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_title("\u{1F4F7}")
        .with_tooltip(format!(
            "Shutterbar {} ({})",
            env!("CARGO_PKG_VERSION"),
            env!("SHUTTERBAR_GIT_HASH")
        ))
        .build()?;
    Ok(tray)
}

fn request_capture(worker: &CaptureWorker, notifier: &dyn NotifySink, mode: CaptureMode) {
    debug!("Menu requested {} capture", mode.label());
    if let Err(err) = worker.request(mode) {
        notifier.notify("Error", &format!("Failed to start capture: {}", err));
    }
}

fn set_output_folder(store: &ConfigStore, state: &AppState, notifier: &dyn NotifySink) {
    let current = state.output_folder();

    let input = match dialog::prompt_output_folder(&current) {
        Ok(Some(input)) => input,
        Ok(None) => return,
        Err(err) => {
            notifier.notify("Error", &format!("Failed to show folder dialog: {}", err));
            return;
        }
    };

    // Blank input keeps the current folder, matching Cancel.
    let Some(folder) = dialog::parse_folder_input(&input) else {
        return;
    };

    if let Err(err) = capture::file::ensure_folder_exists(&folder) {
        notifier.notify("Error", &format!("Failed to set output folder: {}", err));
        return;
    }

    state.set_output_folder(folder.clone());
    if let Err(err) = store.save(&folder) {
        notifier.notify("Error", &format!("Failed to save configuration: {}", err));
        return;
    }

    notifier.notify(
        "Output Folder Set",
        &format!("Screenshots will be saved to {}", folder.display()),
    );
}
