//! System tray icon and menu management
//!
//! Provides the tray icon with status indication, the context menu and the
//! mapping from tray input to [`TrayAction`]s. Must live on the UI thread.

use crate::check::state::CheckStatus;
use crate::ui::icon::Glyph;
use crate::ui::notify;
use crate::ui::presenter::{Notice, Presenter, TrayAction, TrayError};
use tracing::{debug, info, trace};
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

const INITIAL_TOOLTIP: &str = "Public IP Checker";

/// Tray icon, menu and notification surface
pub struct TrayView {
    tray: Option<TrayIcon>,
    address_item: MenuItem,
    actions: MenuActions,
}

/// Maps menu item ids to the actions they trigger
#[derive(Debug, Clone)]
pub struct MenuActions {
    copy: MenuId,
    refresh: MenuId,
    exit: MenuId,
}

impl MenuActions {
    pub fn new(copy: MenuId, refresh: MenuId, exit: MenuId) -> Self {
        Self {
            copy,
            refresh,
            exit,
        }
    }

    /// Action for an activated menu item, `None` for the address line
    pub fn resolve(&self, event: &MenuEvent) -> Option<TrayAction> {
        let id = event.id();
        [
            (&self.copy, TrayAction::Copy),
            (&self.refresh, TrayAction::Refresh),
            (&self.exit, TrayAction::Exit),
        ]
        .into_iter()
        .find(|(item_id, _)| *item_id == id)
        .map(|(_, action)| action)
    }
}

impl TrayView {
    /// Create the tray icon with its menu
    ///
    /// Renders every status icon once up front; failing to do so means the
    /// environment cannot show the indicator at all.
    pub fn new() -> Result<Self, TrayError> {
        for status in [
            CheckStatus::Starting,
            CheckStatus::Updating,
            CheckStatus::Ok,
            CheckStatus::Error,
        ] {
            Glyph::for_status(status).to_icon()?;
        }

        let address_item = MenuItem::new("IP: checking...", false, None);
        let copy_item = MenuItem::new("Copy address", true, None);
        let refresh_item = MenuItem::new("Refresh address", true, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let menu = Menu::new();
        menu.append_items(&[
            &address_item,
            &PredefinedMenuItem::separator(),
            &copy_item,
            &refresh_item,
            &PredefinedMenuItem::separator(),
            &exit_item,
        ])
        .map_err(|e| TrayError::CreationFailed(e.to_string()))?;

        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_menu_on_left_click(true)
            .with_tooltip(INITIAL_TOOLTIP)
            .with_icon(Glyph::for_status(CheckStatus::Starting).to_icon()?)
            .build()
            .map_err(|e| TrayError::CreationFailed(e.to_string()))?;

        info!("Tray icon created");

        Ok(Self {
            tray: Some(tray),
            actions: MenuActions::new(
                copy_item.id().clone(),
                refresh_item.id().clone(),
                exit_item.id().clone(),
            ),
            address_item,
        })
    }

    pub fn menu_actions(&self) -> &MenuActions {
        &self.actions
    }
}

/// Action for a click on the tray icon itself
///
/// Left click copies the address. The menu may open on the same click; that
/// is handled by the platform and independent of the copy.
pub fn icon_action(event: &TrayIconEvent) -> Option<TrayAction> {
    match event {
        TrayIconEvent::Click {
            button: MouseButton::Left,
            button_state: MouseButtonState::Up,
            ..
        } => Some(TrayAction::Copy),
        _ => None,
    }
}

impl Presenter for TrayView {
    fn set_icon(&mut self, glyph: Glyph) -> Result<(), TrayError> {
        let Some(tray) = &self.tray else {
            return Ok(());
        };
        tray.set_icon(Some(glyph.to_icon()?))
            .map_err(|e| TrayError::UpdateFailed(e.to_string()))?;
        trace!(rgb = ?glyph.rgb, "Tray icon updated");
        Ok(())
    }

    fn set_tooltip(&mut self, text: &str) -> Result<(), TrayError> {
        let Some(tray) = &self.tray else {
            return Ok(());
        };
        tray.set_tooltip(Some(text))
            .map_err(|e| TrayError::UpdateFailed(e.to_string()))
    }

    fn set_menu_line(&mut self, text: &str) -> Result<(), TrayError> {
        self.address_item.set_text(text);
        Ok(())
    }

    fn notify(&mut self, notice: &Notice) -> Result<(), TrayError> {
        if self.tray.is_none() {
            return Ok(());
        }
        debug!(title = %notice.title, kind = ?notice.kind, "Showing notification");
        notify::show(notice)
    }

    fn release(&mut self) {
        if let Some(tray) = self.tray.take() {
            // Hide before drop so the icon does not linger on Windows
            let _ = tray.set_visible(false);
            info!("Tray icon removed");
        }
    }
}
