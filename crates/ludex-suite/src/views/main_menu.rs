//! Main menu screen.

use std::sync::Arc;
use std::time::Duration;

use ludex_core::context::RunContext;
use ludex_core::element::{Locator, Lookup};

use crate::error::SuiteError;
use crate::views::base::{View, DEFAULT_INTERVAL};

const MENU_PANEL: Locator = Locator::name("MainMenuPanel");
const PLAY_BUTTON: Locator = Locator::name("PlayButton");
const PLAYER_NAME_INPUT: Locator = Locator::name("PlayerNameInput");
const SETTINGS_BUTTON: Locator = Locator::name("SettingsButton");

/// Default deadline for the menu to finish loading.
const MENU_READY_TIMEOUT: Duration = Duration::from_secs(10);

pub struct MainMenuView {
    ctx: Arc<RunContext>,
}

impl View for MainMenuView {
    fn ctx(&self) -> &Arc<RunContext> {
        &self.ctx
    }
}

impl MainMenuView {
    pub fn new(ctx: Arc<RunContext>) -> Self {
        Self { ctx }
    }

    /// Wait for the menu panel to appear.
    pub async fn wait_until_ready(&self, timeout: Duration) -> Result<(), SuiteError> {
        self.wait_for(MENU_PANEL, timeout, DEFAULT_INTERVAL).await?;
        self.ctx.reporter.log("Main menu is ready");
        Ok(())
    }

    /// Whether the menu panel is present and enabled. Absence is `false`.
    pub async fn is_menu_visible(&self) -> Result<bool, SuiteError> {
        match self.lookup(MENU_PANEL).await? {
            Lookup::Found(panel) => {
                self.ctx
                    .reporter
                    .log(&format!("Main menu panel visible: {}", panel.enabled));
                Ok(panel.enabled)
            }
            _ => {
                self.ctx.reporter.log("Main menu panel not found");
                Ok(false)
            }
        }
    }

    /// Type the player name into the name input field.
    pub async fn enter_player_name(&self, player_name: &str) -> Result<(), SuiteError> {
        let field = self.find(PLAYER_NAME_INPUT).await?;
        self.ctx.game().set_text(&field, player_name).await?;
        self.ctx
            .reporter
            .log(&format!("Entered player name: {player_name}"));
        Ok(())
    }

    /// Click the play button.
    pub async fn click_play(&self) -> Result<(), SuiteError> {
        let button = self.find(PLAY_BUTTON).await?;
        self.ctx.game().click_object(&button).await?;
        self.ctx.reporter.log("Clicked play button");
        Ok(())
    }

    /// Click the settings button.
    pub async fn open_settings(&self) -> Result<(), SuiteError> {
        let button = self.find(SETTINGS_BUTTON).await?;
        self.ctx.game().click_object(&button).await?;
        self.ctx.reporter.log("Navigated to settings");
        Ok(())
    }

    /// Full workflow: wait for the menu, verify it is visible, enter the
    /// player name, and click play.
    ///
    /// If the panel never appears or is disabled, this fails with
    /// [`SuiteError::MenuHidden`] before touching the name field or the
    /// play button.
    pub async fn start_new_game(&self, player_name: &str) -> Result<(), SuiteError> {
        let panel = self
            .wait_lookup(MENU_PANEL, MENU_READY_TIMEOUT, DEFAULT_INTERVAL)
            .await?;
        match panel {
            Lookup::Found(panel) if panel.enabled => {}
            _ => {
                self.ctx.reporter.log("Main menu panel is not visible");
                return Err(SuiteError::MenuHidden);
            }
        }

        self.enter_player_name(player_name).await?;
        self.click_play().await?;

        self.ctx
            .reporter
            .log(&format!("Started new game for player: {player_name}"));
        Ok(())
    }
}
