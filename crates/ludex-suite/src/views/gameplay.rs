//! In-game (gameplay) screen.

use std::sync::Arc;
use std::time::Duration;

use ludex_core::context::RunContext;
use ludex_core::element::{Locator, Lookup, WorldPosition};

use crate::error::SuiteError;
use crate::views::base::{View, DEFAULT_INTERVAL};

const GAME_HUD: Locator = Locator::name("GameHUD");
const PAUSE_BUTTON: Locator = Locator::name("PauseButton");
const RESUME_BUTTON: Locator = Locator::name("ResumeButton");
const MAIN_CHARACTER: Locator = Locator::name("MainCharacter");

pub struct GamePlayView {
    ctx: Arc<RunContext>,
}

impl View for GamePlayView {
    fn ctx(&self) -> &Arc<RunContext> {
        &self.ctx
    }
}

impl GamePlayView {
    pub fn new(ctx: Arc<RunContext>) -> Self {
        Self { ctx }
    }

    /// Wait for the HUD to appear.
    pub async fn wait_until_ready(&self, timeout: Duration) -> Result<(), SuiteError> {
        self.wait_for(GAME_HUD, timeout, DEFAULT_INTERVAL).await?;
        self.ctx.reporter.log("Gameplay is ready");
        Ok(())
    }

    /// Whether the HUD is present and enabled. Absence is `false`.
    pub async fn is_hud_visible(&self) -> Result<bool, SuiteError> {
        match self.lookup(GAME_HUD).await? {
            Lookup::Found(hud) => {
                self.ctx
                    .reporter
                    .log(&format!("Gameplay HUD visible: {}", hud.enabled));
                Ok(hud.enabled)
            }
            _ => {
                self.ctx.reporter.log("Gameplay HUD not found");
                Ok(false)
            }
        }
    }

    /// Click the pause button.
    pub async fn pause(&self) -> Result<(), SuiteError> {
        let button = self.find(PAUSE_BUTTON).await?;
        self.ctx.game().click_object(&button).await?;
        self.ctx.reporter.log("Game paused");
        Ok(())
    }

    /// Click the resume button.
    pub async fn resume(&self) -> Result<(), SuiteError> {
        let button = self.find(RESUME_BUTTON).await?;
        self.ctx.game().click_object(&button).await?;
        self.ctx.reporter.log("Game resumed");
        Ok(())
    }

    /// Whether the pause overlay is up, judged by the resume button.
    pub async fn is_paused(&self) -> Result<bool, SuiteError> {
        match self.lookup(RESUME_BUTTON).await? {
            Lookup::Found(button) => {
                self.ctx
                    .reporter
                    .log(&format!("Game paused: {}", button.enabled));
                Ok(button.enabled)
            }
            _ => {
                self.ctx
                    .reporter
                    .log("Resume button not found, game is not paused");
                Ok(false)
            }
        }
    }

    /// Whether the main character object is present and enabled.
    pub async fn is_character_present(&self) -> Result<bool, SuiteError> {
        match self.lookup(MAIN_CHARACTER).await? {
            Lookup::Found(character) => {
                self.ctx
                    .reporter
                    .log(&format!("Main character present: {}", character.enabled));
                Ok(character.enabled)
            }
            _ => {
                self.ctx.reporter.log("Main character not found");
                Ok(false)
            }
        }
    }

    /// World-space position of the main character.
    pub async fn character_position(&self) -> Result<WorldPosition, SuiteError> {
        let character = self.find(MAIN_CHARACTER).await?;
        let position = self.ctx.game().world_position(&character).await?;
        self.ctx.reporter.log(&format!(
            "Main character position: {}, {}, {}",
            position.x, position.y, position.z
        ));
        Ok(position)
    }
}
