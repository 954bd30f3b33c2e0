//! Page-object views over the game's screens.

pub mod base;
pub mod gameplay;
pub mod main_menu;

pub use base::View;
pub use gameplay::GamePlayView;
pub use main_menu::MainMenuView;
