use bevy::prelude::*;

/// Top-level application state machine.
///
/// Every gameplay system registered by [`crate::session::SessionPlugin`] runs
/// under `.run_if(in_state(GameState::Playing))`, so the arena is fully inert
/// while any menu or overlay is on screen.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Main-menu splash screen; shown on startup.
    #[default]
    MainMenu,
    /// Active run; the player, enemies, and the phase clock are live.
    Playing,
    /// Run frozen; in-game pause overlay is visible.
    Paused,
    /// Player health reached zero; final-score overlay shown.
    GameOver,
}

/// Root node of the main-menu UI; entire tree is despawned on `OnExit(MainMenu)`.
#[derive(Component)]
pub struct MainMenuRoot;

/// Tags the "Start Game" button.
#[derive(Component)]
pub struct MenuStartButton;

/// Tags the "Quit" button.
#[derive(Component)]
pub struct MenuQuitButton;

/// Root node of the pause-menu overlay; entire tree is despawned on `OnExit(Paused)`.
#[derive(Component)]
pub struct PauseMenuRoot;

/// Tags the "Resume" button in the pause menu.
#[derive(Component)]
pub struct PauseResumeButton;

/// Tags the "Main Menu" button in the pause menu.
#[derive(Component)]
pub struct PauseMainMenuButton;

/// Root node of the game-over overlay; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;

/// Tags the "Play Again" button in the game-over overlay.
#[derive(Component)]
pub struct GameOverPlayAgainButton;
