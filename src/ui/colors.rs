// Pastel color palette for the TUI

/// Defines the pastel color palette for the UI
#[derive(Clone, Copy, Debug)]
pub enum PastelColor {
    Pink,
    Lavender,
    Mint,
    SkyBlue,
    Peach,
    White,
    Gray,
}

/// Color roles used by the renderer
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub primary: PastelColor,
    pub secondary: PastelColor,
    pub accent: PastelColor,
    pub text: PastelColor,
    pub error: PastelColor,
    pub success: PastelColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: PastelColor::Lavender,
            secondary: PastelColor::SkyBlue,
            accent: PastelColor::Pink,
            text: PastelColor::White,
            error: PastelColor::Peach,
            success: PastelColor::Mint,
        }
    }
}
