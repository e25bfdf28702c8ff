use once_cell::sync::Lazy;
use serde::Deserialize;

/// One level of the catalog: the identifier written to medallog.txt and the
/// name shown in game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: String,
}

impl Level {
    /// `ID (Name)`, used in diagnostics.
    pub fn label(&self) -> String {
        format!("{} ({})", self.id, self.name)
    }
}

#[derive(Deserialize)]
struct CatalogRoot {
    levels: Vec<Level>,
}

// Order is the in-game progression order and matches the spreadsheet rows.
// Identifiers are kept exactly as the game writes them, "SA L VAGE2" included.
const LEVELS_JSON: &str = include_str!("../assets/levels.json");

static LEVELS: Lazy<Vec<Level>> = Lazy::new(|| {
    serde_json::from_str::<CatalogRoot>(LEVELS_JSON)
        .expect("Failed to parse embedded levels.json")
        .levels
});

/// All levels in progression order.
pub fn levels() -> &'static [Level] {
    &LEVELS
}
