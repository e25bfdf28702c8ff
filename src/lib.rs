/// Wiring of the locate, parse, render and publish steps
pub mod app;
/// Ordered level catalog embedded from assets/levels.json
pub mod catalog;
/// Command line arguments
pub mod cli;
pub mod errors;
/// `M:SS.mmm` time rendering
pub mod formatter;
/// Finding medallog.txt on disk
pub mod locator;
pub mod logging;
/// medallog.txt record parsing
pub mod parser;
/// Catalog ordered report rendering
pub mod report;
/// Optional settings.json next to the executable
pub mod settings;

pub use catalog::Level;
pub use errors::MedalLogError;
pub use parser::BestTimes;
pub use settings::Settings;
