//! Defense-vs-position scraping: the table capability, its WebDriver-backed
//! implementation, and the tab walk.

pub mod scrape;
pub mod table;
pub mod webdriver;

pub use scrape::{scrape_efficiency, RawEfficiency, ScrapeOutcome};
pub use table::{DefenseTable, TableRow};
pub use webdriver::WebDriverSession;
