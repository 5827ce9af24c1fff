pub mod config;
pub mod crawler;
pub mod error;
pub mod storage;

pub use config::Config;
pub use crawler::models::{Notice, NoticeDetails, PartialNotice};
pub use crawler::service::ScrapingService;
pub use error::ScrapeError;
pub use storage::Storage;
