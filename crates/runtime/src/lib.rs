//! Platform-independent client state: the selection wizard, carousel, adapted
//! preview, upload panel and toasts. The browser shell feeds events in and
//! carries out the returned [`Command`]s.

pub mod carousel;
pub mod config;
pub mod event_bus;
pub mod navigation;
pub mod preview;
pub mod screen;
pub mod session;
pub mod toast;
pub mod upload;

pub use carousel::*;
pub use config::*;
pub use event_bus::*;
pub use navigation::*;
pub use preview::*;
pub use screen::*;
pub use session::*;
pub use toast::*;
pub use upload::*;
