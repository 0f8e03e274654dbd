//! Value Object Module

pub mod cookie_settings;
pub mod display_name;
pub mod email;
pub mod user_name;
pub mod user_password;

pub use cookie_settings::{CookieSettings, CookieSettingsError};
pub use display_name::{DisplayName, DisplayNameError};
pub use email::{Email, EmailError};
pub use user_name::{UserName, UserNameError};
pub use user_password::{RawPassword, UserPassword};
