//! Page shells. The session pipeline is the interesting part of this
//! application; these stay deliberately thin.

mod calendar;
mod compose;
mod dashboard;
mod landing;
mod login;
mod not_found;
mod oauth;
mod register;
mod settings;

pub use calendar::CalendarPage;
pub use compose::ComposePage;
pub use dashboard::DashboardPage;
pub use landing::LandingPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use oauth::{OAuthErrorPage, OAuthSuccessPage};
pub use register::RegisterPage;
pub use settings::SettingsPage;
