mod analytics;
mod doctor;
mod home;

pub use analytics::Analytics;
pub use doctor::Doctor;
pub use home::Home;
