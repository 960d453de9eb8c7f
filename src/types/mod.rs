mod user;

pub use user::{Address, Geolocation, Name, User};
