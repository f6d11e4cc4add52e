mod admin;
pub use admin::{AdminHome, AdminSection};

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod not_found;
pub use not_found::NotFound;

mod password_reset;
pub use password_reset::{ForgetPassword, ForgetPasswordOtp, NewPassword};
