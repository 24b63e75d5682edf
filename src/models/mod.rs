mod user;
mod forms;
mod flash;

pub use user::User;
pub use forms::LoginForm;
pub use flash::{Flash, FlashLevel};
