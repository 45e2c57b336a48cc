mod page;
mod user;

pub use page::{DEFAULT_PAGE, DEFAULT_PER_PAGE, Page, PageRequest, total_pages};
pub use user::{NewUser, User};
