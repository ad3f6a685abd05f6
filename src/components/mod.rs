pub mod blog_card;
pub mod date;
pub mod login_form;

pub use blog_card::BlogCard;
pub use date::{format_date, is_valid_date_format};
pub use login_form::{FormMessage, FormStatus, LoginForm, SubmitError, ValidationError};
