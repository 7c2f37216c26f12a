mod auth_switch;
pub use auth_switch::*;

mod confirm_modal;
pub use confirm_modal::*;

mod footer;
pub use footer::*;

mod navbar;
pub use navbar::*;

mod project_card;
pub use project_card::*;

pub mod toast;
pub use toast::{ToastKind, ToastView};

pub mod user;
pub use user::{Avatar, Identification};
