pub mod confirm;
pub mod toast;
