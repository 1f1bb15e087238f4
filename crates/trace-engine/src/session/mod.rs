pub mod state;
pub mod toast;
