pub mod access_slots;
pub mod check_slots;
pub mod get_slots;
pub mod prove;
pub mod run;
