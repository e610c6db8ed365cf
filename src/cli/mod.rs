pub mod console;
pub mod credentials;
pub mod models;
pub mod run;
pub mod session;
pub mod status;
