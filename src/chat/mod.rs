pub mod models;
pub mod session;
pub use models::{ChatTurn, Transcript};
pub use session::Session;
