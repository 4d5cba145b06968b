pub mod error;
pub mod event;
pub mod paths;
pub mod state;
pub mod store;
pub mod week;

pub use error::{Result, UsageError};
pub use event::Message;
pub use state::{StateStore, UsageState};
pub use week::ResetDay;
