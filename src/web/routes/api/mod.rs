mod status;
mod unsubscribe;

pub use status::status;
pub use unsubscribe::unsubscribe;
