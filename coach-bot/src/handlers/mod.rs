//! Handler implementations: request logging and the coaching handler.

mod coach;
mod logging;

pub use coach::CoachHandler;
pub use logging::LoggingHandler;
