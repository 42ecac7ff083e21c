pub mod deferred;
pub mod dispatch;
pub mod engine;
pub mod handoff;
pub mod interceptor;
pub mod state;
pub mod tracker;
pub mod traits;
