pub mod chord;
pub mod config;
pub mod gesture;
pub mod keys;
pub mod types;

// Keep the public surface small and intentional.
pub use chord::*;
pub use config::*;
pub use gesture::*;
pub use keys::*;
pub use types::*;
