// Library exports for the Salazar Battlesnake
// The server binary, the replay tool and the integration tests all build on these

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod evaluator;
pub mod grid;
pub mod handler;
pub mod path;
pub mod perimeter;
pub mod reachability;
pub mod replay;
pub mod selector;
pub mod session;
pub mod types;
pub mod wanderer;
