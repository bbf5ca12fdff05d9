// Library exports for the Battlesnake bot
// The server binary, the replay tool and the integration tests all go through here

#[macro_use]
extern crate rocket;

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod grid;
pub mod handler;
pub mod moves;
pub mod replay;
pub mod server;
pub mod types;
