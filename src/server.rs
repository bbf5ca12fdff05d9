// Rocket instance assembly, shared by the server binary and the HTTP tests

use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};

use crate::bot::Bot;
use crate::handler;

/// Value of the `Server` header attached to every response
pub const SERVER_ID: &str = "battlesnake/github/heuristic-snake";

/// Builds a Rocket instance serving the Battlesnake API for `bot`
pub fn build(bot: Bot) -> Rocket<Build> {
    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", SERVER_ID);
            })
        }))
        .mount(
            "/",
            routes![handler::index, handler::start, handler::get_move, handler::end],
        )
}
