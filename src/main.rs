use astra::Server;
use dogfinder::config::Config;
use dogfinder::{respond, AppState};
use log::{error, info};

fn main() {
    // A missing .env is fine; the real environment still applies.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let addr = config.server.socket_addr();
    let max_workers = config.server.max_workers;

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            error!("Could not build the upstream client: {e}");
            std::process::exit(1);
        }
    };

    info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(max_workers);

    let result = server.serve(move |req, _info| respond(req, &state));

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
