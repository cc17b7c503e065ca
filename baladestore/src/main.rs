// Copyright 2026 ReductSoftware UG
// Licensed under the Business Source License 1.1

use baladestore::launcher::launch_server;
use log::error;

#[tokio::main]
async fn main() {
    if let Err(err) = launch_server().await {
        error!("{}", err);
        std::process::exit(1);
    }
}
