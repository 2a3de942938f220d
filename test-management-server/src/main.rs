// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::net::SocketAddr;

use appid_test_management_server::create_http_server;
use clap::Parser;

#[derive(Debug, Parser)]
#[clap(about = "In-memory App ID management API")]
struct Args {
    #[clap(long, default_value = "127.0.0.1:4567")]
    bind_addr: SocketAddr,

    /// Require `Authorization: Bearer <token>` on every request.
    #[clap(long, env = "APPID_TEST_SERVER_BEARER_TOKEN")]
    bearer_token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt: Args = Args::try_parse()?;

    let http_server =
        create_http_server(Some(opt.bind_addr), opt.bearer_token)?;
    if let Err(s) = http_server.await {
        anyhow::bail!("Error from start(): {}", s);
    }

    Ok(())
}
