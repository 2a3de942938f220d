// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use appid_test_client::Tester;
use clap::Parser;

#[derive(Debug, Parser)]
#[clap(about = "App ID management API test client")]
struct Args {
    #[clap(
        long,
        env = "APPID_MANAGEMENT_URL",
        default_value = "http://127.0.0.1:4567"
    )]
    url: String,

    #[clap(long, env = "APPID_MANAGEMENT_TENANT_ID", default_value = "test")]
    tenant_id: String,

    /// A Bearer token
    #[clap(long, env = "APPID_MANAGEMENT_BEARER_TOKEN")]
    bearer: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt: Args = Args::try_parse()?;

    let tester = match opt.bearer {
        Some(bearer) => {
            Tester::new_with_bearer_auth(&opt.url, &opt.tenant_id, bearer)?
        }

        None => Tester::new(&opt.url, &opt.tenant_id)?,
    };

    tester.run().await?;

    println!("SUCCESS");

    Ok(())
}
