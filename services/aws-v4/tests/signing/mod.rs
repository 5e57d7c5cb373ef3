mod live;
mod offline;

use anyhow::Result;
use http::{Request, StatusCode};
use log::debug;
use reqwest::Client;
use sigv4kit_aws_v4::{Config, Credential, RequestSigner};
use sigv4kit_core::OsEnv;
use std::env;

/// Load credential for live tests from environment variables.
///
/// `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `AWS_REGION` are read
/// the same way callers read them.
pub fn load_credential(service: &str) -> Result<Credential> {
    let cfg = Config::default().with_service(service).from_env(&OsEnv);
    Ok(Credential::try_from(cfg)?)
}

/// Initialize test environment, returns `false` when live tests are off.
pub fn init_live_test() -> bool {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    env::var("SIGV4KIT_AWS_V4_TEST").as_deref() == Ok("on")
}

/// Send signed request and return response
pub async fn send_signed_request(
    signer: &RequestSigner,
    req: Request<String>,
    cred: &Credential,
) -> Result<(StatusCode, String)> {
    let (mut parts, body) = req.into_parts();
    signer.sign_parts(&mut parts, body.clone(), cred)?;
    let req = Request::from_parts(parts, body);

    debug!("signed request: {req:?}");

    let client = Client::new();
    let resp = client.execute(req.try_into()?).await?;

    let status = resp.status();
    let body = resp.text().await?;

    debug!("response status: {status}, body: {body}");
    Ok((status, body))
}
