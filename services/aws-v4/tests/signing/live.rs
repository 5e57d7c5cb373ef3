use super::{init_live_test, load_credential, send_signed_request};
use anyhow::Result;
use http::{Method, Request, StatusCode};
use log::warn;
use sigv4kit_aws_v4::RequestSigner;

const STS_URL: &str = "https://sts.amazonaws.com/";

#[tokio::test]
async fn test_get_caller_identity() -> Result<()> {
    if !init_live_test() {
        warn!("SIGV4KIT_AWS_V4_TEST is not set, skipped");
        return Ok(());
    }

    let mut cred = load_credential("sts")?;
    // The global sts endpoint signs in us-east-1.
    cred.region = "us-east-1".to_string();

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::GET;
    // Deliberately unsorted, the signer sorts it before sending.
    *req.uri_mut() = format!("{STS_URL}?Version=2011-06-15&Action=GetCallerIdentity").parse()?;

    let (status, body) = send_signed_request(&RequestSigner::new(), req, &cred).await?;
    assert_eq!(StatusCode::OK, status, "{body}");
    assert!(body.contains("GetCallerIdentityResult"));
    Ok(())
}

#[tokio::test]
async fn test_get_caller_identity_with_wrong_secret() -> Result<()> {
    if !init_live_test() {
        warn!("SIGV4KIT_AWS_V4_TEST is not set, skipped");
        return Ok(());
    }

    let mut cred = load_credential("sts")?;
    cred.region = "us-east-1".to_string();
    cred.secret_access_key.push('x');

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = format!("{STS_URL}?Action=GetCallerIdentity&Version=2011-06-15").parse()?;

    let (status, _) = send_signed_request(&RequestSigner::new(), req, &cred).await?;
    assert_eq!(StatusCode::FORBIDDEN, status);
    Ok(())
}
