use anyhow::Result;
use chrono::{TimeZone, Utc};
use http::Method;
use pretty_assertions::assert_eq;
use sigv4kit_aws_v4::{sign, Credential, RequestSigner};
use sigv4kit_core::time::parse_iso8601;
use sigv4kit_core::{ErrorKind, SigningRequest};

fn test_credential() -> Credential {
    Credential::new(
        "AKIDEXAMPLE",
        "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
        "us-east-1",
        "service",
    )
}

#[test]
fn test_public_api_matches_aws_test_suite() -> Result<()> {
    let signer = RequestSigner::new().with_time(parse_iso8601("20150830T123600Z")?);
    let req = SigningRequest::try_new("GET", "https://example.amazonaws.com/")?;

    let signed = signer.sign(&req, &test_credential())?;
    assert_eq!(
        signed.pairs(),
        [
            ("x-amz-date", "20150830T123600Z"),
            (
                "Authorization",
                "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, SignedHeaders=host;x-amz-date, Signature=5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
            ),
        ]
    );
    Ok(())
}

#[test]
fn test_scope_date_follows_signing_instant() -> Result<()> {
    let cred = test_credential();
    let req = SigningRequest::try_new("GET", "https://example.amazonaws.com/")?;

    let before = RequestSigner::new()
        .with_time(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap())
        .sign(&req, &cred)?;
    let after = RequestSigner::new()
        .with_time(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .sign(&req, &cred)?;

    assert_eq!(before.x_amz_date, "20231231T235959Z");
    assert!(before.authorization.contains("/20231231/us-east-1/"));
    assert_eq!(after.x_amz_date, "20240101T000000Z");
    assert!(after.authorization.contains("/20240101/us-east-1/"));
    Ok(())
}

#[test]
fn test_sign_with_current_time() -> Result<()> {
    let req = SigningRequest::try_new("GET", "https://example.amazonaws.com/")?;
    let signed = sign(&req, &test_credential())?;

    let date = &signed.x_amz_date[..8];
    assert!(signed
        .authorization
        .contains(&format!("Credential=AKIDEXAMPLE/{date}/us-east-1/service/aws4_request")));
    Ok(())
}

#[test]
fn test_errors_surface_to_caller() -> Result<()> {
    let req = SigningRequest::new(Method::GET, "example.amazonaws.com");
    let err = sign(&req, &test_credential()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UrlInvalid);

    let req = SigningRequest::new(Method::GET, "https://example.amazonaws.com/");
    let err = sign(&req, &Credential::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialMissing);
    Ok(())
}

#[test]
fn test_concurrent_signing() -> Result<()> {
    let signer = RequestSigner::new().with_time(parse_iso8601("20150830T123600Z")?);
    let cred = test_credential();
    let req = SigningRequest::try_new("GET", "https://example.amazonaws.com/?b=2&a=1")?;
    let expected = signer.sign(&req, &cred)?;

    std::thread::scope(|s| {
        let handles = (0..4)
            .map(|_| s.spawn(|| signer.sign(&req, &cred)))
            .collect::<Vec<_>>();
        for h in handles {
            let signed = h.join().expect("thread must not panic").expect("sign must succeed");
            assert_eq!(signed, expected);
        }
    });
    Ok(())
}
