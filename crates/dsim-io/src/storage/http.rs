use std::io::Read;
use std::time::Duration;

use dsim_core::{DsimError, DsimResult, StorageOp};
use quick_xml::{events::Event, Reader};
use tracing::debug;
use ureq::{Agent, AgentBuilder, Request};

use super::{validate_bucket, validate_key, ObjectStore};

/// S3-compatible endpoint addressed path-style: `<endpoint>/<bucket>/<key>`.
///
/// Requests are unsigned; `auth_token`, when set, is sent as a bearer token
/// for gateways that front the bucket.
pub struct HttpStore {
    agent: Agent,
    endpoint: String,
    auth_token: Option<String>,
}

impl HttpStore {
    pub fn new(endpoint: &str, auth_token: Option<String>, timeout: Duration) -> Self {
        Self {
            agent: AgentBuilder::new().timeout(timeout).build(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, bucket, key)
    }

    fn authorize(&self, request: Request) -> Request {
        match &self.auth_token {
            Some(token) => request.set("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<&str>,
    ) -> DsimResult<ListPage> {
        let mut request = self
            .agent
            .get(&format!("{}/{}", self.endpoint, bucket))
            .query("list-type", "2")
            .query("prefix", prefix);
        if let Some(token) = continuation {
            request = request.query("continuation-token", token);
        }
        let body = self
            .authorize(request)
            .call()
            .map_err(|err| DsimError::storage(StorageOp::List, bucket, prefix, err))?
            .into_string()
            .map_err(|err| DsimError::storage(StorageOp::List, bucket, prefix, err))?;
        parse_list_page(&body)
    }
}

impl ObjectStore for HttpStore {
    fn put(&self, bucket: &str, key: &str, body: &[u8]) -> DsimResult<()> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        let request = self
            .agent
            .put(&self.object_url(bucket, key))
            .set("Content-Type", "text/csv");
        let response = self
            .authorize(request)
            .send_bytes(body)
            .map_err(|err| DsimError::storage(StorageOp::Put, bucket, key, err))?;
        debug!(status = response.status(), bucket, key, "put object");
        Ok(())
    }

    fn get(&self, bucket: &str, key: &str) -> DsimResult<Vec<u8>> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        let request = self.agent.get(&self.object_url(bucket, key));
        let response = self
            .authorize(request)
            .call()
            .map_err(|err| DsimError::storage(StorageOp::Get, bucket, key, err))?;
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|err| DsimError::storage(StorageOp::Get, bucket, key, err))?;
        Ok(body)
    }

    fn list(&self, bucket: &str, prefix: &str) -> DsimResult<Vec<String>> {
        validate_bucket(bucket)?;
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;
        loop {
            let page = self.list_page(bucket, prefix, continuation.as_deref())?;
            keys.extend(page.keys);
            match page.next_token {
                Some(token) if page.truncated => continuation = Some(token),
                _ => break,
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn describe(&self) -> String {
        format!("http:{}", self.endpoint)
    }
}

#[derive(Debug, Default, PartialEq)]
struct ListPage {
    keys: Vec<String>,
    truncated: bool,
    next_token: Option<String>,
}

/// Pull `Key`, `IsTruncated` and `NextContinuationToken` out of a
/// ListObjectsV2 response body.
fn parse_list_page(xml: &str) -> DsimResult<ListPage> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut page = ListPage::default();
    let mut active_tag: Option<String> = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.local_name();
                active_tag = Some(String::from_utf8_lossy(name.as_ref()).into_owned());
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| DsimError::Parse(format!("list response: {err}")))?
                    .into_owned();
                match active_tag.as_deref() {
                    Some("Key") => page.keys.push(text),
                    Some("IsTruncated") => page.truncated = text.eq_ignore_ascii_case("true"),
                    Some("NextContinuationToken") => page.next_token = Some(text),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => active_tag = None,
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(DsimError::Parse(format!(
                    "list response at byte {}: {err}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>hedera-hackathon</Name>
  <Prefix>pilot/</Prefix>
  <KeyCount>2</KeyCount>
  <MaxKeys>1000</MaxKeys>
  <IsTruncated>true</IsTruncated>
  <NextContinuationToken>1ueGcxLPRx1Tr/XYExHnhbYLgveDs2J/wm36Hy4vbOwM=</NextContinuationToken>
  <Contents>
    <Key>pilot/data_2025-10-01_12-00-00.csv</Key>
    <Size>1532</Size>
  </Contents>
  <Contents>
    <Key>pilot/data_2025-10-01_12-15-00.csv</Key>
    <Size>1498</Size>
  </Contents>
</ListBucketResult>"#;

    #[test]
    fn parses_keys_and_continuation() {
        let page = parse_list_page(PAGE).unwrap();
        assert_eq!(
            page.keys,
            vec![
                "pilot/data_2025-10-01_12-00-00.csv",
                "pilot/data_2025-10-01_12-15-00.csv"
            ]
        );
        assert!(page.truncated);
        assert_eq!(
            page.next_token.as_deref(),
            Some("1ueGcxLPRx1Tr/XYExHnhbYLgveDs2J/wm36Hy4vbOwM=")
        );
    }

    #[test]
    fn empty_listing() {
        let xml = r#"<ListBucketResult><Name>b</Name><KeyCount>0</KeyCount><IsTruncated>false</IsTruncated></ListBucketResult>"#;
        let page = parse_list_page(xml).unwrap();
        assert!(page.keys.is_empty());
        assert!(!page.truncated);
        assert_eq!(page.next_token, None);
    }

    #[test]
    fn escaped_keys_are_unescaped() {
        let xml = r#"<ListBucketResult><Contents><Key>pilot/a&amp;b.csv</Key></Contents></ListBucketResult>"#;
        assert_eq!(parse_list_page(xml).unwrap().keys, vec!["pilot/a&b.csv"]);
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let store = HttpStore::new("http://localhost:9000/", None, Duration::from_secs(1));
        assert_eq!(
            store.object_url("bucket", "pilot/x.csv"),
            "http://localhost:9000/bucket/pilot/x.csv"
        );
        assert_eq!(store.describe(), "http:http://localhost:9000");
    }

    #[test]
    fn unreachable_endpoint_is_storage_unavailable() {
        let store = HttpStore::new("http://127.0.0.1:9", None, Duration::from_millis(200));
        let err = store.put("bucket", "pilot/x.csv", b"id\n").unwrap_err();
        assert!(matches!(
            err,
            DsimError::StorageUnavailable { op: StorageOp::Put, .. }
        ));
    }
}
