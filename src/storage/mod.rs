use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

use anyhow::{anyhow, Result};
use opendal::{Operator, Scheme};
use url::Url;

static MEMORY_OPERATORS: OnceLock<Mutex<HashMap<String, Operator>>> = OnceLock::new();

fn memory_cache() -> &'static Mutex<HashMap<String, Operator>> {
    MEMORY_OPERATORS.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Creates an OpenDAL Operator from a URI string.
///
/// Supported schemes:
/// - file:///path/to/dir -> local filesystem
/// - s3://bucket/path -> AWS S3 (credentials from the environment)
/// - memory:// -> in-memory (for testing)
///
/// Memory operators are cached per URI: the bindings build a fresh operator
/// on every call, and repeated "memory://" lookups must address the same
/// backing store.
pub fn create_operator_from_uri(uri: &str) -> Result<Operator> {
    if uri.starts_with("memory://") {
        let mut cache = memory_cache()
            .lock()
            .map_err(|_| anyhow!("memory operator cache lock poisoned"))?;
        if let Some(op) = cache.get(uri) {
            return Ok(op.clone());
        }
        let builder = opendal::services::Memory::default();
        let op = Operator::new(builder)?.finish();
        cache.insert(uri.to_string(), op.clone());
        return Ok(op);
    }

    let url = Url::parse(uri).map_err(|e| anyhow!("Invalid storage URI: {}", e))?;
    let mut scheme_str = url.scheme();
    // Map "file" scheme to "fs" as expected by OpenDAL
    if scheme_str == "file" {
        scheme_str = "fs";
    }

    let scheme = Scheme::from_str(scheme_str)
        .map_err(|_| anyhow!("Unsupported storage scheme: {}", scheme_str))?;

    let mut map = HashMap::new();

    match scheme {
        Scheme::Fs => {
            map.insert("root".to_string(), url.path().to_string());
        }
        Scheme::S3 => {
            let bucket = url
                .host_str()
                .ok_or_else(|| anyhow!("S3 URI missing bucket"))?;
            map.insert("bucket".to_string(), bucket.to_string());
            let root = url.path();
            if !root.is_empty() && root != "/" {
                map.insert("root".to_string(), root.to_string());
            }
            map.insert("region".to_string(), "auto".to_string());
        }
        _ => {
            return Err(anyhow!("Unsupported storage scheme: {}", scheme));
        }
    }

    let op = Operator::via_iter(scheme, map)?;
    Ok(op)
}
