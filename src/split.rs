//! Splitting of multi-host connection URIs for client-side failover

use crate::core::UrlResult;
use crate::uri::{ParsedUri, RawUri};
use tracing::debug;

/// Produce one single-host URI per entry of the host list, in order.
///
/// Everything but the host segment is copied from the input byte for byte,
/// so percent-encoded credentials are neither decoded nor re-encoded. The
/// scheme is not checked here. A URI without hosts yields an empty list.
pub fn split_multi_host_url(input: &str) -> UrlResult<Vec<String>> {
    let raw = RawUri::scan(input)?;
    // Validates the whole URI before anything is produced.
    ParsedUri::from_raw(&raw)?;

    let urls = raw
        .host_entries()?
        .into_iter()
        .map(|entry| -> UrlResult<String> {
            let url = raw.with_host(entry);
            ParsedUri::parse(&url)?;
            Ok(url)
        })
        .collect::<UrlResult<Vec<_>>>()?;

    debug!(hosts = urls.len(), "split multi-host URI");
    Ok(urls)
}
