//! Content-addressed URI rewrite for reward images

pub const IPFS_SCHEME: &str = "ipfs://";

/// Resolve an `ipfs://<cid>` URI through an HTTP gateway.
///
/// The gateway is used as a prefix, so it should end with `/`.
/// URIs with any other scheme are returned unchanged.
pub fn ipfs_to_http_url(uri: &str, gateway: &str) -> String {
    match uri.strip_prefix(IPFS_SCHEME) {
        Some(hash) => format!("{}{}", gateway, hash),
        None => uri.to_string(),
    }
}
