//! Gzip handling for request and response bodies.

use tower_http::compression::CompressionLayer;
use tower_http::compression::predicate::SizeAbove;
use tower_http::decompression::RequestDecompressionLayer;

/// Decompresses request bodies sent with `Content-Encoding: gzip`.
///
/// Decoding happens while the handler buffers the body; a corrupt stream
/// makes buffering fail, which the shortening handlers turn into
/// `500 Internal Server Error`. Bodies without a `Content-Encoding` header pass
/// through unchanged.
pub fn request_layer() -> RequestDecompressionLayer {
    RequestDecompressionLayer::new()
}

/// Compresses non-empty responses for clients whose `Accept-Encoding` allows gzip.
///
/// Sets `Content-Encoding: gzip` and `Vary: accept-encoding` on compressed
/// responses. Empty bodies, such as redirects and misses, are left as they are.
pub fn response_layer() -> CompressionLayer<SizeAbove> {
    CompressionLayer::new().compress_when(SizeAbove::new(1))
}
