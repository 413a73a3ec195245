//! Preview encoding options

/// TIFF compression for encoded previews. PNG output ignores this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}
