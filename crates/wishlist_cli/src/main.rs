//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `wishlist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("wishlist_core ping={}", wishlist_core::ping());
    println!("wishlist_core version={}", wishlist_core::core_version());
}
