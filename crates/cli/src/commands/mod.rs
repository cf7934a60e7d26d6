//! Subcommand implementations.
//!
//! Each command calls into [`AppContext`] exactly like a view-layer event
//! handler would, then renders the resulting store state as text.

pub mod cart;
pub mod catalog;
pub mod viewed;
pub mod wishlist;

use atelier_storefront::state::AppContext;
use atelier_storefront::store::Severity;

/// Print toasts raised during the command.
pub fn print_toasts(ctx: &AppContext) {
    for toast in ctx.ui().visible() {
        let tag = match toast.severity {
            Severity::Success => "ok",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        match &toast.message {
            Some(message) => println!("[{tag}] {}: {message}", toast.title),
            None => println!("[{tag}] {}", toast.title),
        }
    }
}
