//! HTTP clients for the hosted backends.

mod gemini;
mod supabase;

pub use gemini::GeminiClient;
pub use supabase::{AuthError, SignUpOutcome, SupabaseClient};
