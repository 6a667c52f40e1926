//! Quota store backends: the trait, an in-process store and the Supabase client

pub mod client;
pub mod factory;
pub mod supabase;

pub use client::{InMemoryStore, QuotaStore, StoreError};
pub use supabase::SupabaseStore;
