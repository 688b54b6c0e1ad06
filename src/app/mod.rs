pub mod client;

pub use client::MusicClient;
