pub mod serde_helpers;
