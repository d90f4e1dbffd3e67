// Résumé library: records stored in the external KV store, reviewed on read.

pub mod handlers;
pub mod models;
pub mod store;
