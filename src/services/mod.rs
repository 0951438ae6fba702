pub mod storage;
pub mod upi;
pub mod whatsapp;

pub use storage::UploadStore;
