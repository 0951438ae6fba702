pub mod generate;
pub mod health;
pub mod links;
pub mod preview;

pub use generate::generate_document;
pub use health::health_check;
pub use links::{payment_qr, whatsapp_link};
pub use preview::preview_document;
