mod log;
mod memory;
mod queue;
mod smtp;

pub use self::log::LogEmailService;
pub use self::memory::MemoryEmailService;
pub use self::queue::{DeliveryReceipt, DeliveryStatus, MailQueue};
pub use self::smtp::SmtpEmailService;
