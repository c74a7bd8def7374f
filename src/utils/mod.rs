pub mod discarded_logger;
pub mod interrupt;
pub mod logger;

pub use self::discarded_logger::{DiscardedRowLogger, DISCARDED_ROWS};
pub use self::interrupt::InterruptFlag;
pub use self::logger::init_file_logger;
