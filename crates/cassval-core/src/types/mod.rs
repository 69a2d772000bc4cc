mod date;
mod decimal;
mod set;
mod time;
mod timestamp;
mod tuple;
mod uuid;
pub mod varint;

pub use date::Date;
pub use decimal::Decimal;
pub use set::Set;
pub use time::Time;
pub use timestamp::Timestamp;
pub use tuple::{Tuple, TupleError};
pub use uuid::Uuid;
pub use varint::Varint;
