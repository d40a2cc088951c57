mod cursor;
mod parser;


pub use cursor::FieldCursor;
pub use parser::{MAX_ZONE_LEN, SpreadRecord};
