pub mod checksum;
pub mod fields;

pub use checksum::ChecksumValidator;
pub use fields::{find_date, is_valid_name, parse_sex, FieldValidator};
